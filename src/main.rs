//! Moon Girl entry point
//!
//! In the browser: wires keyboard events, runs the frame loop and draws to
//! the canvas. Natively: plays one unattended round and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, KeyboardEvent};

    use moon_girl::consts::*;
    use moon_girl::platform::{Key, SystemClock};
    use moon_girl::sim::{HazardKind, ProjectileKind};
    use moon_girl::sprites::{self, CharacterPose};
    use moon_girl::{Runner, Settings};

    const CHARACTER_POSES: [CharacterPose; 9] = [
        CharacterPose::Float1,
        CharacterPose::Float2,
        CharacterPose::Collision,
        CharacterPose::Magic,
        CharacterPose::Ghost,
        CharacterPose::Small1,
        CharacterPose::Small2,
        CharacterPose::BigBroken,
        CharacterPose::BigFall,
    ];
    const PROJECTILE_KINDS: [ProjectileKind; 6] = [
        ProjectileKind::RedQueenRose,
        ProjectileKind::WhiteQueenRose,
        ProjectileKind::HatterHat,
        ProjectileKind::CatBall,
        ProjectileKind::RabbitWatch,
        ProjectileKind::PlayingCard,
    ];
    const BACKGROUND: &str = "background-loop.png";

    /// Images by file name; drawing skips any that have not finished loading
    struct Images {
        by_name: HashMap<String, HtmlImageElement>,
    }

    impl Images {
        fn load(settings: &Settings) -> Result<Self, JsValue> {
            let mut names: Vec<String> = vec![BACKGROUND.to_string()];
            names.extend(CHARACTER_POSES.iter().map(|p| p.file_name().to_string()));
            names.extend(HazardKind::ALL.iter().map(|k| sprites::hazard_file(*k).to_string()));
            names.extend(PROJECTILE_KINDS.iter().map(|k| sprites::projectile_file(*k).to_string()));
            names.extend((0..=5).map(sprites::health_bar_file));
            names.extend((0..2).map(|f| sprites::win_banner_file(f).to_string()));

            let mut by_name = HashMap::new();
            for name in names {
                let img = HtmlImageElement::new()?;
                img.set_src(&settings.asset_path(&name));
                by_name.insert(name, img);
            }
            Ok(Self { by_name })
        }

        /// The image, once it has finished loading
        fn loaded(&self, name: &str) -> Option<&HtmlImageElement> {
            self.by_name
                .get(name)
                .filter(|img| img.complete() && img.natural_width() > 0)
        }

        fn natural_width(&self, name: &str) -> Option<f32> {
            self.loaded(name).map(|img| img.natural_width() as f32)
        }

        /// Draw at the image's own size
        fn draw_natural(&self, ctx: &CanvasRenderingContext2d, name: &str, x: f32, y: f32) {
            if let Some(img) = self.loaded(name) {
                let _ = ctx.draw_image_with_html_image_element(img, x as f64, y as f64);
            }
        }

        fn draw(&self, ctx: &CanvasRenderingContext2d, name: &str, x: f32, y: f32, w: f32, h: f32) {
            let Some(img) = self.loaded(name) else {
                return;
            };
            let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img, x as f64, y as f64, w as f64, h as f64,
            );
        }
    }

    struct Game {
        runner: Runner<SystemClock>,
        ctx: CanvasRenderingContext2d,
        images: Images,
        settings: Settings,
    }

    impl Game {
        fn render(&self) {
            let ctx = &self.ctx;
            let state = self.runner.state();
            ctx.clear_rect(0.0, 0.0, PLAYFIELD_WIDTH as f64, PLAYFIELD_HEIGHT as f64);
            let background = self.runner.background();
            let x = background.offset();
            self.images.draw_natural(ctx, BACKGROUND, x, 0.0);
            self.images
                .draw_natural(ctx, BACKGROUND, x + background.width(), 0.0);

            for hazard in &state.hazards {
                let name = sprites::hazard_file(hazard.kind);
                self.images
                    .draw(ctx, name, hazard.pos.x, hazard.pos.y, HAZARD_SIZE, HAZARD_SIZE);
            }
            for p in &state.projectiles {
                let name = sprites::projectile_file(p.kind);
                self.images.draw(ctx, name, p.pos.x, p.pos.y, p.size, p.size);
            }

            let now = self.runner.now_ms();
            if sprites::character_visible(state, now, self.settings.reduced_motion) {
                let pose = sprites::character_pose(state, self.runner.sprite_frame());
                let player = &state.player;
                self.images.draw(
                    ctx,
                    pose.file_name(),
                    player.pos.x,
                    player.pos.y,
                    player.width,
                    player.height,
                );
            }

            let bar = sprites::health_bar_file(sprites::health_bar_index(state.health));
            self.images.draw(ctx, &bar, 10.0, 10.0, 400.0, 100.0);

            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("highHealth"))
            {
                el.set_text_content(Some(&state.remaining_secs().to_string()));
            }

            if state.is_win() {
                let banner = sprites::win_banner_file(sprites::win_banner_frame(self.runner.win_ticks()));
                self.images.draw(
                    ctx,
                    banner,
                    PLAYFIELD_WIDTH / 2.0 - 140.0,
                    PLAYFIELD_HEIGHT / 2.0 - 170.0,
                    300.0,
                    300.0,
                );
            }

            if let Some(prompt) = sprites::end_prompt(state) {
                let x = (PLAYFIELD_WIDTH / 2.0 - 150.0) as f64;
                let y = (PLAYFIELD_HEIGHT - 40.0) as f64;
                ctx.set_font("28px Arial");
                ctx.set_line_width(4.0);
                ctx.set_stroke_style_str("#000");
                let _ = ctx.stroke_text(prompt, x, y);
                ctx.set_fill_style_str("#fff");
                let _ = ctx.fill_text(prompt, x, y);
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already set: {e}").into());
        }

        log::info!("Moon Girl starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(PLAYFIELD_WIDTH as u32);
        canvas.set_height(PLAYFIELD_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::default();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let images = Images::load(&settings)?;
        let game = Rc::new(RefCell::new(Game {
            runner: Runner::new(SystemClock::new(), seed),
            ctx,
            images,
            settings,
        }));

        setup_keyboard(&window, game.clone())?;
        request_animation_frame(game);

        log::info!("Moon Girl running!");
        Ok(())
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().runner.key_down(key);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    game.borrow_mut().runner.key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One frame: simulate, draw, and schedule the next frame unless stopped
    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            if g.runner.background().width() == 0.0 {
                if let Some(width) = g.images.natural_width(BACKGROUND) {
                    g.runner.set_background_width(width);
                }
            }
            let keep_going = g.runner.frame();
            g.render();
            keep_going
        };
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use moon_girl::consts::NOMINAL_FRAME_MS;
    use moon_girl::platform::ManualClock;
    use moon_girl::{Runner, Settings};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Moon Girl (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(settings_path.as_deref());
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });

    let mut runner = Runner::new(ManualClock::new(0), seed);
    let summary = runner.run_round(settings.max_frames, |clock| {
        clock.advance(NOMINAL_FRAME_MS as u64)
    });

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode round summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
