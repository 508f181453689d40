//! Presentation state derived from the simulation
//!
//! Which character frame to draw, which health bar image, which win banner.
//! Pure functions over [`SimulationState`]; the drawing host only looks up
//! images by the names returned here and skips any that are not loaded.

use crate::sim::{HazardKind, ProjectileKind, SimulationState};

/// Rendered frames between character animation flips
pub const ANIMATION_FLIP_FRAMES: u32 = 20;
/// Frames each win banner image stays up
pub const WIN_BANNER_FRAMES: u64 = 30;
/// Blink period of the hurt pose (ms)
pub const HURT_BLINK_MS: u64 = 100;
/// Background scroll per running frame (px)
pub const BACKGROUND_SCROLL_PX: f32 = 1.0;

pub const END_PROMPT: &str = "Game over - press R to restart";

/// Character sprite frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterPose {
    Float1,
    Float2,
    Collision,
    Magic,
    Ghost,
    Small1,
    Small2,
    BigBroken,
    BigFall,
}

impl CharacterPose {
    pub fn file_name(&self) -> &'static str {
        match self {
            CharacterPose::Float1 => "moon-girl-float1.png",
            CharacterPose::Float2 => "moon-girl-float2.png",
            CharacterPose::Collision => "moon-girl-collision.png",
            CharacterPose::Magic => "moon-girl-magic.png",
            CharacterPose::Ghost => "moon-girl-ghost.png",
            CharacterPose::Small1 => "moon-girl-small1.png",
            CharacterPose::Small2 => "moon-girl-small2.png",
            CharacterPose::BigBroken => "moon-girl-big-broken.png",
            CharacterPose::BigFall => "moon-girl-big-fall.png",
        }
    }
}

/// Conditions that pick the character sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseLayer {
    CarriedAway,
    Dead,
    Shrunk,
    Ghost,
    /// Cloak or Slow
    Magic,
    /// Post-hit invincibility
    Hurt,
    Floating,
}

/// Highest priority first; the first layer that applies is drawn
pub const POSE_PRIORITY: [PoseLayer; 7] = [
    PoseLayer::CarriedAway,
    PoseLayer::Dead,
    PoseLayer::Shrunk,
    PoseLayer::Ghost,
    PoseLayer::Magic,
    PoseLayer::Hurt,
    PoseLayer::Floating,
];

impl PoseLayer {
    pub fn applies(self, state: &SimulationState) -> bool {
        let effects = &state.effects;
        match self {
            PoseLayer::CarriedAway => state.player.is_carried_away,
            PoseLayer::Dead => state.player.is_dead,
            PoseLayer::Shrunk => effects.is_shrunk(),
            PoseLayer::Ghost => effects.is_ghost(),
            PoseLayer::Magic => effects.is_cloaked() || effects.is_slowed(),
            PoseLayer::Hurt => effects.is_invincible(),
            PoseLayer::Floating => true,
        }
    }
}

pub fn active_layer(state: &SimulationState) -> PoseLayer {
    POSE_PRIORITY
        .into_iter()
        .find(|layer| layer.applies(state))
        .unwrap_or(PoseLayer::Floating)
}

/// Character sprite for the current state; `frame` alternates 0/1
pub fn character_pose(state: &SimulationState, frame: u8) -> CharacterPose {
    let alternate = |a, b| if frame == 0 { a } else { b };
    match active_layer(state) {
        PoseLayer::CarriedAway | PoseLayer::Shrunk => {
            alternate(CharacterPose::Small1, CharacterPose::Small2)
        }
        PoseLayer::Dead => {
            if state.player.vel.y > 1.0 {
                CharacterPose::BigFall
            } else {
                CharacterPose::BigBroken
            }
        }
        PoseLayer::Ghost => CharacterPose::Ghost,
        PoseLayer::Magic => CharacterPose::Magic,
        PoseLayer::Hurt => CharacterPose::Collision,
        PoseLayer::Floating => alternate(CharacterPose::Float1, CharacterPose::Float2),
    }
}

/// Whether to draw the character this frame (the hurt pose blinks)
pub fn character_visible(state: &SimulationState, now_ms: u64, reduced_motion: bool) -> bool {
    if reduced_motion || active_layer(state) != PoseLayer::Hurt {
        return true;
    }
    (now_ms / HURT_BLINK_MS) % 2 == 0
}

/// Index into the six health bar images (0 = full, 5 = empty)
pub fn health_bar_index(health: u8) -> usize {
    5usize.saturating_sub(health as usize / 20)
}

pub fn health_bar_file(index: usize) -> String {
    if index == 0 {
        "blood.png".to_string()
    } else {
        format!("blood-{}.png", index)
    }
}

/// Which of the two win banner images to show
pub fn win_banner_frame(win_ticks: u64) -> usize {
    ((win_ticks / WIN_BANNER_FRAMES) % 2) as usize
}

pub fn win_banner_file(frame: usize) -> &'static str {
    if frame == 0 { "Passed-1.png" } else { "Passed-2.png" }
}

pub fn hazard_file(kind: HazardKind) -> &'static str {
    match kind {
        HazardKind::Gray => "cloud-gray.png",
        HazardKind::Beige => "cloud-beige.png",
        HazardKind::Cat => "cloud-cat.png",
        HazardKind::Hatter => "cloud-hatter.png",
        HazardKind::PlayingCards => "cloud-playing-cards.png",
        HazardKind::Rabbit => "cloud-rabbit.png",
        HazardKind::RedQueen => "cloud-red-queen.png",
        HazardKind::WhiteQueen => "cloud-white-queen.png",
    }
}

pub fn projectile_file(kind: ProjectileKind) -> &'static str {
    match kind {
        ProjectileKind::RedQueenRose => "cloud-red-queen-rose.png",
        ProjectileKind::WhiteQueenRose => "cloud-white-queen-rose.png",
        ProjectileKind::HatterHat => "cloud-hatter-hat.png",
        ProjectileKind::CatBall => "cloud-cat-ball.png",
        ProjectileKind::RabbitWatch => "cloud-rabit-watch.png",
        ProjectileKind::PlayingCard => "cloud-playing-cards-1.png",
    }
}

/// Text shown under the playfield once the round has ended
pub fn end_prompt(state: &SimulationState) -> Option<&'static str> {
    (!state.is_running()).then_some(END_PROMPT)
}

/// Two-frame flip-book driven once per rendered frame
#[derive(Debug, Clone, Default)]
pub struct SpriteAnimator {
    timer: u32,
    frame: u8,
}

impl SpriteAnimator {
    pub fn advance(&mut self) {
        self.timer += 1;
        if self.timer > ANIMATION_FLIP_FRAMES {
            self.frame ^= 1;
            self.timer = 0;
        }
    }

    pub fn frame(&self) -> u8 {
        self.frame
    }
}

/// Horizontal offset of the looping background
///
/// The image is drawn twice side by side at its natural size, at `offset`
/// and `offset + width`. The width is unknown until the image loads; until
/// then the offset keeps drifting without wrapping.
#[derive(Debug, Clone, Default)]
pub struct ScrollingBackground {
    offset: f32,
    width: f32,
}

impl ScrollingBackground {
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn advance(&mut self) {
        self.offset -= BACKGROUND_SCROLL_PX;
        if self.width > 0.0 && self.offset <= -self.width {
            self.offset = 0.0;
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn width(&self) -> f32 {
        self.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RoundPhase;

    fn state() -> SimulationState {
        let mut state = SimulationState::new(3, 0);
        state.effects.invincible = 0;
        state
    }

    #[test]
    fn test_pose_priority_order() {
        let mut s = state();
        assert_eq!(character_pose(&s, 0), CharacterPose::Float1);
        assert_eq!(character_pose(&s, 1), CharacterPose::Float2);

        s.effects.invincible = 500;
        assert_eq!(character_pose(&s, 0), CharacterPose::Collision);

        s.effects.slow = 500;
        assert_eq!(character_pose(&s, 0), CharacterPose::Magic);

        s.effects.ghost = 500;
        assert_eq!(character_pose(&s, 0), CharacterPose::Ghost);

        s.effects.shrink = 500;
        assert_eq!(character_pose(&s, 1), CharacterPose::Small2);

        s.player.kill();
        assert_eq!(character_pose(&s, 0), CharacterPose::BigFall);
    }

    #[test]
    fn test_carried_beats_dead() {
        let mut s = state();
        s.player.is_dead = true;
        s.player.is_carried_away = true;
        assert_eq!(active_layer(&s), PoseLayer::CarriedAway);
        assert_eq!(character_pose(&s, 0), CharacterPose::Small1);
    }

    #[test]
    fn test_dead_without_fall_speed_is_broken() {
        let mut s = state();
        s.player.is_dead = true;
        assert_eq!(character_pose(&s, 0), CharacterPose::BigBroken);
    }

    #[test]
    fn test_hurt_blinks_unless_reduced_motion() {
        let mut s = state();
        assert!(character_visible(&s, 150, false));
        s.effects.invincible = 800;
        assert!(character_visible(&s, 50, false));
        assert!(!character_visible(&s, 150, false));
        assert!(character_visible(&s, 150, true));
    }

    #[test]
    fn test_health_bar_index() {
        assert_eq!(health_bar_index(100), 0);
        assert_eq!(health_bar_index(80), 1);
        assert_eq!(health_bar_index(79), 2);
        assert_eq!(health_bar_index(20), 4);
        assert_eq!(health_bar_index(19), 5);
        assert_eq!(health_bar_index(0), 5);
        assert_eq!(health_bar_file(0), "blood.png");
        assert_eq!(health_bar_file(3), "blood-3.png");
    }

    #[test]
    fn test_win_banner_alternates() {
        assert_eq!(win_banner_frame(0), 0);
        assert_eq!(win_banner_frame(29), 0);
        assert_eq!(win_banner_frame(30), 1);
        assert_eq!(win_banner_frame(60), 0);
        assert_eq!(win_banner_file(1), "Passed-2.png");
    }

    #[test]
    fn test_animator_flips_every_21_frames() {
        let mut anim = SpriteAnimator::default();
        for _ in 0..20 {
            anim.advance();
        }
        assert_eq!(anim.frame(), 0);
        anim.advance();
        assert_eq!(anim.frame(), 1);
        for _ in 0..21 {
            anim.advance();
        }
        assert_eq!(anim.frame(), 0);
    }

    #[test]
    fn test_background_wraps_at_image_width() {
        let mut bg = ScrollingBackground::default();
        for _ in 0..5 {
            bg.advance();
        }
        assert_eq!(bg.offset(), -5.0);

        bg.set_width(4.0);
        bg.advance();
        assert_eq!(bg.offset(), 0.0);
        for _ in 0..3 {
            bg.advance();
        }
        assert_eq!(bg.offset(), -3.0);
        bg.advance();
        assert_eq!(bg.offset(), 0.0);
    }

    #[test]
    fn test_end_prompt_only_after_round() {
        let mut s = state();
        assert_eq!(end_prompt(&s), None);
        s.phase = RoundPhase::Won;
        assert_eq!(end_prompt(&s), Some(END_PROMPT));
    }
}
