//! Frame-driven game loop
//!
//! The host calls [`Runner::frame`] once per display refresh. Each call polls
//! the clock and runs one full simulation tick. Restart resets the round in
//! place, so there is only ever one loop to schedule.

use serde::Serialize;

use crate::platform::{Clock, Key};
use crate::sim::{self, GameEvent, InputState, RoundPhase, SimulationState};
use crate::sprites::{ScrollingBackground, SpriteAnimator};

/// End-of-round report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub seed: u64,
    pub phase: RoundPhase,
    pub health: u8,
    pub remaining_secs: u64,
    pub ticks: u64,
    pub frames: u64,
    pub hazards: usize,
    pub projectiles: usize,
}

/// Owns the simulation, its input and its clock
#[derive(Debug)]
pub struct Runner<C: Clock> {
    clock: C,
    state: SimulationState,
    input: InputState,
    animator: SpriteAnimator,
    background: ScrollingBackground,
    /// Frames spent in the Won phase (drives the banner animation)
    win_ticks: u64,
    frames: u64,
    active: bool,
}

impl<C: Clock> Runner<C> {
    pub fn new(clock: C, seed: u64) -> Self {
        let now = clock.now_ms();
        log::info!("Round started (seed {})", seed);
        Self {
            clock,
            state: SimulationState::new(seed, now),
            input: InputState::default(),
            animator: SpriteAnimator::default(),
            background: ScrollingBackground::default(),
            win_ticks: 0,
            frames: 0,
            active: true,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn win_ticks(&self) -> u64 {
        self.win_ticks
    }

    pub fn background(&self) -> &ScrollingBackground {
        &self.background
    }

    /// Natural width of the background image, once it has loaded
    pub fn set_background_width(&mut self, width: f32) {
        self.background.set_width(width);
    }

    pub fn sprite_frame(&self) -> u8 {
        self.animator.frame()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Exit the loop; the next `frame` call returns false
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Move(direction) => self.input.set(direction, true),
            Key::Restart => {
                self.restart();
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if let Key::Move(direction) = key {
            self.input.set(direction, false);
        }
    }

    /// Start a new round. Only allowed once the current round has ended.
    ///
    /// Returns true if the round was restarted.
    pub fn restart(&mut self) -> bool {
        if self.state.is_running() {
            log::debug!("Restart ignored, round still running");
            return false;
        }
        let now = self.clock.now_ms();
        self.state.reset(now);
        self.win_ticks = 0;
        self.animator = SpriteAnimator::default();
        let width = self.background.width();
        self.background = ScrollingBackground::default();
        self.background.set_width(width);
        log::info!("Round restarted");
        true
    }

    /// Run one frame. Returns false once the loop has been stopped.
    pub fn frame(&mut self) -> bool {
        if !self.active {
            return false;
        }

        if self.state.is_running() {
            let now = self.clock.now_ms();
            self.background.advance();
            sim::tick(&mut self.state, &self.input, now);
            for event in &self.state.events {
                match event {
                    GameEvent::Won | GameEvent::GameOver => {
                        log::info!("Round over: {:?}", self.summary());
                    }
                    _ => log::trace!("{:?}", event),
                }
            }
        } else if self.state.is_win() {
            self.win_ticks += 1;
        }

        self.animator.advance();
        self.frames += 1;
        true
    }

    /// Keep running frames until the round ends or `max_frames` pass.
    ///
    /// `between_frames` runs before every frame, e.g. to advance a manual clock.
    pub fn run_round(
        &mut self,
        max_frames: u64,
        mut between_frames: impl FnMut(&C),
    ) -> RoundSummary {
        let mut frames = 0;
        while self.state.is_running() && frames < max_frames && self.active {
            between_frames(&self.clock);
            self.frame();
            frames += 1;
        }
        if self.state.is_running() {
            log::warn!("Stopped after {} frames with the round still running", frames);
        }
        self.summary()
    }

    pub fn summary(&self) -> RoundSummary {
        RoundSummary {
            seed: self.state.seed,
            phase: self.state.phase,
            health: self.state.health,
            remaining_secs: self.state.remaining_secs(),
            ticks: self.state.time_ticks,
            frames: self.frames,
            hazards: self.state.hazards.len(),
            projectiles: self.state.projectiles.len(),
        }
    }
}
