//! Moon Girl - dodge the Wonderland clouds until the clock runs out
//!
//! Core modules:
//! - `sim`: Simulation (spawning, motion, collisions, status effects, round state)
//! - `platform`: Browser/native platform abstraction (clock, key codes)
//! - `runner`: Frame-driven game loop around the simulation
//! - `sprites`: Presentation state derived from the simulation
//! - `settings`: Runtime configuration

pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod sprites;

pub use runner::{RoundSummary, Runner};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Visible playfield
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Nominal frame length; status effects decay by this much every tick
    pub const NOMINAL_FRAME_MS: u32 = 16;
    /// Round length
    pub const ROUND_BUDGET_MS: u64 = 200_000;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_SIZE: f32 = 80.0;
    /// Pixels per tick for each held direction
    pub const MOVE_SPEED: f32 = 4.0;
    pub const MAX_HEALTH: u8 = 100;
    /// Falling speed after death (pixels/tick, no acceleration)
    pub const FALL_SPEED: f32 = 3.0;
    /// Horizontal speed while being carried away (pixels/tick)
    pub const CARRY_SPEED: f32 = -3.0;

    /// Hazard ("cloud") defaults
    pub const HAZARD_SIZE: f32 = 80.0;
    pub const HAZARD_SPEED: f32 = 2.0;
    pub const HAZARD_DAMAGE: u8 = 20;
    /// Hazards spawn with their top edge in [0, this)
    pub const HAZARD_SPAWN_Y_MAX: f32 = 750.0;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 40.0;
    pub const PROJECTILE_SPAWN_Y_MIN: f32 = 100.0;
    pub const PROJECTILE_SPAWN_Y_MAX: f32 = 400.0;
    pub const PROJECTILE_MIN_SPEED: f32 = 2.0;
    pub const PROJECTILE_MAX_SPEED: f32 = 3.5;
    /// Launch angle is sampled from [0, this)
    pub const PROJECTILE_MAX_ANGLE: f32 = 1.5 * std::f32::consts::PI;
    /// Projectiles this far outside the playfield are dropped
    pub const PROJECTILE_CULL_MARGIN: f32 = 200.0;
    pub const HEAL_AMOUNT: u8 = 20;

    /// Spawn cadence (ms)
    pub const SPAWN_INTERVAL_MS: u64 = 1000;
    pub const SPAWN_INTERVAL_SLOW_MS: u64 = 1800;
    pub const SPAWN_INTERVAL_FAST_MS: u64 = 600;

    /// Status effect durations (ms)
    pub const START_INVINCIBLE_MS: u32 = 1000;
    pub const HIT_INVINCIBLE_MS: u32 = 800;
    pub const SLOW_MS: u32 = 3000;
    pub const CLOAK_MS: u32 = 15_000;
    pub const GHOST_MS: u32 = 3000;
    pub const FAST_MS: u32 = 3000;
    pub const SHRINK_MS: u32 = 3000;
}

/// Axis-aligned overlap between a `w × h` box at `a` and a square of side `size` at `b`
#[inline]
pub fn boxes_overlap(a: glam::Vec2, w: f32, h: f32, b: glam::Vec2, size: f32) -> bool {
    a.x < b.x + size && a.x + w > b.x && a.y < b.y + size && a.y + h > b.y
}
