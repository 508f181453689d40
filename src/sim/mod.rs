//! Simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - Wall-clock time is passed in, never read
//! - Seeded RNG only
//! - Entities kept in spawn order

pub mod collision;
pub mod effects;
pub mod input;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use effects::{Status, StatusEffects};
pub use input::{Direction, InputState};
pub use state::{
    GameEvent, Hazard, HazardKind, Player, Projectile, ProjectileKind, RoundPhase,
    SimulationState,
};
pub use tick::tick;
