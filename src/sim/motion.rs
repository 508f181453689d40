//! Per-tick motion integration
//!
//! Velocities are in pixels per tick; there is no acceleration anywhere.

use super::effects::StatusEffects;
use super::input::InputState;
use super::state::{Hazard, Player, Projectile};
use crate::consts::PLAYFIELD_HEIGHT;

/// Move an alive player by the held directions
pub fn apply_intent(player: &mut Player, input: &InputState) {
    if player.is_alive() {
        player.pos += input.displacement();
    }
}

/// Drift clouds left; the Fast status doubles their speed
pub fn advance_hazards(hazards: &mut [Hazard], effects: &StatusEffects) {
    let multiplier = if effects.is_hastened() { 2.0 } else { 1.0 };
    for hazard in hazards {
        hazard.pos.x -= hazard.speed * multiplier;
    }
}

pub fn advance_projectiles(projectiles: &mut [Projectile]) {
    for projectile in projectiles {
        projectile.pos += projectile.vel;
    }
}

/// Move a dead or carried-away player along its terminal track.
///
/// Returns true once the player has left the playfield.
pub fn advance_terminal(player: &mut Player) -> bool {
    let mut exited = false;
    if player.is_dead {
        player.pos.y += player.vel.y;
        exited |= player.pos.y > PLAYFIELD_HEIGHT;
    }
    if player.is_carried_away {
        player.pos.x += player.vel.x;
        exited |= player.pos.x + player.width < 0.0;
    }
    exited
}
