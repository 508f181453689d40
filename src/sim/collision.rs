//! Collision detection and effect resolution
//!
//! All boxes are axis-aligned. Clouds and thrown objects use fixed square
//! boxes regardless of how they are drawn.

use super::effects::Status;
use super::state::{GameEvent, ProjectileKind, SimulationState};
use crate::consts::*;

/// Apply contact damage from clouds.
///
/// Invincibility is re-read after every hit, so at most one hit lands per tick.
pub fn resolve_hazard_hits(state: &mut SimulationState) {
    for i in 0..state.hazards.len() {
        if !state.player.is_alive() || state.effects.is_invincible() || state.effects.is_ghost() {
            return;
        }
        let hazard_pos = state.hazards[i].pos;
        if !state.player.touches(hazard_pos, HAZARD_SIZE) {
            continue;
        }

        state.damage(HAZARD_DAMAGE);
        state.effects.set(Status::Invincible, HIT_INVINCIBLE_MS);
        state.events.push(GameEvent::HazardHit {
            hazard_id: state.hazards[i].id,
            health: state.health,
        });
        log::debug!("Cloud hit, health now {}", state.health);

        if state.health == 0 {
            state.player.kill();
            state.events.push(GameEvent::Died);
            log::info!("Moon Girl has fallen");
        }
    }
}

/// Consume thrown objects touching the player and apply their effects.
///
/// Every touching projectile is removed, including ones the Cloak blocked.
pub fn resolve_projectile_hits(state: &mut SimulationState) {
    let mut projectiles = std::mem::take(&mut state.projectiles);
    projectiles.retain(|p| {
        if !state.player.is_alive() || !state.player.touches(p.pos, p.size) {
            return true;
        }

        let blocked = state.effects.is_cloaked() && p.kind.blocked_by_cloak();
        if !blocked {
            apply_projectile(state, p.kind);
        }
        state.events.push(GameEvent::ProjectileHit {
            projectile_id: p.id,
            kind: p.kind,
            blocked,
        });
        false
    });
    state.projectiles = projectiles;
}

fn apply_projectile(state: &mut SimulationState, kind: ProjectileKind) {
    log::debug!("Caught {}", kind.as_str());
    match kind {
        ProjectileKind::HatterHat => {
            state.effects.set(Status::Slow, SLOW_MS);
            state.effects.set(Status::Cloak, CLOAK_MS);
        }
        ProjectileKind::CatBall => state.effects.set(Status::Ghost, GHOST_MS),
        ProjectileKind::RabbitWatch => state.effects.set(Status::Fast, FAST_MS),
        ProjectileKind::WhiteQueenRose => state.heal(HEAL_AMOUNT),
        ProjectileKind::RedQueenRose => {
            state.health = 0;
            state.player.kill();
            state.events.push(GameEvent::Died);
            log::info!("Off with her head! Moon Girl has fallen");
        }
        ProjectileKind::PlayingCard => {
            state.health = 0;
            state.effects.set(Status::Shrink, SHRINK_MS);
            state.player.carry_away();
            state.events.push(GameEvent::CarriedAway);
            log::info!("Moon Girl shrank and is being carried away");
        }
    }
}

/// While ghosted, clouds touching the player vanish without damage
pub fn phase_through_hazards(state: &mut SimulationState) {
    if !state.effects.is_ghost() {
        return;
    }
    let player = &state.player;
    let events = &mut state.events;
    state.hazards.retain(|h| {
        let touching = player.touches(h.pos, HAZARD_SIZE);
        if touching {
            events.push(GameEvent::HazardPhased { hazard_id: h.id });
        }
        !touching
    });
}

/// Drop clouds past the left edge and projectiles far outside the playfield
pub fn cull_offscreen(state: &mut SimulationState) {
    state.hazards.retain(|h| h.pos.x + HAZARD_SIZE > 0.0);

    let m = PROJECTILE_CULL_MARGIN;
    state.projectiles.retain(|p| {
        p.pos.x + p.size > -m
            && p.pos.x < PLAYFIELD_WIDTH + m
            && p.pos.y + p.size > -m
            && p.pos.y < PLAYFIELD_HEIGHT + m
    });
}
