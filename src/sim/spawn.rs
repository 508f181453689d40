//! Cloud and projectile spawning

use glam::Vec2;
use rand::Rng;

use super::effects::{Status, StatusEffects};
use super::state::{Hazard, HazardKind, Projectile, ProjectileKind, SimulationState};
use crate::consts::*;

/// Spawn cadence overrides, checked in order; first active status wins
pub const SPAWN_INTERVALS: [(Status, u64); 2] = [
    (Status::Slow, SPAWN_INTERVAL_SLOW_MS),
    (Status::Fast, SPAWN_INTERVAL_FAST_MS),
];

/// Current time between cloud spawns
pub fn spawn_interval_ms(effects: &StatusEffects) -> u64 {
    SPAWN_INTERVALS
        .iter()
        .find(|(status, _)| effects.is_active(*status))
        .map(|(_, interval)| *interval)
        .unwrap_or(SPAWN_INTERVAL_MS)
}

/// Spawn a cloud (and its thrown object) if the interval has elapsed.
///
/// Returns true if something was spawned.
pub fn maybe_spawn(state: &mut SimulationState, now_ms: u64) -> bool {
    if !state.player.is_alive() {
        return false;
    }

    let interval = spawn_interval_ms(&state.effects);
    let due = match state.last_spawn_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) > interval,
    };
    if !due {
        return false;
    }

    let kind = HazardKind::ALL[state.rng.random_range(0..HazardKind::ALL.len())];
    let y = state.rng.random_range(0.0..HAZARD_SPAWN_Y_MAX);
    spawn_hazard(state, kind, Vec2::new(PLAYFIELD_WIDTH, y));

    if let Some(thrown) = kind.thrown() {
        let y = state
            .rng
            .random_range(PROJECTILE_SPAWN_Y_MIN..PROJECTILE_SPAWN_Y_MAX);
        let angle = state.rng.random_range(0.0..PROJECTILE_MAX_ANGLE);
        let speed = state
            .rng
            .random_range(PROJECTILE_MIN_SPEED..PROJECTILE_MAX_SPEED);
        let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        spawn_projectile(state, thrown, Vec2::new(PLAYFIELD_WIDTH, y), vel);
    }

    state.last_spawn_ms = Some(now_ms);
    true
}

/// Add a cloud at `pos` moving at the default speed
pub fn spawn_hazard(state: &mut SimulationState, kind: HazardKind, pos: Vec2) -> u32 {
    let id = state.next_entity_id();
    state.hazards.push(Hazard {
        id,
        kind,
        pos,
        speed: HAZARD_SPEED,
    });
    log::debug!("Spawned {} cloud #{} at y={:.0}", kind.as_str(), id, pos.y);
    id
}

/// Add a thrown object at `pos` with a fixed velocity
pub fn spawn_projectile(
    state: &mut SimulationState,
    kind: ProjectileKind,
    pos: Vec2,
    vel: Vec2,
) -> u32 {
    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        kind,
        pos,
        vel,
        size: PROJECTILE_SIZE,
    });
    log::debug!("Spawned {} #{} vel=({:.2}, {:.2})", kind.as_str(), id, vel.x, vel.y);
    id
}
