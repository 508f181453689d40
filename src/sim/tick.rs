//! Per-frame simulation tick
//!
//! One call advances the round by one frame: spawn → move intent → collide →
//! integrate → decay effects → evaluate.

use super::collision;
use super::input::InputState;
use super::motion;
use super::spawn;
use super::state::{GameEvent, RoundPhase, SimulationState};
use crate::consts::*;

/// Advance the round by one frame at wall-clock time `now_ms`.
///
/// Does nothing once the round has ended.
pub fn tick(state: &mut SimulationState, input: &InputState, now_ms: u64) {
    state.events.clear();
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;

    update_clock(state, now_ms);

    spawn::maybe_spawn(state, now_ms);
    motion::apply_intent(&mut state.player, input);

    collision::resolve_hazard_hits(state);
    collision::resolve_projectile_hits(state);
    collision::phase_through_hazards(state);

    motion::advance_hazards(&mut state.hazards, &state.effects);
    motion::advance_projectiles(&mut state.projectiles);
    collision::cull_offscreen(state);
    let exited = motion::advance_terminal(&mut state.player);

    // Fixed nominal step, not the real frame delta
    state.effects.tick(NOMINAL_FRAME_MS);

    evaluate_round(state, exited);
}

/// Recompute remaining time from the wall clock; never goes back up
pub fn update_clock(state: &mut SimulationState, now_ms: u64) {
    let elapsed = now_ms.saturating_sub(state.start_ms);
    let remaining = ROUND_BUDGET_MS.saturating_sub(elapsed);
    state.remaining_ms = remaining.min(state.remaining_ms);
}

/// Flip the round into a terminal phase if it has ended.
///
/// `player_exited` is true when a dead or carried-away player has left the
/// playfield this tick. Game over wins ties.
pub fn evaluate_round(state: &mut SimulationState, player_exited: bool) {
    if !state.is_running() {
        return;
    }

    if player_exited {
        state.phase = RoundPhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over after {} ticks ({}s left)",
            state.time_ticks,
            state.remaining_secs()
        );
    } else if state.remaining_ms == 0 && state.player.is_alive() {
        state.phase = RoundPhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Survived! Round won with {} health", state.health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::{spawn_hazard, spawn_projectile};
    use crate::sim::state::{HazardKind, ProjectileKind};
    use glam::Vec2;
    use proptest::prelude::*;

    /// Round with spawn protection cleared and the spawner just fired
    fn quiet_state() -> SimulationState {
        let mut state = SimulationState::new(12345, 0);
        state.effects.invincible = 0;
        state.last_spawn_ms = Some(0);
        state
    }

    fn on_player(state: &SimulationState) -> Vec2 {
        state.player.pos + Vec2::splat(10.0)
    }

    #[test]
    fn test_survive_full_round_wins() {
        let mut state = SimulationState::new(12345, 0);
        let input = InputState::default();
        tick(&mut state, &input, 0);
        assert!(state.is_running());
        assert_eq!(state.hazards.len(), 1);

        tick(&mut state, &input, 200_000);
        assert_eq!(state.remaining_ms, 0);
        assert_eq!(state.phase, RoundPhase::Won);
        assert!(state.is_win() && !state.is_running() && !state.is_game_over());
        assert_eq!(state.events.last(), Some(&GameEvent::Won));
    }

    #[test]
    fn test_hazard_death_then_fall_to_game_over() {
        let mut state = quiet_state();
        state.health = 20;
        let pos = on_player(&state);
        spawn_hazard(&mut state, HazardKind::Gray, pos);

        let input = InputState::default();
        let mut now = 16;
        tick(&mut state, &input, now);
        assert_eq!(state.health, 0);
        assert!(state.player.is_dead);
        assert_eq!(state.player.vel.y, 3.0);
        assert!(state.is_running());

        let mut game_overs = state
            .events
            .iter()
            .filter(|e| **e == GameEvent::GameOver)
            .count();
        let mut ticks = 1;
        while state.is_running() {
            now += 16;
            tick(&mut state, &input, now);
            game_overs += state
                .events
                .iter()
                .filter(|e| **e == GameEvent::GameOver)
                .count();
            ticks += 1;
            assert!(ticks < 100, "player never left the playfield");
        }
        // 400 + 3 * 67 = 601
        assert_eq!(ticks, 67);
        assert_eq!(game_overs, 1);
        assert!(state.is_game_over());
        assert!(state.player.pos.y > PLAYFIELD_HEIGHT);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let mut state = quiet_state();
        state.player.kill();
        state.player.pos.y = 599.0;
        spawn_hazard(&mut state, HazardKind::Gray, Vec2::new(500.0, 100.0));
        spawn_projectile(
            &mut state,
            ProjectileKind::CatBall,
            Vec2::new(700.0, 200.0),
            Vec2::new(-2.0, 0.0),
        );
        let input = InputState::default();
        tick(&mut state, &input, 16);
        assert!(state.is_game_over());

        let snapshot = (
            state.player.clone(),
            state.hazards.clone(),
            state.projectiles.clone(),
            state.effects.clone(),
            state.remaining_ms,
        );
        for now in [32, 1000, 500_000] {
            tick(&mut state, &input, now);
        }
        assert_eq!(
            snapshot,
            (
                state.player.clone(),
                state.hazards.clone(),
                state.projectiles.clone(),
                state.effects.clone(),
                state.remaining_ms,
            )
        );
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_carried_away_exits_left() {
        let mut state = quiet_state();
        let pos = on_player(&state);
        spawn_projectile(&mut state, ProjectileKind::PlayingCard, pos, Vec2::ZERO);
        let input = InputState {
            right: true,
            ..Default::default()
        };
        let mut now = 16;
        tick(&mut state, &input, now);
        assert!(state.player.is_carried_away);
        assert!(state.effects.is_shrunk());
        assert_eq!(state.health, 0);

        let x = state.player.pos.x;
        while state.is_running() {
            now += 16;
            tick(&mut state, &input, now);
        }
        assert!(state.is_game_over());
        assert!(state.player.pos.x + state.player.width < 0.0);
        // Held input never moved her once carried
        assert!(state.player.pos.x < x);
    }

    #[test]
    fn test_hat_then_immune_projectile() {
        let mut state = quiet_state();
        let pos = on_player(&state);
        spawn_projectile(&mut state, ProjectileKind::HatterHat, pos, Vec2::ZERO);
        let input = InputState::default();
        tick(&mut state, &input, 16);
        assert_eq!(state.effects.slow, SLOW_MS - NOMINAL_FRAME_MS);
        assert_eq!(state.effects.cloak, CLOAK_MS - NOMINAL_FRAME_MS);
        assert!(state.projectiles.is_empty());

        let health = state.health;
        let effects = state.effects.clone();
        let pos = on_player(&state);
        spawn_projectile(&mut state, ProjectileKind::CatBall, pos, Vec2::ZERO);
        tick(&mut state, &input, 32);
        assert_eq!(state.health, health);
        assert!(!state.effects.is_ghost());
        assert_eq!(state.effects.cloak, effects.cloak - NOMINAL_FRAME_MS);
        assert!(state.projectiles.is_empty());
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::ProjectileHit {
                kind: ProjectileKind::CatBall,
                blocked: true,
                ..
            }]
        ));
    }

    #[test]
    fn test_no_win_while_falling() {
        let mut state = quiet_state();
        state.player.kill();
        tick(&mut state, &InputState::default(), 250_000);
        assert_eq!(state.remaining_ms, 0);
        assert!(state.is_running());
    }

    #[test]
    fn test_move_intent_applied() {
        let mut state = quiet_state();
        let input = InputState {
            left: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16);
        assert_eq!(state.player.pos, Vec2::new(96.0, 396.0));
    }

    #[derive(Debug, Clone)]
    enum Contact {
        Cloud,
        Thrown(ProjectileKind),
    }

    fn contact_strategy() -> impl Strategy<Value = Contact> {
        prop_oneof![
            Just(Contact::Cloud),
            Just(Contact::Thrown(ProjectileKind::RedQueenRose)),
            Just(Contact::Thrown(ProjectileKind::WhiteQueenRose)),
            Just(Contact::Thrown(ProjectileKind::HatterHat)),
            Just(Contact::Thrown(ProjectileKind::CatBall)),
            Just(Contact::Thrown(ProjectileKind::RabbitWatch)),
            Just(Contact::Thrown(ProjectileKind::PlayingCard)),
        ]
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(
            contacts in prop::collection::vec((contact_strategy(), 1u64..400), 1..60)
        ) {
            let mut state = quiet_state();
            let input = InputState::default();
            let mut now = 0;
            for (contact, gap) in contacts {
                let pos = on_player(&state);
                match contact {
                    Contact::Cloud => {
                        spawn_hazard(&mut state, HazardKind::Gray, pos);
                    }
                    Contact::Thrown(kind) => {
                        spawn_projectile(&mut state, kind, pos, Vec2::ZERO);
                    }
                }
                now += gap;
                let was_dead = state.player.is_dead;
                tick(&mut state, &input, now);
                prop_assert!(state.health <= MAX_HEALTH);
                prop_assert!(!(state.player.is_dead && state.player.is_carried_away));
                if was_dead {
                    prop_assert_eq!(state.health, 0);
                }
            }
        }

        #[test]
        fn prop_remaining_time_never_increases(
            steps in prop::collection::vec(0u64..20_000, 1..40)
        ) {
            let mut state = SimulationState::new(7, 1_000);
            let input = InputState::default();
            let mut now = 1_000;
            let mut last = state.remaining_ms;
            for step in steps {
                now += step;
                tick(&mut state, &input, now);
                prop_assert!(state.remaining_ms <= last);
                prop_assert!(state.remaining_ms <= ROUND_BUDGET_MS);
                last = state.remaining_ms;
                if state.is_win() {
                    prop_assert_eq!(state.remaining_ms, 0);
                }
            }
        }
    }
}
