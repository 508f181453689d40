//! Round state and core simulation types
//!
//! Everything the simulation mutates lives in [`SimulationState`]; nothing is
//! global. Entities are created fresh at round start and never outlive a round.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::StatusEffects;
use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Simulation advancing every tick
    Running,
    /// Player survived until the timer ran out
    Won,
    /// Player fell off the bottom or was carried off the left edge
    GameOver,
}

/// Something notable that happened during a tick (cleared every tick)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A cloud hit the player
    HazardHit { hazard_id: u32, health: u8 },
    /// A thrown object reached the player; `blocked` if the Cloak stopped it
    ProjectileHit {
        projectile_id: u32,
        kind: ProjectileKind,
        blocked: bool,
    },
    /// A cloud dissolved against a ghosted player
    HazardPhased { hazard_id: u32 },
    Died,
    CarriedAway,
    Won,
    GameOver,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Only used on the terminal tracks (falling or carried away)
    pub vel: Vec2,
    pub is_dead: bool,
    pub is_carried_away: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            width: PLAYER_SIZE,
            height: PLAYER_SIZE,
            vel: Vec2::ZERO,
            is_dead: false,
            is_carried_away: false,
        }
    }
}

impl Player {
    /// Neither dead nor carried away
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead && !self.is_carried_away
    }

    /// Start falling; terminal
    pub fn kill(&mut self) {
        self.is_dead = true;
        self.vel = Vec2::new(0.0, FALL_SPEED);
    }

    /// Start drifting off to the left; terminal
    pub fn carry_away(&mut self) {
        self.is_carried_away = true;
        self.vel = Vec2::new(CARRY_SPEED, 0.0);
    }

    /// Overlap test against a square entity box
    #[inline]
    pub fn touches(&self, pos: Vec2, size: f32) -> bool {
        crate::boxes_overlap(self.pos, self.width, self.height, pos, size)
    }
}

/// Cloud kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Gray,
    Beige,
    Cat,
    Hatter,
    PlayingCards,
    Rabbit,
    RedQueen,
    WhiteQueen,
}

impl HazardKind {
    pub const ALL: [HazardKind; 8] = [
        HazardKind::Gray,
        HazardKind::Beige,
        HazardKind::Cat,
        HazardKind::Hatter,
        HazardKind::PlayingCards,
        HazardKind::Rabbit,
        HazardKind::RedQueen,
        HazardKind::WhiteQueen,
    ];

    /// The object this cloud throws when it spawns, if any
    pub fn thrown(self) -> Option<ProjectileKind> {
        match self {
            HazardKind::Gray | HazardKind::Beige => None,
            HazardKind::Cat => Some(ProjectileKind::CatBall),
            HazardKind::Hatter => Some(ProjectileKind::HatterHat),
            HazardKind::PlayingCards => Some(ProjectileKind::PlayingCard),
            HazardKind::Rabbit => Some(ProjectileKind::RabbitWatch),
            HazardKind::RedQueen => Some(ProjectileKind::RedQueenRose),
            HazardKind::WhiteQueen => Some(ProjectileKind::WhiteQueenRose),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Gray => "gray",
            HazardKind::Beige => "beige",
            HazardKind::Cat => "cat",
            HazardKind::Hatter => "hatter",
            HazardKind::PlayingCards => "playingcards",
            HazardKind::Rabbit => "rabbit",
            HazardKind::RedQueen => "redqueen",
            HazardKind::WhiteQueen => "whitequeen",
        }
    }
}

/// Thrown object kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Kills the player outright
    RedQueenRose,
    /// Heals
    WhiteQueenRose,
    /// Slow + Cloak
    HatterHat,
    /// Ghost
    CatBall,
    /// Fast
    RabbitWatch,
    /// Shrinks the player, who is then carried away
    PlayingCard,
}

impl ProjectileKind {
    /// Kinds that have no effect while Cloak is active
    pub const CLOAK_IMMUNE: [ProjectileKind; 4] = [
        ProjectileKind::RedQueenRose,
        ProjectileKind::PlayingCard,
        ProjectileKind::CatBall,
        ProjectileKind::RabbitWatch,
    ];

    pub fn blocked_by_cloak(self) -> bool {
        Self::CLOAK_IMMUNE.contains(&self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectileKind::RedQueenRose => "red-queen-rose",
            ProjectileKind::WhiteQueenRose => "white-queen-rose",
            ProjectileKind::HatterHat => "hatter-hat",
            ProjectileKind::CatBall => "cat-ball",
            ProjectileKind::RabbitWatch => "rabbit-watch",
            ProjectileKind::PlayingCard => "playing-card",
        }
    }
}

/// A drifting cloud
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec2,
    /// Leftward pixels per tick before the Fast multiplier
    pub speed: f32,
}

/// A thrown object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
}

/// Complete simulation state for one round
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Spawn RNG; keeps running across restarts so rounds differ
    pub rng: Pcg32,
    pub health: u8,
    /// Wall-clock time the round started
    pub start_ms: u64,
    /// Time left, recomputed from the wall clock every tick
    pub remaining_ms: u64,
    /// `None` until the first spawn of the round
    pub last_spawn_ms: Option<u64>,
    pub phase: RoundPhase,
    /// Ticks simulated this round
    pub time_ticks: u64,
    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub projectiles: Vec<Projectile>,
    pub effects: StatusEffects,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl SimulationState {
    /// Create a running round with the given seed, starting at `now_ms`
    pub fn new(seed: u64, now_ms: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            health: MAX_HEALTH,
            start_ms: now_ms,
            remaining_ms: ROUND_BUDGET_MS,
            last_spawn_ms: None,
            phase: RoundPhase::Running,
            time_ticks: 0,
            player: Player::default(),
            hazards: Vec::new(),
            projectiles: Vec::new(),
            effects: StatusEffects::default(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset(now_ms);
        state
    }

    /// Reinitialize every round value; the RNG stream continues
    pub fn reset(&mut self, now_ms: u64) {
        self.health = MAX_HEALTH;
        self.start_ms = now_ms;
        self.remaining_ms = ROUND_BUDGET_MS;
        self.last_spawn_ms = None;
        self.phase = RoundPhase::Running;
        self.time_ticks = 0;
        self.player = Player::default();
        self.hazards.clear();
        self.projectiles.clear();
        self.effects = StatusEffects::default();
        self.effects.invincible = START_INVINCIBLE_MS;
        self.events.clear();
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == RoundPhase::GameOver
    }

    pub fn is_win(&self) -> bool {
        self.phase == RoundPhase::Won
    }

    /// Remaining time in whole seconds, as shown on the HUD
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms / 1000
    }

    /// Subtract damage, saturating at zero
    pub fn damage(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Add health, capped at [`MAX_HEALTH`]
    pub fn heal(&mut self, amount: u8) {
        self.health = self.health.saturating_add(amount).min(MAX_HEALTH);
    }
}
