//! Game state and core simulation types
//!
//! Everything a tick mutates lives in `GameState`. The level and config are
//! shared read-only; the entity list and viewpoint belong to the simulation.

use std::sync::Arc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::MAX_HEALTH;
use crate::level::{Cell, Level};
use crate::settings::Config;

/// Session outcome state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Active gameplay
    Playing,
    /// Every pickup collected
    Victory,
    /// Health ran out
    Defeat,
}

impl SessionState {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, SessionState::Playing)
    }
}

/// The player's camera and stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    /// Position in grid units
    pub pos: Vec2,
    /// Heading (radians, unbounded; only differences matter)
    pub heading: f32,
    /// Health in [0, MAX_HEALTH]
    pub health: i32,
    pub pickups_collected: u32,
}

impl Viewpoint {
    pub fn new(pos: Vec2, heading: f32) -> Self {
        Self {
            pos,
            heading,
            health: MAX_HEALTH,
            pickups_collected: 0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Entity-specific data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    /// Collectible; heals on pickup
    Pickup,
    /// Chases the viewpoint and deals contact damage
    Adversary { speed: f32, heading: f32 },
}

/// A positioned world object
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub active: bool,
    /// Projection scale at distance 1
    pub base_scale: f32,
    /// Where the entity spawned (restored on reset)
    pub spawn: Vec2,
}

impl Entity {
    #[inline]
    pub fn is_pickup(&self) -> bool {
        matches!(self.kind, EntityKind::Pickup)
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PickupCollected { id: u32, collected: u32, total: u32 },
    DamageTaken { by: u32, health: i32 },
    Victory,
    Defeat,
    Reset,
}

/// Build the entity list for a level, rolling adversary headings from `rng`
pub fn spawn_entities(level: &Level, config: &Config, rng: &mut Pcg32) -> Vec<Entity> {
    level
        .spawns()
        .zip(1u32..)
        .map(|((cell, pos), id)| {
            let (kind, base_scale) = match cell {
                Cell::AdversarySpawn => (
                    EntityKind::Adversary {
                        speed: config.adversary_speed,
                        heading: rng.random_range(0.0..std::f32::consts::TAU),
                    },
                    config.adversary_scale,
                ),
                _ => (EntityKind::Pickup, config.pickup_scale),
            };
            Entity {
                id,
                kind,
                pos,
                active: true,
                base_scale,
                spawn: pos,
            }
        })
        .collect()
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Adversary heading source, re-seeded on reset
    rng: Pcg32,
    pub(crate) level: Arc<Level>,
    pub(crate) config: Config,
    pub session: SessionState,
    pub viewpoint: Viewpoint,
    /// Entities in spawn order (stable id order)
    pub entities: Vec<Entity>,
    pub total_pickups: u32,
    /// Simulation tick counter (ticks actually simulated)
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session on `level` with the given seed
    pub fn new(level: Arc<Level>, config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let entities = spawn_entities(&level, &config, &mut rng);
        let total_pickups = entities.iter().filter(|e| e.is_pickup()).count() as u32;
        let viewpoint = Viewpoint::new(level.start(), level.start_heading());
        Self {
            seed,
            rng,
            level,
            config,
            session: SessionState::Playing,
            viewpoint,
            entities,
            total_pickups,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return to the start of the session: same seed, same spawns
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.entities = spawn_entities(&self.level, &self.config, &mut self.rng);
        self.viewpoint = Viewpoint::new(self.level.start(), self.level.start_heading());
        self.session = SessionState::Playing;
        self.time_ticks = 0;
        self.events.push(GameEvent::Reset);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Active entities with their index into `entities`
    pub fn active_entities(&self) -> impl Iterator<Item = (usize, &Entity)> {
        self.entities.iter().enumerate().filter(|(_, e)| e.active)
    }
}
