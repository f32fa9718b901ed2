//! World State Definitions
//!
//! The single owner of everything that lives across ticks: the generated
//! map, the player, the projectile collection and the queues the driver
//! fills between ticks. Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::fixed::{Fixed, FIXED_ONE, MOVE_SPEED, PROJECTILE_SPEED};
use crate::core::hash::{compute_state_hash, StateHash};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::events::GameEvent;
use crate::game::input::FireCommand;
use crate::game::map::{MapConfig, MapConfigError, Obstacle, TileMap};
use crate::game::projectile::Projectile;

/// Simulation parameters for a session.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Map generation parameters
    pub map: MapConfig,
    /// Player movement per tick along one axis
    pub move_speed: Fixed,
    /// Projectile travel per tick
    pub projectile_speed: Fixed,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            move_speed: MOVE_SPEED,
            projectile_speed: PROJECTILE_SPEED,
        }
    }
}

/// State of the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Current position in the ground plane
    pub position: FixedVec2,

    /// Unit facing direction; updated as an observable side effect of
    /// firing
    pub facing: FixedVec2,
}

impl PlayerState {
    /// Create a player at a spawn position, facing +z.
    pub fn new(position: FixedVec2) -> Self {
        Self {
            position,
            facing: FixedVec2::new(0, FIXED_ONE),
        }
    }

    /// Yaw angle for rendering (`atan2(facing.x, facing.z)`).
    ///
    /// Float output is render-boundary only.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.facing.yaw()
    }
}

/// Complete state of a session.
///
/// Owns the map, the player and the projectile collection exclusively; no
/// other component retains references across ticks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldState {
    /// Current tick (0 before the first `tick()` call)
    pub tick: u32,

    /// RNG seed (for verification and replays)
    pub rng_seed: u64,

    /// Deterministic RNG state
    #[serde(skip)]
    pub rng: DeterministicRng,

    /// The generated arena (read-only after construction)
    pub map: TileMap,

    /// The player
    pub player: PlayerState,

    /// Live projectiles (BTreeMap: sorted iteration, stable ids)
    pub projectiles: BTreeMap<u32, Projectile>,

    /// Next projectile id (monotonic counter, ids never reused)
    pub next_projectile_id: u32,

    /// Player movement per tick along one axis
    pub move_speed: Fixed,

    /// Projectile travel per tick
    pub projectile_speed: Fixed,

    /// Fire commands queued since the previous tick; drained atomically at
    /// the start of the next tick's projectile phase
    #[serde(skip)]
    pub pending_fire: Vec<FireCommand>,

    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl WorldState {
    /// Create a new session: validate the configuration, generate the map
    /// and spawn the player on the reserved center tile's origin.
    pub fn new(config: &SimConfig, rng_seed: u64) -> Result<Self, MapConfigError> {
        let mut rng = DeterministicRng::new(rng_seed);
        let map = TileMap::generate(&config.map, &mut rng)?;

        Ok(Self {
            tick: 0,
            rng_seed,
            rng,
            map,
            player: PlayerState::new(FixedVec2::ZERO),
            projectiles: BTreeMap::new(),
            next_projectile_id: 0,
            move_speed: config.move_speed,
            projectile_speed: config.projectile_speed,
            pending_fire: Vec::new(),
            pending_events: Vec::new(),
        })
    }

    /// Queue a fire event arriving between ticks.
    ///
    /// The command is applied at the start of the next tick's projectile
    /// phase; direction validation happens there.
    pub fn queue_fire(&mut self, direction: FixedVec2) {
        self.pending_fire.push(FireCommand { direction });
    }

    /// Drain the queued fire commands (consumes them).
    pub fn take_fire_commands(&mut self) -> Vec<FireCommand> {
        std::mem::take(&mut self.pending_fire)
    }

    /// Allocate a fresh projectile id.
    pub fn alloc_projectile_id(&mut self) -> u32 {
        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        id
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Push a simulation event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Read-only snapshot for the renderer.
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            player: self.player,
            player_yaw: self.player.yaw(),
            projectiles: self.projectiles.values().copied().collect(),
            obstacles: self.map.obstacles().to_vec(),
        }
    }

    /// Compute hash of current state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            hasher.update_vec2(self.player.position);
            hasher.update_vec2(self.player.facing);

            // Projectiles in sorted id order (BTreeMap guarantees this)
            hasher.update_u32(self.next_projectile_id);
            for (id, projectile) in &self.projectiles {
                hasher.update_u32(*id);
                hasher.update_vec2(projectile.position);
                hasher.update_vec2(projectile.velocity);
            }

            // Map layout (derived from the seed, hashed as a cross-check)
            hasher.update_u32(self.map.size());
            hasher.update_fixed(self.map.tile_size());
            for obstacle in self.map.obstacles() {
                hasher.update_vec2(obstacle.center);
                hasher.update_fixed(obstacle.half_extent);
            }
        })
    }
}

/// Per-tick read-only view handed to the (external) renderer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Tick this snapshot describes
    pub tick: u32,
    /// Player position and facing
    pub player: PlayerState,
    /// Player yaw in radians, derived from facing (render-boundary float)
    pub player_yaw: f32,
    /// Active projectiles in id order
    pub projectiles: Vec<Projectile>,
    /// The static obstacle set
    pub obstacles: Vec<Obstacle>,
}

// =============================================================================
// TESTS
// =============================================================================
