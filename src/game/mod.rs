//! Simulation Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `map`: obstacle grid generation and bounds
//! - `collision`: box overlap queries against the obstacle set
//! - `input`: intent frames, fire commands, replay recordings
//! - `movement`: axis-separated sliding resolution
//! - `projectile`: projectile spawn/advance/removal lifecycle
//! - `state`: world state, player state, renderer snapshots
//! - `tick`: frame orchestration and recording playback
//! - `events`: simulation events for logging/replay

pub mod collision;
pub mod events;
pub mod input;
pub mod map;
pub mod movement;
pub mod projectile;
pub mod state;
pub mod tick;

// Re-export key types
pub use events::{GameEvent, GameEventData, RemovalReason};
pub use input::{FireCommand, InputDelta, InputRecording, IntentFrame};
pub use map::{MapConfig, MapConfigError, Obstacle, TileMap};
pub use projectile::Projectile;
pub use state::{PlayerState, SimConfig, WorldSnapshot, WorldState};
pub use tick::TickResult;
