//! # Gridfire Simulation Core
//!
//! Deterministic top-down arena simulation: a player slides over a tiled
//! floor dotted with static box obstacles and fires projectiles toward
//! externally supplied aim directions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     GRIDFIRE CORE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/            - Deterministic primitives                 │
//! │  ├── fixed.rs     - Q16.16 fixed-point arithmetic            │
//! │  ├── vec2.rs      - Ground-plane (x, z) vector               │
//! │  ├── rng.rs       - Deterministic Xoroshiro128+ PRNG         │
//! │  └── hash.rs      - State hashing for replay verification    │
//! │                                                              │
//! │  game/            - Simulation logic (deterministic)         │
//! │  ├── map.rs       - Obstacle grid generation                 │
//! │  ├── collision.rs - Box overlap queries                      │
//! │  ├── input.rs     - Intent frames and replay recordings      │
//! │  ├── movement.rs  - Axis-separated sliding resolution        │
//! │  ├── projectile.rs- Projectile spawn/advance/removal         │
//! │  ├── state.rs     - World state and renderer snapshots       │
//! │  ├── tick.rs      - Frame orchestration                      │
//! │  └── events.rs    - Simulation events                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Everything under `core/` and `game/` is 100% deterministic:
//! - No floating-point arithmetic in simulation logic (floats appear only
//!   at the render boundary, e.g. yaw extraction)
//! - BTreeMap for projectile storage (sorted, stable iteration)
//! - No system time dependencies; the external driver calls [`game::tick::tick`]
//! - All randomness from the seeded PRNG in [`core::rng`]
//!
//! Given the same seed and input stream, a session replays to an identical
//! state hash on any platform.
//!
//! The core is a library, not a service: it owns no window, no input device
//! and no clock. Rendering, camera follow, pointer raycasting and key capture
//! are external collaborators that exchange plain data with the core.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use self::core::fixed::{Fixed, FIXED_HALF, FIXED_ONE, FIXED_SCALE};
pub use self::core::rng::DeterministicRng;
pub use self::core::vec2::FixedVec2;
pub use game::input::{FireCommand, InputRecording, IntentFrame};
pub use game::map::{MapConfig, MapConfigError, Obstacle, TileMap};
pub use game::state::{PlayerState, SimConfig, WorldSnapshot, WorldState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate the external driver is expected to run at (Hz)
pub const TICK_RATE: u32 = 60;
