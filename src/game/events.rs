//! Simulation Events
//!
//! Events generated during a tick, drained by the driver for logging and
//! replay comparison.

use serde::{Deserialize, Serialize};

use crate::core::vec2::FixedVec2;

/// Why a projectile left the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum RemovalReason {
    /// Tight overlap with an obstacle
    HitObstacle = 0,
    /// Crossed the arena boundary
    OutOfBounds = 1,
}

/// Event payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A projectile entered the simulation
    ProjectileSpawned {
        /// Stable projectile id (never reused)
        id: u32,
        /// Spawn position (the player's position at fire time)
        position: FixedVec2,
        /// Unit aim direction
        direction: FixedVec2,
    },

    /// A projectile left the simulation (terminal, exactly once per id)
    ProjectileRemoved {
        /// Id of the removed projectile
        id: u32,
        /// Position at removal
        position: FixedVec2,
        /// Collision or bounds exit
        reason: RemovalReason,
    },
}

/// A simulation event with its tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u32,
    /// Event payload
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a projectile-spawned event.
    pub fn projectile_spawned(
        tick: u32,
        id: u32,
        position: FixedVec2,
        direction: FixedVec2,
    ) -> Self {
        Self {
            tick,
            data: GameEventData::ProjectileSpawned {
                id,
                position,
                direction,
            },
        }
    }

    /// Create a projectile-removed event.
    pub fn projectile_removed(
        tick: u32,
        id: u32,
        position: FixedVec2,
        reason: RemovalReason,
    ) -> Self {
        Self {
            tick,
            data: GameEventData::ProjectileRemoved {
                id,
                position,
                reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::FIXED_ONE;

    #[test]
    fn test_event_constructors() {
        let direction = FixedVec2::new(FIXED_ONE, 0);
        let spawned = GameEvent::projectile_spawned(3, 0, FixedVec2::ZERO, direction);
        assert_eq!(spawned.tick, 3);
        assert!(matches!(
            spawned.data,
            GameEventData::ProjectileSpawned { id: 0, .. }
        ));

        let removed =
            GameEvent::projectile_removed(9, 0, FixedVec2::ZERO, RemovalReason::OutOfBounds);
        assert!(matches!(
            removed.data,
            GameEventData::ProjectileRemoved {
                reason: RemovalReason::OutOfBounds,
                ..
            }
        ));
    }
}
