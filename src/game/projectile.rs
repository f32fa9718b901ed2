//! Projectile Lifecycle
//!
//! Spawn, per-tick advance, removal. Projectiles live in the world's
//! BTreeMap under stable, never-reused ids; removal deletes the entry and
//! is terminal. There is no projectile-to-projectile interaction, so
//! iteration order cannot affect the outcome (it is id-sorted anyway).

use serde::{Deserialize, Serialize};

use crate::core::fixed::{fixed_abs, AIM_UNIT_TOLERANCE};
use crate::core::vec2::FixedVec2;
use crate::game::events::{GameEvent, RemovalReason};
use crate::game::state::WorldState;

/// A live projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    /// Stable id (monotonic, never reused)
    pub id: u32,

    /// Current position in the ground plane
    pub position: FixedVec2,

    /// Travel per tick (aim direction times projectile speed)
    pub velocity: FixedVec2,
}

/// Spawn a projectile from the player's position toward `direction`.
///
/// `direction` must be a unit vector in the ground plane, computed
/// externally (pointer-to-ground raycast is outside the core). A zero or
/// non-unit direction is a caller contract violation: nothing is spawned,
/// no state changes, and `None` is returned.
///
/// On success the player's facing snaps to the aim direction — the
/// observable side effect of firing — and a `ProjectileSpawned` event is
/// emitted.
pub fn spawn(state: &mut WorldState, direction: FixedVec2) -> Option<u32> {
    if !direction.is_unit(AIM_UNIT_TOLERANCE) {
        return None;
    }

    state.player.facing = direction;

    let id = state.alloc_projectile_id();
    let projectile = Projectile {
        id,
        position: state.player.position,
        velocity: direction.scale(state.projectile_speed),
    };

    state.push_event(GameEvent::projectile_spawned(
        state.tick,
        id,
        projectile.position,
        direction,
    ));
    state.projectiles.insert(id, projectile);

    Some(id)
}

/// Advance every live projectile by one tick, then evaluate removal.
///
/// Removal-by-collision uses the tight probe (`half_extent = 0`);
/// removal-by-bounds triggers once `|x|` or `|z|` exceeds the map's bounds
/// extent. A removed projectile is deleted immediately and permanently,
/// with exactly one `ProjectileRemoved` event.
pub fn advance(state: &mut WorldState) {
    let bounds = state.map.bounds_extent();
    let mut removals: Vec<(u32, FixedVec2, RemovalReason)> = Vec::new();

    for (id, projectile) in state.projectiles.iter_mut() {
        projectile.position = projectile.position.add(projectile.velocity);

        if state.map.collides(projectile.position, 0) {
            removals.push((*id, projectile.position, RemovalReason::HitObstacle));
        } else if fixed_abs(projectile.position.x) > bounds
            || fixed_abs(projectile.position.z) > bounds
        {
            removals.push((*id, projectile.position, RemovalReason::OutOfBounds));
        }
    }

    for (id, position, reason) in removals {
        state.projectiles.remove(&id);
        state.push_event(GameEvent::projectile_removed(state.tick, id, position, reason));
    }
}

// =============================================================================
// TESTS
// =============================================================================
