//! Axis-Separated Sliding Resolution
//!
//! A requested displacement is resolved one axis at a time: the x component
//! is tested and committed first, then the z component is tested from the
//! possibly-updated position. A diagonal push into a wall therefore drops
//! only the blocked axis and the player slides along the face instead of
//! stopping dead.
//!
//! The x-before-z order, and deriving the z candidate from the updated x,
//! are deliberate tie-breaks; changing either changes corner behavior.

use crate::core::fixed::{Fixed, PLAYER_HALF_EXTENT};
use crate::core::vec2::FixedVec2;
use crate::game::input::IntentFrame;
use crate::game::map::TileMap;

/// Displacement requested by an intent frame at the given per-axis speed.
///
/// Thin forwarding wrapper so callers resolve movement without touching
/// the input module directly.
#[inline]
pub fn intent_delta(frame: &IntentFrame, speed: Fixed) -> FixedVec2 {
    frame.move_delta(speed)
}

/// Resolve a requested displacement into a collision-safe position.
///
/// Each axis candidate is accepted only if the player probe stays clear of
/// every obstacle; a blocked axis keeps its current coordinate. If both
/// axes are blocked the position is returned unchanged, which also makes
/// the resolution idempotent under repeated identical input.
pub fn resolve_slide(map: &TileMap, current: FixedVec2, delta: FixedVec2) -> FixedVec2 {
    let mut position = current;

    // Try x alone
    let candidate_x = FixedVec2::new(position.x.wrapping_add(delta.x), position.z);
    if !map.collides(candidate_x, PLAYER_HALF_EXTENT) {
        position.x = candidate_x.x;
    }

    // Try z alone, from the possibly-updated x
    let candidate_z = FixedVec2::new(position.x, position.z.wrapping_add(delta.z));
    if !map.collides(candidate_z, PLAYER_HALF_EXTENT) {
        position.z = candidate_z.z;
    }

    position
}

// =============================================================================
// TESTS
// =============================================================================
