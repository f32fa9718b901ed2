//! Obstacle Collision Queries
//!
//! Axis-aligned box overlap against the static obstacle set. Two probe
//! modes share one entry point: tight (`half_extent = 0`, projectiles) and
//! player (`half_extent = PLAYER_HALF_EXTENT`).
//!
//! The scan is linear in the obstacle count, which is plenty at arena
//! scale; callers only see the slice-in/bool-out contract, so a spatial
//! index can replace the scan without touching them.

use crate::core::fixed::Fixed;
use crate::core::vec2::FixedVec2;
use crate::game::map::Obstacle;

/// Check whether a probe square overlaps one obstacle.
///
/// Overlap requires the per-axis center distance to be strictly below the
/// combined half-extents on BOTH axes; touching edges do not collide.
#[inline]
pub fn overlaps(point: FixedVec2, half_extent: Fixed, obstacle: &Obstacle) -> bool {
    let (dx, dz) = point.axis_distances(obstacle.center);
    let range = obstacle.half_extent + half_extent;
    dx < range && dz < range
}

/// Test a point with the given probe half-extent against an obstacle set.
pub fn collides(obstacles: &[Obstacle], point: FixedVec2, half_extent: Fixed) -> bool {
    obstacles
        .iter()
        .any(|obstacle| overlaps(point, half_extent, obstacle))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::{to_fixed, PLAYER_HALF_EXTENT};
    use proptest::prelude::*;

    fn obstacle_at(x: f64, z: f64, half_extent: f64) -> Obstacle {
        Obstacle {
            center: FixedVec2::new(to_fixed(x), to_fixed(z)),
            half_extent: to_fixed(half_extent),
        }
    }

    #[test]
    fn test_tight_overlap() {
        let obstacle = obstacle_at(2.0, 2.0, 1.0);

        // Inside on both axes
        assert!(overlaps(
            FixedVec2::new(to_fixed(2.5), to_fixed(1.5)),
            0,
            &obstacle
        ));

        // Outside on one axis only
        assert!(!overlaps(
            FixedVec2::new(to_fixed(4.5), to_fixed(2.0)),
            0,
            &obstacle
        ));
        assert!(!overlaps(
            FixedVec2::new(to_fixed(2.0), to_fixed(-0.5)),
            0,
            &obstacle
        ));
    }

    #[test]
    fn test_boundary_is_strict() {
        let obstacle = obstacle_at(2.0, 2.0, 1.0);

        // Exactly on the combined-extent boundary: NOT a collision
        assert!(!overlaps(
            FixedVec2::new(to_fixed(3.0), to_fixed(2.0)),
            0,
            &obstacle
        ));
        assert!(!overlaps(
            FixedVec2::new(to_fixed(3.5), to_fixed(2.0)),
            PLAYER_HALF_EXTENT,
            &obstacle
        ));

        // One ulp inside the boundary: collision
        assert!(overlaps(
            FixedVec2::new(to_fixed(3.0) - 1, to_fixed(2.0)),
            0,
            &obstacle
        ));
        assert!(overlaps(
            FixedVec2::new(to_fixed(3.5) - 1, to_fixed(2.0)),
            PLAYER_HALF_EXTENT,
            &obstacle
        ));
    }

    #[test]
    fn test_player_probe_widens_range() {
        let obstacle = obstacle_at(2.0, 2.0, 1.0);
        let point = FixedVec2::new(to_fixed(3.2), to_fixed(2.0));

        // Clear for a projectile, blocked for the player
        assert!(!overlaps(point, 0, &obstacle));
        assert!(overlaps(point, PLAYER_HALF_EXTENT, &obstacle));
    }

    #[test]
    fn test_collides_scans_whole_set() {
        let obstacles = vec![obstacle_at(-4.0, 0.0, 1.0), obstacle_at(4.0, 0.0, 1.0)];

        assert!(collides(
            &obstacles,
            FixedVec2::new(to_fixed(4.2), 0),
            0
        ));
        assert!(collides(
            &obstacles,
            FixedVec2::new(to_fixed(-4.2), 0),
            0
        ));
        assert!(!collides(&obstacles, FixedVec2::ZERO, 0));
        assert!(!collides(&[], FixedVec2::ZERO, PLAYER_HALF_EXTENT));
    }

    proptest! {
        // Overlap holds exactly when both axis distances are strictly
        // inside the combined range.
        #[test]
        fn prop_overlap_matches_axis_ranges(
            cx in -1000i32..1000,
            cz in -1000i32..1000,
            px in -2000i32..2000,
            pz in -2000i32..2000,
            obstacle_extent in 1i32..200,
            probe_extent in 0i32..200,
        ) {
            // Work in raw fixed units scaled up a little for spread
            let obstacle = Obstacle {
                center: FixedVec2::new(cx << 8, cz << 8),
                half_extent: obstacle_extent << 8,
            };
            let point = FixedVec2::new(px << 8, pz << 8);

            let (dx, dz) = point.axis_distances(obstacle.center);
            let range = obstacle.half_extent + (probe_extent << 8);
            let expected = dx < range && dz < range;

            prop_assert_eq!(overlaps(point, probe_extent << 8, &obstacle), expected);
        }
    }
}
