//! Obstacle Grid Generation
//!
//! Builds the static obstacle set once at startup. Every grid cell gets one
//! independent Bernoulli trial; the cell at the grid's logical center is
//! kept clear as the reserved spawn tile. Obstacles never move or disappear
//! for the lifetime of a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::fixed::{
    Fixed, DEFAULT_MAP_SIZE, DEFAULT_OBSTACLE_CHANCE, DEFAULT_TILE_SIZE, FIXED_ONE, FIXED_SCALE,
};
use crate::core::rng::DeterministicRng;
use crate::core::vec2::FixedVec2;
use crate::game::collision;

/// Map generation parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    /// Arena side length in tiles
    pub size: u32,
    /// Tile side length in world units (Fixed)
    pub tile_size: Fixed,
    /// Per-cell obstacle probability in [0, FIXED_ONE]
    pub obstacle_chance: Fixed,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_MAP_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            obstacle_chance: DEFAULT_OBSTACLE_CHANCE,
        }
    }
}

/// Rejected map parameters.
///
/// Raised before any Obstacle is created; a world is never built from a
/// bad configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapConfigError {
    /// Grid must have at least one tile per side.
    #[error("map size must be positive")]
    ZeroSize,

    /// Tiles must have positive area.
    #[error("tile size must be positive, got {0}")]
    NonPositiveTileSize(Fixed),

    /// Probability outside [0, 1].
    #[error("obstacle chance {0} outside [0, 1]")]
    ChanceOutOfRange(Fixed),

    /// Arena would not fit the Q16.16 coordinate range.
    #[error("map of {size} tiles x {tile_size} units exceeds coordinate range")]
    MapTooLarge {
        /// Requested tiles per side
        size: u32,
        /// Requested tile side length
        tile_size: Fixed,
    },
}

impl MapConfig {
    /// Validate the parameters without generating anything.
    pub fn validate(&self) -> Result<(), MapConfigError> {
        if self.size == 0 {
            return Err(MapConfigError::ZeroSize);
        }
        if self.tile_size <= 0 {
            return Err(MapConfigError::NonPositiveTileSize(self.tile_size));
        }
        if self.obstacle_chance < 0 || self.obstacle_chance > FIXED_ONE {
            return Err(MapConfigError::ChanceOutOfRange(self.obstacle_chance));
        }

        // Both the floor's half-width and the bounds extent (== size in
        // world units) must stay inside the Q16.16 range.
        let half_width = (self.size as i64) * (self.tile_size as i64) / 2;
        if half_width > i32::MAX as i64 || self.size as i64 > (i32::MAX >> FIXED_SCALE) as i64 {
            return Err(MapConfigError::MapTooLarge {
                size: self.size,
                tile_size: self.tile_size,
            });
        }

        Ok(())
    }
}

/// Static axis-aligned box blocking player and projectile motion.
///
/// Created once by map generation; never mutated or destroyed during a
/// session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Center, aligned to the tile-center lattice
    pub center: FixedVec2,
    /// Half the tile side length
    pub half_extent: Fixed,
}

/// The generated arena: floor dimensions plus the immutable obstacle set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TileMap {
    size: u32,
    tile_size: Fixed,
    bounds_extent: Fixed,
    obstacles: Vec<Obstacle>,
}

impl TileMap {
    /// Generate a map from validated parameters and a seeded RNG.
    ///
    /// One Bernoulli trial is drawn for EVERY cell, including the center
    /// cell (whose draw is discarded), so the RNG stream position never
    /// depends on which cells end up excluded. Zero or many obstacles are
    /// both acceptable outcomes; there are no retries.
    pub fn generate(
        config: &MapConfig,
        rng: &mut DeterministicRng,
    ) -> Result<Self, MapConfigError> {
        config.validate()?;

        let size = config.size;
        let tile_size = config.tile_size;
        let half_extent = tile_size / 2;
        let center_cell = (size / 2, size / 2);

        let mut obstacles = Vec::new();
        for x in 0..size {
            for z in 0..size {
                let occupied = rng.next_bool(config.obstacle_chance);
                if occupied && (x, z) != center_cell {
                    obstacles.push(Obstacle {
                        center: cell_center(size, tile_size, x, z),
                        half_extent,
                    });
                }
            }
        }

        Ok(Self {
            size,
            tile_size,
            // The projectile removal boundary sits at `size` world units
            // from the origin (the floor's half-width at the default tile
            // size of 2).
            bounds_extent: (size as i32) << FIXED_SCALE,
            obstacles,
        })
    }

    /// Tiles per side.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Tile side length in world units.
    pub fn tile_size(&self) -> Fixed {
        self.tile_size
    }

    /// Distance from the origin beyond which projectiles are discarded.
    pub fn bounds_extent(&self) -> Fixed {
        self.bounds_extent
    }

    /// The generated obstacle set.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The reserved spawn cell at the grid's logical center.
    pub fn center_cell(&self) -> (u32, u32) {
        (self.size / 2, self.size / 2)
    }

    /// World-space center of a grid cell.
    pub fn cell_center(&self, x: u32, z: u32) -> FixedVec2 {
        cell_center(self.size, self.tile_size, x, z)
    }

    /// Test a point with the given probe half-extent against the obstacle
    /// set. `half_extent = 0` is the tight (projectile) mode.
    pub fn collides(&self, point: FixedVec2, half_extent: Fixed) -> bool {
        collision::collides(&self.obstacles, point, half_extent)
    }

    /// Inject a hand-placed obstacle for scenario tests.
    #[cfg(test)]
    pub(crate) fn push_obstacle_for_test(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }
}

/// Lattice position of cell `(x, z)`: the grid is centered on the origin
/// and obstacle centers sit half a tile into each cell.
fn cell_center(size: u32, tile_size: Fixed, x: u32, z: u32) -> FixedVec2 {
    let half_tile = tile_size / 2;
    let offset_x = x as i64 - (size / 2) as i64;
    let offset_z = z as i64 - (size / 2) as i64;
    FixedVec2::new(
        (offset_x * tile_size as i64 + half_tile as i64) as Fixed,
        (offset_z * tile_size as i64 + half_tile as i64) as Fixed,
    )
}

// =============================================================================
// TESTS
// =============================================================================
