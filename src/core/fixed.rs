//! Q16.16 Fixed-Point Arithmetic
//!
//! Deterministic fixed-point math for the simulation. All gameplay values
//! (positions, speeds, extents, probabilities) are Q16.16 integers; floats
//! exist only at the render boundary.
//!
//! ## Format: Q16.16
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Bit Layout: Q16.16 (32-bit signed integer)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  [S][IIIIIIIIIIIIIIII][FFFFFFFFFFFFFFFF]                    │
//! │   │  └──── 16 bits ────┘└──── 16 bits ────┘                 │
//! │   └─ Sign bit                                               │
//! │                                                             │
//! │  Range: -32768.0 to +32767.99998 (approx)                   │
//! │  Precision: 1/65536 ≈ 0.000015 units                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Plenty of range for a tiled arena a few dozen units across, with
//! sub-pixel precision and fast integer ops on every platform.

/// Q16.16 fixed-point number stored as i32.
/// 16 bits integer, 16 bits fractional.
pub type Fixed = i32;

/// Number of fractional bits (16)
pub const FIXED_SCALE: i32 = 16;

/// 1.0 in fixed-point (65536)
pub const FIXED_ONE: Fixed = 1 << FIXED_SCALE; // 65536

/// 0.5 in fixed-point (32768)
pub const FIXED_HALF: Fixed = FIXED_ONE >> 1; // 32768

// =============================================================================
// SIMULATION CONSTANTS (All as integer literals - NO float conversion!)
// =============================================================================

/// Default arena side length in tiles
pub const DEFAULT_MAP_SIZE: u32 = 20;

/// Default tile side length: 2.0 = 2 * 65536
pub const DEFAULT_TILE_SIZE: Fixed = 131072;

/// Default per-cell obstacle probability: ~0.15 = floor(0.15 * 65536)
pub const DEFAULT_OBSTACLE_CHANCE: Fixed = 9830;

/// Player half-width for collision queries: 0.5 * 65536
pub const PLAYER_HALF_EXTENT: Fixed = 32768;

/// Player movement per tick along one axis: ~0.15 = floor(0.15 * 65536)
pub const MOVE_SPEED: Fixed = 9830;

/// Projectile travel per tick: 0.5 * 65536
pub const PROJECTILE_SPEED: Fixed = 32768;

/// Accepted deviation of an aim direction's squared length from 1.0
/// (~0.01). Directions outside this band violate the caller contract and
/// are rejected at spawn.
pub const AIM_UNIT_TOLERANCE: Fixed = 655;

// =============================================================================
// CORE OPERATIONS (All deterministic, wrapping semantics)
// =============================================================================

/// Convert a compile-time float to fixed-point.
///
/// # Warning
/// Only use at compile-time or in tests. NEVER in the tick loop.
#[inline]
pub const fn to_fixed(f: f64) -> Fixed {
    (f * (FIXED_ONE as f64)) as Fixed
}

/// Convert fixed-point to float for display/rendering.
///
/// # Warning
/// Only use for visual output. NEVER feed the result back into game logic.
#[inline]
pub fn to_float(f: Fixed) -> f32 {
    f as f32 / FIXED_ONE as f32
}

/// Multiply two fixed-point numbers.
///
/// Uses an i64 intermediate to prevent overflow, then truncates.
#[inline]
pub fn fixed_mul(a: Fixed, b: Fixed) -> Fixed {
    let wide = (a as i64) * (b as i64);
    (wide >> FIXED_SCALE) as Fixed
}

/// Divide two fixed-point numbers.
///
/// Pre-shifts the numerator to maintain precision.
/// Returns 0 on divide-by-zero (deterministic, never panics).
#[inline]
pub fn fixed_div(a: Fixed, b: Fixed) -> Fixed {
    if b == 0 {
        return 0;
    }
    let wide = (a as i64) << FIXED_SCALE;
    (wide / b as i64) as Fixed
}

/// Square root using Newton-Raphson iteration.
///
/// Returns 0 for non-positive inputs. The initial guess comes from the
/// argument's bit length, so the fixed 6 iterations converge across the
/// whole Q16.16 range; the fixed count keeps the result identical on
/// every platform.
#[inline]
pub fn fixed_sqrt(x: Fixed) -> Fixed {
    if x <= 0 {
        return 0;
    }

    // 2^((bits + 16) / 2) is within a factor of two of the true root
    let bits = 32 - x.leading_zeros() as i32;
    let mut guess: Fixed = 1 << ((bits + 16) / 2).min(30);

    for _ in 0..6 {
        let div = fixed_div(x, guess);
        guess = (guess.wrapping_add(div)) >> 1;

        if guess == 0 {
            guess = 1;
        }
    }

    guess
}

/// Absolute value of a fixed-point number.
#[inline]
pub fn fixed_abs(x: Fixed) -> Fixed {
    if x < 0 {
        x.wrapping_neg()
    } else {
        x
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_constants() {
        assert_eq!(FIXED_ONE, 65536);
        assert_eq!(FIXED_HALF, 32768);
        assert_eq!(FIXED_SCALE, 16);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1.0), FIXED_ONE);
        assert_eq!(to_fixed(0.5), FIXED_HALF);
        assert_eq!(to_fixed(2.0), FIXED_ONE * 2);
        assert_eq!(to_fixed(-1.0), -FIXED_ONE);
    }

    #[test]
    fn test_simulation_constants() {
        assert_eq!(DEFAULT_TILE_SIZE, 2 * FIXED_ONE);
        assert_eq!(PLAYER_HALF_EXTENT, FIXED_HALF);
        assert_eq!(PROJECTILE_SPEED, FIXED_HALF);
        assert_eq!(MOVE_SPEED, to_fixed(0.15));
        assert_eq!(DEFAULT_OBSTACLE_CHANCE, to_fixed(0.15));
    }

    #[test]
    fn test_fixed_mul() {
        // 2.0 * 3.0 = 6.0
        assert_eq!(fixed_mul(to_fixed(2.0), to_fixed(3.0)), to_fixed(6.0));

        // 0.5 * 0.5 = 0.25
        assert_eq!(fixed_mul(FIXED_HALF, FIXED_HALF), to_fixed(0.25));

        // Negative: -2.0 * 3.0 = -6.0
        assert_eq!(fixed_mul(to_fixed(-2.0), to_fixed(3.0)), to_fixed(-6.0));
    }

    #[test]
    fn test_fixed_div() {
        // 6.0 / 2.0 = 3.0
        assert_eq!(fixed_div(to_fixed(6.0), to_fixed(2.0)), to_fixed(3.0));

        // 1.0 / 4.0 = 0.25
        assert_eq!(fixed_div(FIXED_ONE, to_fixed(4.0)), to_fixed(0.25));

        // Divide by zero returns 0
        assert_eq!(fixed_div(FIXED_ONE, 0), 0);
    }

    #[test]
    fn test_fixed_sqrt() {
        // sqrt(4.0) = 2.0
        let result = fixed_sqrt(to_fixed(4.0));
        assert!((result - to_fixed(2.0)).abs() < 100, "sqrt(4) should be ~2.0");

        // sqrt(1.0) = 1.0
        let result2 = fixed_sqrt(FIXED_ONE);
        assert!((result2 - FIXED_ONE).abs() < 100, "sqrt(1) should be ~1.0");

        assert_eq!(fixed_sqrt(0), 0);
        assert_eq!(fixed_sqrt(-FIXED_ONE), 0);
        assert!(fixed_sqrt(1) >= 0);
    }

    #[test]
    fn test_fixed_abs() {
        assert_eq!(fixed_abs(to_fixed(-3.5)), to_fixed(3.5));
        assert_eq!(fixed_abs(to_fixed(3.5)), to_fixed(3.5));
        assert_eq!(fixed_abs(0), 0);
    }

    #[test]
    fn test_fixed_determinism() {
        for _ in 0..1000 {
            let a = 12345678;
            let b = 87654321;

            assert_eq!(fixed_mul(a, b), fixed_mul(a, b));
            assert_eq!(fixed_div(a, b), fixed_div(a, b));
            assert_eq!(fixed_sqrt(a), fixed_sqrt(a));
        }
    }
}
