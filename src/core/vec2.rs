//! Ground-Plane 2D Vector
//!
//! Positions and velocities live in the horizontal plane, addressed as
//! `(x, z)` to match the arena's floor. All components are Q16.16
//! fixed-point; the vertical axis does not exist in the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use super::fixed::{fixed_abs, fixed_div, fixed_mul, fixed_sqrt, to_float, Fixed, FIXED_ONE};

/// 2D ground-plane vector with fixed-point components.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FixedVec2 {
    /// X component (Q16.16 fixed-point)
    pub x: Fixed,
    /// Z component (Q16.16 fixed-point)
    pub z: Fixed,
}

impl FixedVec2 {
    /// Zero vector
    pub const ZERO: Self = Self { x: 0, z: 0 };

    /// Create a new vector from fixed-point components.
    #[inline]
    pub const fn new(x: Fixed, z: Fixed) -> Self {
        Self { x, z }
    }

    /// Create a vector from integer components.
    #[inline]
    pub const fn from_ints(x: i32, z: i32) -> Self {
        Self {
            x: x << super::fixed::FIXED_SCALE,
            z: z << super::fixed::FIXED_SCALE,
        }
    }

    /// Add another vector.
    #[inline]
    pub fn add(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_add(other.x),
            z: self.z.wrapping_add(other.z),
        }
    }

    /// Subtract another vector.
    #[inline]
    pub fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.wrapping_sub(other.x),
            z: self.z.wrapping_sub(other.z),
        }
    }

    /// Scale by a fixed-point scalar.
    #[inline]
    pub fn scale(self, scalar: Fixed) -> Self {
        Self {
            x: fixed_mul(self.x, scalar),
            z: fixed_mul(self.z, scalar),
        }
    }

    /// Squared length (avoids sqrt - prefer this for comparisons).
    #[inline]
    pub fn length_squared(self) -> Fixed {
        fixed_mul(self.x, self.x).wrapping_add(fixed_mul(self.z, self.z))
    }

    /// Length (magnitude). Prefer `length_squared` when possible.
    #[inline]
    pub fn length(self) -> Fixed {
        fixed_sqrt(self.length_squared())
    }

    /// Normalize to unit length.
    /// Returns ZERO if length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0 {
            return Self::ZERO;
        }
        Self {
            x: fixed_div(self.x, len),
            z: fixed_div(self.z, len),
        }
    }

    /// Per-axis absolute distance to another point.
    ///
    /// This is the quantity the box-overlap test compares against combined
    /// half-extents, one axis at a time.
    #[inline]
    pub fn axis_distances(self, other: Self) -> (Fixed, Fixed) {
        (
            fixed_abs(self.x.wrapping_sub(other.x)),
            fixed_abs(self.z.wrapping_sub(other.z)),
        )
    }

    /// Check whether this is (approximately) a unit vector.
    ///
    /// `tolerance` bounds the deviation of the squared length from 1.0.
    #[inline]
    pub fn is_unit(self, tolerance: Fixed) -> bool {
        fixed_abs(self.length_squared().wrapping_sub(FIXED_ONE)) <= tolerance
    }

    /// Convert to float tuple for rendering.
    #[inline]
    pub fn to_floats(self) -> (f32, f32) {
        (to_float(self.x), to_float(self.z))
    }

    /// Yaw angle of this direction for rendering, as `atan2(x, z)`.
    ///
    /// Float output is render-boundary only; never feed it back into the
    /// simulation.
    #[inline]
    pub fn yaw(self) -> f32 {
        let (fx, fz) = self.to_floats();
        fx.atan2(fz)
    }
}

// Operator overloads for ergonomics
impl Add for FixedVec2 {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add(rhs)
    }
}

impl Sub for FixedVec2 {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.sub(rhs)
    }
}

impl fmt::Debug for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fz) = self.to_floats();
        write!(f, "Vec2({:.3}, {:.3})", fx, fz)
    }
}

impl fmt::Display for FixedVec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (fx, fz) = self.to_floats();
        write!(f, "({:.3}, {:.3})", fx, fz)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixed::to_fixed;

    #[test]
    fn test_vec2_add_sub() {
        let a = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        let b = FixedVec2::new(to_fixed(1.0), to_fixed(2.0));

        let sum = a + b;
        assert_eq!(sum.x, to_fixed(4.0));
        assert_eq!(sum.z, to_fixed(6.0));

        let diff = a - b;
        assert_eq!(diff.x, to_fixed(2.0));
        assert_eq!(diff.z, to_fixed(2.0));
    }

    #[test]
    fn test_vec2_scale() {
        let v = FixedVec2::new(to_fixed(2.0), to_fixed(3.0));
        let result = v.scale(to_fixed(2.0));
        assert_eq!(result.x, to_fixed(4.0));
        assert_eq!(result.z, to_fixed(6.0));
    }

    #[test]
    fn test_vec2_length() {
        // 3-4-5 triangle
        let v = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        assert_eq!(v.length_squared(), to_fixed(25.0));

        let len = v.length();
        assert!((len - to_fixed(5.0)).abs() < 200, "Length should be ~5.0");
    }

    #[test]
    fn test_vec2_normalize() {
        let v = FixedVec2::new(to_fixed(3.0), to_fixed(4.0));
        let norm = v.normalize();

        let len = norm.length();
        assert!(
            (len - FIXED_ONE).abs() < 200,
            "Normalized length should be ~1.0"
        );

        // Zero vector normalizes to zero
        assert_eq!(FixedVec2::ZERO.normalize(), FixedVec2::ZERO);
    }

    #[test]
    fn test_vec2_axis_distances() {
        let a = FixedVec2::new(to_fixed(1.0), to_fixed(-2.0));
        let b = FixedVec2::new(to_fixed(4.0), to_fixed(2.0));

        let (dx, dz) = a.axis_distances(b);
        assert_eq!(dx, to_fixed(3.0));
        assert_eq!(dz, to_fixed(4.0));

        // Symmetric
        assert_eq!(b.axis_distances(a), (dx, dz));
    }

    #[test]
    fn test_vec2_is_unit() {
        let tolerance = to_fixed(0.01);

        let axis = FixedVec2::new(FIXED_ONE, 0);
        assert!(axis.is_unit(tolerance));

        let diagonal = FixedVec2::new(to_fixed(1.0), to_fixed(1.0)).normalize();
        assert!(diagonal.is_unit(tolerance));

        assert!(!FixedVec2::ZERO.is_unit(tolerance));
        assert!(!FixedVec2::new(to_fixed(2.0), 0).is_unit(tolerance));
    }

    #[test]
    fn test_vec2_yaw() {
        // Facing +Z is yaw 0; facing +X is yaw pi/2
        let forward = FixedVec2::new(0, FIXED_ONE);
        assert!(forward.yaw().abs() < 1e-3);

        let right = FixedVec2::new(FIXED_ONE, 0);
        assert!((right.yaw() - std::f32::consts::FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn test_vec2_determinism() {
        let a = FixedVec2::new(12345678, 87654321);
        let b = FixedVec2::new(11111111, 22222222);

        for _ in 0..1000 {
            assert_eq!(a + b, a + b);
            assert_eq!(a.length(), a.length());
        }
    }
}
