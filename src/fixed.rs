//! Fixed-point quaternion primitives
//!
//! All values are 16-bit two's-complement numbers with a shared count of
//! fractional bits (the Q-point). A Q14 value `n` represents `n / 2^14`, so a
//! unit quaternion component in `[-1, 1]` fits with one bit of headroom.
//!
//! Nothing in this module checks its inputs at runtime. Values outside the
//! representable range wrap silently; callers are expected to feed unit
//! quaternions in the agreed Q-point.

use nalgebra::Quaternion;

/// Q-point used for orientation quaternions
pub const QUATERNION_Q_POINT: u8 = 14;

/// Q-point used for angular velocity in radians per second
pub const ANGULAR_VELOCITY_Q_POINT: u8 = 14;

#[inline]
fn scale(q_point: u8) -> f32 {
    debug_assert!(q_point < 16, "Q-point {} does not fit a 16-bit word", q_point);
    (1u32 << q_point) as f32
}

/// Quantize a real number to a Q-format 16-bit integer
///
/// Computes `round(value * 2^q_point)` and wraps the result to 16 bits.
/// Out-of-range values are not clamped: `quantize(1.0, 15)` yields `-32768`.
///
/// # Example
/// ```
/// use tracker_3dof::quantize;
///
/// assert_eq!(quantize(0.5, 14), 8192);
/// assert_eq!(quantize(-1.0, 14), -16384);
/// ```
#[inline]
pub fn quantize(value: f32, q_point: u8) -> i16 {
    let scaled = libm::roundf(value * scale(q_point));
    // f32 -> i32 saturates, i32 -> i16 wraps
    (scaled as i32) as i16
}

/// Convert a Q-format 16-bit integer back to a real number
#[inline]
pub fn dequantize(value: i16, q_point: u8) -> f32 {
    f32::from(value) / scale(q_point)
}

/// Quaternion with four fixed-point components sharing one Q-point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedQuaternion {
    pub real: i16,
    pub i: i16,
    pub j: i16,
    pub k: i16,
    /// Number of fractional bits shared by all four components
    pub q_point: u8,
}

impl FixedQuaternion {
    pub const fn new(real: i16, i: i16, j: i16, k: i16, q_point: u8) -> Self {
        Self {
            real,
            i,
            j,
            k,
            q_point,
        }
    }

    /// Zero rotation in the given Q-point
    pub fn identity(q_point: u8) -> Self {
        Self::new(quantize(1.0, q_point), 0, 0, 0, q_point)
    }

    /// Quantize every component of a floating-point quaternion
    pub fn from_quaternion(quaternion: &Quaternion<f32>, q_point: u8) -> Self {
        Self::new(
            quantize(quaternion.w, q_point),
            quantize(quaternion.i, q_point),
            quantize(quaternion.j, q_point),
            quantize(quaternion.k, q_point),
            q_point,
        )
    }

    /// Floating-point view of this quaternion
    pub fn to_quaternion(&self) -> Quaternion<f32> {
        Quaternion::new(
            dequantize(self.real, self.q_point),
            dequantize(self.i, self.q_point),
            dequantize(self.j, self.q_point),
            dequantize(self.k, self.q_point),
        )
    }

    /// Components in `[real, i, j, k]` order
    pub fn components(&self) -> [i16; 4] {
        [self.real, self.i, self.j, self.k]
    }

    /// Hamilton product `self ⊗ rhs` in this quaternion's Q-point
    pub fn compose(&self, rhs: &Self) -> Self {
        compose(self, rhs, self.q_point)
    }
}

/// One Hamilton-product term: widen, multiply, then arithmetic shift
#[inline(always)]
fn term(a: i16, b: i16, q_point: u8) -> i32 {
    // `>>` on i32 is sign-preserving; do not replace with an unsigned shift.
    (i32::from(a) * i32::from(b)) >> q_point
}

/// Hamilton product `lhs ⊗ rhs` in integer arithmetic
///
/// Every product of two Q-point values occupies up to 30 bits plus sign and is
/// shifted right by `q_point` before the four terms of a component are
/// combined. The terms are combined left to right in the order below; changing
/// either the shift placement or the operand pairing changes the rounding of
/// the result, so this layout is part of the function's contract:
///
/// ```text
/// real = (w·w) - (i·i) - (j·j) - (k·k)
/// i    = (w·i) + (i·w) + (j·k) - (k·j)
/// j    = (w·j) - (i·k) + (j·w) + (k·i)
/// k    = (w·k) + (i·j) - (j·i) + (k·w)
/// ```
///
/// where each `(a·b)` is `(lhs.a * rhs.b) >> q_point`. The shifted sums are
/// narrowed to 16 bits with two's-complement wrapping.
///
/// # Example
/// ```
/// use tracker_3dof::{FixedQuaternion, compose};
///
/// let i = FixedQuaternion::new(0, 16384, 0, 0, 14);
/// let j = FixedQuaternion::new(0, 0, 16384, 0, 14);
/// // i ⊗ j = k
/// assert_eq!(compose(&i, &j, 14), FixedQuaternion::new(0, 0, 0, 16384, 14));
/// ```
pub fn compose(lhs: &FixedQuaternion, rhs: &FixedQuaternion, q_point: u8) -> FixedQuaternion {
    debug_assert_eq!(lhs.q_point, q_point);
    debug_assert_eq!(rhs.q_point, q_point);

    let real = term(lhs.real, rhs.real, q_point)
        .wrapping_sub(term(lhs.i, rhs.i, q_point))
        .wrapping_sub(term(lhs.j, rhs.j, q_point))
        .wrapping_sub(term(lhs.k, rhs.k, q_point));

    let i = term(lhs.real, rhs.i, q_point)
        .wrapping_add(term(lhs.i, rhs.real, q_point))
        .wrapping_add(term(lhs.j, rhs.k, q_point))
        .wrapping_sub(term(lhs.k, rhs.j, q_point));

    let j = term(lhs.real, rhs.j, q_point)
        .wrapping_sub(term(lhs.i, rhs.k, q_point))
        .wrapping_add(term(lhs.j, rhs.real, q_point))
        .wrapping_add(term(lhs.k, rhs.i, q_point));

    let k = term(lhs.real, rhs.k, q_point)
        .wrapping_add(term(lhs.i, rhs.j, q_point))
        .wrapping_sub(term(lhs.j, rhs.i, q_point))
        .wrapping_add(term(lhs.k, rhs.real, q_point));

    FixedQuaternion::new(real as i16, i as i16, j as i16, k as i16, q_point)
}
