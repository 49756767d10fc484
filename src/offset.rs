//! Mounting-offset rotation for the tracker
//!
//! The sensor is rarely glued to the tracked object in its reference pose. The
//! mounting offset is a fixed rotation, configured as three Euler angles in
//! degrees, that is applied to every orientation sample before it is reported.
//! It is built once in floating point and then frozen in fixed point, so
//! composing it with each sample is pure integer arithmetic.

use nalgebra::Quaternion;

use crate::fixed::{FixedQuaternion, compose};
use crate::math::{Vector3Ext, half_angle};
use crate::types::{EulerAngles, OffsetFrame};

/// Convert Euler angles in degrees to a floating-point unit quaternion
///
/// The rotation is built as `q_y ⊗ q_z ⊗ q_x`: the Y angle is the heading,
/// Z the attitude and X the bank.
pub fn euler_to_float_quaternion(euler: &EulerAngles) -> Quaternion<f32> {
    let radians = euler.deg_to_rad();

    let (s1, c1) = half_angle(radians.y);
    let (s2, c2) = half_angle(radians.z);
    let (s3, c3) = half_angle(radians.x);

    Quaternion::new(
        c1 * c2 * c3 - s1 * s2 * s3,
        s1 * s2 * c3 + c1 * c2 * s3,
        s1 * c2 * c3 + c1 * s2 * s3,
        c1 * s2 * c3 - s1 * c2 * s3,
    )
}

/// Convert Euler angles in degrees to a fixed-point quaternion
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use tracker_3dof::euler_to_quaternion;
///
/// let q = euler_to_quaternion(&Vector3::new(90.0, 0.0, 0.0), 14);
/// assert_eq!(q.components(), [11585, 11585, 0, 0]);
/// ```
pub fn euler_to_quaternion(euler: &EulerAngles, q_point: u8) -> FixedQuaternion {
    FixedQuaternion::from_quaternion(&euler_to_float_quaternion(euler), q_point)
}

/// Frozen mounting-offset rotation
///
/// Owned by the tracker session, written once at setup and read on every
/// sample afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountingOffset {
    euler: EulerAngles,
    quaternion: FixedQuaternion,
    frame: OffsetFrame,
}

impl MountingOffset {
    /// Build the offset rotation from Euler angles in degrees
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use tracker_3dof::{MountingOffset, OffsetFrame};
    ///
    /// let offset = MountingOffset::new(Vector3::zeros(), OffsetFrame::Reference, 14);
    /// assert_eq!(offset.quaternion().components(), [16384, 0, 0, 0]);
    /// ```
    pub fn new(euler: EulerAngles, frame: OffsetFrame, q_point: u8) -> Self {
        Self {
            euler,
            quaternion: euler_to_quaternion(&euler, q_point),
            frame,
        }
    }

    /// Configured Euler angles in degrees
    pub fn euler(&self) -> EulerAngles {
        self.euler
    }

    /// Fixed-point offset rotation
    pub fn quaternion(&self) -> FixedQuaternion {
        self.quaternion
    }

    /// Side on which the offset multiplies each sample
    pub fn frame(&self) -> OffsetFrame {
        self.frame
    }

    /// Apply the offset to one fixed-point orientation sample
    pub fn apply(&self, sample: &FixedQuaternion) -> FixedQuaternion {
        let q_point = self.quaternion.q_point;
        match self.frame {
            OffsetFrame::Reference => compose(&self.quaternion, sample, q_point),
            OffsetFrame::Sensor => compose(sample, &self.quaternion, q_point),
        }
    }
}

impl Default for MountingOffset {
    fn default() -> Self {
        Self::new(
            EulerAngles::zeros(),
            OffsetFrame::default(),
            crate::fixed::QUATERNION_Q_POINT,
        )
    }
}
