//! Per-sample orientation correction
//!
//! Turns one raw driver sample into the fixed-point values that go into a
//! report: the orientation corrected by the mounting offset, and the angular
//! velocity in Q14 radians per second. Processing has no hidden state, so the
//! same sample always yields the same output.

use nalgebra::Vector3;

use crate::fixed::{ANGULAR_VELOCITY_Q_POINT, FixedQuaternion, QUATERNION_Q_POINT, quantize};
use crate::math::Vector3Ext;
use crate::offset::MountingOffset;
use crate::types::RawSensorSample;

/// Corrected orientation and angular velocity for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessedSample {
    /// Orientation after the mounting offset, in Q14
    pub orientation: FixedQuaternion,
    /// Angular velocity about x, y and z in Q14 radians per second
    pub angular_velocity: [i16; 3],
}

/// Convert angular velocity from deci-degrees per second to Q14 radians
///
/// Rates above 2 rad/s do not fit Q14 and wrap.
pub fn angular_velocity_to_fixed(angular_velocity: &Vector3<f32>) -> [i16; 3] {
    let radians = angular_velocity.decideg_to_rad();
    [
        quantize(radians.x, ANGULAR_VELOCITY_Q_POINT),
        quantize(radians.y, ANGULAR_VELOCITY_Q_POINT),
        quantize(radians.z, ANGULAR_VELOCITY_Q_POINT),
    ]
}

/// Applies the frozen mounting offset to driver samples
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SampleProcessor {
    offset: MountingOffset,
}

impl SampleProcessor {
    pub fn new(offset: MountingOffset) -> Self {
        Self { offset }
    }

    /// Mounting offset applied to every sample
    pub fn offset(&self) -> &MountingOffset {
        &self.offset
    }

    /// Correct one driver sample
    ///
    /// # Example
    /// ```
    /// use nalgebra::{Quaternion, Vector3};
    /// use tracker_3dof::{MountingOffset, OffsetFrame, RawSensorSample, SampleProcessor};
    ///
    /// let offset = MountingOffset::new(Vector3::new(90.0, 0.0, 0.0), OffsetFrame::Reference, 14);
    /// let processor = SampleProcessor::new(offset);
    ///
    /// let sample = RawSensorSample::new(Quaternion::identity(), Vector3::zeros());
    /// let out = processor.process(&sample);
    /// assert_eq!(out.orientation, offset.quaternion());
    /// ```
    pub fn process(&self, sample: &RawSensorSample) -> ProcessedSample {
        let rotation = FixedQuaternion::from_quaternion(&sample.rotation, QUATERNION_Q_POINT);

        ProcessedSample {
            orientation: self.offset.apply(&rotation),
            angular_velocity: angular_velocity_to_fixed(&sample.angular_velocity),
        }
    }
}
