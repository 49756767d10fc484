//! Core types and settings for the tracker

use nalgebra::{Quaternion, Vector3};

use crate::driver::DriverSensorType;
use crate::error::ConfigError;
use crate::fixed::dequantize;

/// Euler angles `(x, y, z)` in degrees
pub type EulerAngles = Vector3<f32>;

/// Orientation-tracking mode requested by the host
///
/// Each mode selects exactly one sensor-hub output. Raw configuration codes
/// are mapped with [`SensorMode::try_from`], which rejects unknown codes
/// instead of leaving the sensor type unset.
///
/// # Example
/// ```
/// use tracker_3dof::{ConfigError, SensorMode};
///
/// assert_eq!(SensorMode::try_from(2), Ok(SensorMode::SimpleGravityReferencedOrientation));
/// assert_eq!(SensorMode::try_from(7), Err(ConfigError::UnsupportedSensorType(7)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum SensorMode {
    /// Stabilised orientation referenced to gravity only (no magnetometer)
    #[default]
    FilteredGravityReferencedOrientation = 0,
    /// Stabilised orientation referenced to gravity and magnetic north
    FilteredOrientation = 1,
    /// Unfiltered orientation referenced to gravity only
    SimpleGravityReferencedOrientation = 2,
    /// Orientation from accelerometer and magnetometer only
    SimpleGeomagneticReferencedOrientation = 3,
    /// High-rate gyro-integrated orientation without magnetometer
    SensorFusionNoMagnetometer = 4,
    /// High-rate gyro-integrated orientation with magnetometer
    SensorFusionWithMagnetometer = 5,
    /// Unfiltered orientation referenced to gravity and magnetic north
    SimpleOrientation = 6,
}

impl SensorMode {
    /// All supported modes, in code order
    pub const ALL: [SensorMode; 7] = [
        SensorMode::FilteredGravityReferencedOrientation,
        SensorMode::FilteredOrientation,
        SensorMode::SimpleGravityReferencedOrientation,
        SensorMode::SimpleGeomagneticReferencedOrientation,
        SensorMode::SensorFusionNoMagnetometer,
        SensorMode::SensorFusionWithMagnetometer,
        SensorMode::SimpleOrientation,
    ];

    /// Sensor-hub output backing this mode
    pub const fn sensor_type(self) -> DriverSensorType {
        match self {
            SensorMode::FilteredGravityReferencedOrientation => {
                DriverSensorType::ArVrStabilizedGameRotationVector
            }
            SensorMode::FilteredOrientation => DriverSensorType::ArVrStabilizedRotationVector,
            SensorMode::SimpleGravityReferencedOrientation => DriverSensorType::GameRotationVector,
            SensorMode::SimpleGeomagneticReferencedOrientation => {
                DriverSensorType::GeomagneticRotationVector
            }
            SensorMode::SensorFusionNoMagnetometer => {
                DriverSensorType::GyroIntegratedRotationVectorNoMag
            }
            SensorMode::SensorFusionWithMagnetometer => {
                DriverSensorType::GyroIntegratedRotationVectorWithMag
            }
            SensorMode::SimpleOrientation => DriverSensorType::RotationVector,
        }
    }
}

impl TryFrom<u8> for SensorMode {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        SensorMode::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(ConfigError::UnsupportedSensorType(code))
    }
}

/// Side on which the mounting offset multiplies each sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OffsetFrame {
    /// `offset ⊗ sample`: the offset rotates the reference frame
    #[default]
    Reference,
    /// `sample ⊗ offset`: the offset rotates the sensor body frame
    Sensor,
}

/// Tracker settings
///
/// Everything needed to configure the sensor and the report stream. Options
/// that used to be compile-time switches on the device are plain flags here.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use tracker_3dof::{SensorMode, TrackerSettings};
///
/// let settings = TrackerSettings {
///     sensor_mode: SensorMode::SensorFusionNoMagnetometer,
///     report_interval_us: 2_500,                      // 400 Hz
///     mounting_offset: Vector3::new(0.0, 0.0, 90.0), // degrees
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    /// Orientation output requested from the sensor hub
    pub sensor_mode: SensorMode,
    /// Sensor report interval in microseconds
    pub report_interval_us: u16,
    /// Prediction horizon for gyro-integrated outputs in seconds
    pub prediction_s: f32,
    /// Mounting-offset Euler angles in degrees
    pub mounting_offset: EulerAngles,
    /// Side on which the mounting offset is applied
    pub offset_frame: OffsetFrame,
    /// Mirror every report onto the serial stream
    pub mirror_serial: bool,
    /// Measure and log the period between reports
    pub measure_period: bool,
}

impl TrackerSettings {
    /// Check the settings before they reach the driver
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_interval_us == 0 {
            return Err(ConfigError::InvalidReportInterval);
        }
        Ok(())
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            sensor_mode: SensorMode::default(),
            report_interval_us: 5_000,
            prediction_s: 0.002,
            mounting_offset: EulerAngles::zeros(),
            offset_frame: OffsetFrame::default(),
            mirror_serial: true,
            measure_period: false,
        }
    }
}

/// One sample as delivered by the sensor driver
///
/// The rotation is a unit quaternion. Angular velocity is in the driver's
/// native unit, deci-degrees per second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawSensorSample {
    /// Orientation reported by the sensor hub
    pub rotation: Quaternion<f32>,
    /// Angular velocity about x, y and z in deci-degrees per second
    pub angular_velocity: Vector3<f32>,
}

impl RawSensorSample {
    pub fn new(rotation: Quaternion<f32>, angular_velocity: Vector3<f32>) -> Self {
        Self {
            rotation,
            angular_velocity,
        }
    }

    /// Build a sample from Q-format rotation words in `[real, i, j, k]` order
    ///
    /// # Example
    /// ```
    /// use nalgebra::Vector3;
    /// use tracker_3dof::RawSensorSample;
    ///
    /// let sample = RawSensorSample::from_fixed([16384, 0, 0, 0], 14, Vector3::zeros());
    /// assert_eq!(sample.rotation.w, 1.0);
    /// ```
    pub fn from_fixed(rotation: [i16; 4], q_point: u8, angular_velocity: Vector3<f32>) -> Self {
        let [real, i, j, k] = rotation;
        Self::new(
            Quaternion::new(
                dequantize(real, q_point),
                dequantize(i, q_point),
                dequantize(j, q_point),
                dequantize(k, q_point),
            ),
            angular_velocity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_maps_to_a_distinct_sensor_type() {
        for (code, mode) in SensorMode::ALL.iter().enumerate() {
            assert_eq!(SensorMode::try_from(code as u8), Ok(*mode));
            assert_eq!(*mode as u8, code as u8);
        }
        for (a, mode_a) in SensorMode::ALL.iter().enumerate() {
            for mode_b in SensorMode::ALL.iter().skip(a + 1) {
                assert_ne!(mode_a.sensor_type(), mode_b.sensor_type());
            }
        }
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        for code in 7..=u8::MAX {
            assert_eq!(
                SensorMode::try_from(code),
                Err(ConfigError::UnsupportedSensorType(code))
            );
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = TrackerSettings::default();
        assert_eq!(
            settings.sensor_mode,
            SensorMode::FilteredGravityReferencedOrientation
        );
        assert_eq!(settings.prediction_s, 0.002);
        assert_eq!(settings.mounting_offset, Vector3::zeros());
        assert!(settings.mirror_serial);
        assert!(!settings.measure_period);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let settings = TrackerSettings {
            report_interval_us: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidReportInterval));
    }

    #[test]
    fn test_sample_from_fixed_words() {
        let sample = RawSensorSample::from_fixed(
            [8192, -8192, 8192, -8192],
            14,
            Vector3::new(1.0, 2.0, 3.0),
        );
        assert_eq!(sample.rotation, Quaternion::new(0.5, -0.5, 0.5, -0.5));
        assert_eq!(sample.angular_velocity, Vector3::new(1.0, 2.0, 3.0));
    }
}
