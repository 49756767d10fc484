//! Boundary to the external sensor-hub driver
//!
//! The driver owns the bus, the sensor's own fusion and its calibration store.
//! The tracker only configures it, polls it once per loop iteration and
//! forwards commands to it.

use bitflags::bitflags;

use crate::types::RawSensorSample;

/// Sensor-hub orientation outputs
///
/// Values of [`DriverSensorType::report_id`] are the SH-2 report IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverSensorType {
    RotationVector,
    GameRotationVector,
    GeomagneticRotationVector,
    ArVrStabilizedRotationVector,
    ArVrStabilizedGameRotationVector,
    GyroIntegratedRotationVectorNoMag,
    GyroIntegratedRotationVectorWithMag,
}

impl DriverSensorType {
    /// SH-2 report ID for this output
    pub const fn report_id(self) -> u8 {
        match self {
            DriverSensorType::RotationVector => 0x05,
            DriverSensorType::GameRotationVector => 0x08,
            DriverSensorType::GeomagneticRotationVector => 0x09,
            DriverSensorType::ArVrStabilizedRotationVector => 0x28,
            DriverSensorType::ArVrStabilizedGameRotationVector => 0x29,
            DriverSensorType::GyroIntegratedRotationVectorNoMag
            | DriverSensorType::GyroIntegratedRotationVectorWithMag => 0x2A,
        }
    }

    /// Whether the output fuses the magnetometer
    pub const fn uses_magnetometer(self) -> bool {
        matches!(
            self,
            DriverSensorType::RotationVector
                | DriverSensorType::GeomagneticRotationVector
                | DriverSensorType::ArVrStabilizedRotationVector
                | DriverSensorType::GyroIntegratedRotationVectorWithMag
        )
    }
}

/// Configuration written to the sensor at setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    pub sensor_type: DriverSensorType,
    /// Report interval in microseconds
    pub report_interval_us: u16,
    /// Prediction horizon for gyro-integrated outputs in seconds
    pub prediction_s: f32,
}

bitflags! {
    /// Axes zeroed by a tare
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TareAxes: u8 {
        const X = 0b001;
        const Y = 0b010;
        const Z = 0b100;
    }
}

bitflags! {
    /// Sensors whose dynamic calibration is switched on
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CalibrationSensors: u8 {
        const ACCELEROMETER = 0b001;
        const GYROSCOPE = 0b010;
        const MAGNETOMETER = 0b100;
    }
}

/// Output used as the reference when taring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TareBasis {
    #[default]
    RotationVector = 0,
    GameRotationVector = 1,
    GeomagneticRotationVector = 2,
    GyroIntegratedRotationVector = 3,
    ArVrStabilizedRotationVector = 4,
    ArVrStabilizedGameRotationVector = 5,
}

/// Tare command arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TareRequest {
    pub axes: TareAxes,
    pub basis: TareBasis,
    /// Keep the tare across sensor resets
    pub persist: bool,
}

impl Default for TareRequest {
    /// All axes against the rotation vector, not persisted
    fn default() -> Self {
        Self {
            axes: TareAxes::all(),
            basis: TareBasis::RotationVector,
            persist: false,
        }
    }
}

/// Sensor-hub driver used by the tracker
///
/// Implementations must not block in [`SensorDriver::poll`]; waiting for the
/// hardware shows up as `None`.
pub trait SensorDriver {
    type Error: core::fmt::Debug;

    /// Write the sensor configuration
    fn configure(&mut self, config: &SensorConfig) -> Result<(), Self::Error>;

    /// Return the next sample if one arrived since the last poll
    fn poll(&mut self) -> Option<RawSensorSample>;

    /// Zero the current orientation
    fn tare(&mut self, request: TareRequest) -> Result<(), Self::Error>;

    /// Persist the dynamic calibration data
    fn save_calibration(&mut self) -> Result<(), Self::Error>;

    /// Enable dynamic calibration for the given sensors
    fn enable_calibration(&mut self, sensors: CalibrationSensors) -> Result<(), Self::Error>;

    /// Discard the dynamic calibration data
    fn clear_calibration(&mut self) -> Result<(), Self::Error>;
}
