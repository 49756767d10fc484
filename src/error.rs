//! Error types for tracker setup

/// Configuration rejected before anything is sent to the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported sensor type selection: {0}")]
    UnsupportedSensorType(u8),

    #[error("report interval must be non-zero")]
    InvalidReportInterval,

    #[error("report period measurement requires a clock")]
    PeriodMeasurementNeedsClock,
}

/// Errors raised while bringing up a tracker session
///
/// `E` is the sensor driver's own error type.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError<E: core::fmt::Debug> {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("sensor driver rejected configuration: {0:?}")]
    Driver(E),
}
