#![no_std]

//! Tracker 3DOF - fixed-point orientation core for a head-tracker device
//!
//! This crate takes orientation samples from a sensor-hub driver, corrects
//! them by a fixed mounting-offset rotation and packs the result into a
//! 16-byte report for the host. The offset composition is pure 16/32-bit
//! integer arithmetic so it behaves identically on a microcontroller and on a
//! host.
//!
//! # Features
//!
//! - Q14 fixed-point quaternions with a bit-exact Hamilton product
//! - Mounting offset built once from Euler angles in degrees
//! - Sequence-numbered reports, deliverable to any number of transports
//! - Optional serial mirror of each report and report-period measurement
//! - Tare and calibration commands forwarded one per iteration, by priority
//! - `#![no_std]` compatible for embedded systems
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::{Quaternion, Vector3};
//! use tracker_3dof::{
//!     CalibrationSensors, CommandFlags, NoSerial, OutputReport, RawSensorSample, ReportSink,
//!     SensorConfig, SensorDriver, TareRequest, TrackerSession, TrackerSettings,
//! };
//!
//! // A driver that always has a level sample ready
//! struct Level;
//!
//! impl SensorDriver for Level {
//!     type Error = ();
//!     fn configure(&mut self, _: &SensorConfig) -> Result<(), ()> { Ok(()) }
//!     fn poll(&mut self) -> Option<RawSensorSample> {
//!         Some(RawSensorSample::new(Quaternion::identity(), Vector3::zeros()))
//!     }
//!     fn tare(&mut self, _: TareRequest) -> Result<(), ()> { Ok(()) }
//!     fn save_calibration(&mut self) -> Result<(), ()> { Ok(()) }
//!     fn enable_calibration(&mut self, _: CalibrationSensors) -> Result<(), ()> { Ok(()) }
//!     fn clear_calibration(&mut self) -> Result<(), ()> { Ok(()) }
//! }
//!
//! struct Hid(Option<OutputReport>);
//!
//! impl ReportSink for Hid {
//!     fn send(&mut self, report: &OutputReport) { self.0 = Some(*report); }
//! }
//!
//! let flags = CommandFlags::new();
//! let settings = TrackerSettings {
//!     mounting_offset: Vector3::new(0.0, 0.0, 90.0),
//!     ..Default::default()
//! };
//! let mut session = TrackerSession::new(Level, &flags, settings).unwrap();
//!
//! let mut hid = Hid(None);
//! assert!(session.loop_task(&mut hid, &mut NoSerial));
//!
//! let report = hid.0.unwrap();
//! assert_eq!(report.sequence(), 1);
//! assert_eq!(report.quaternion().components(), [11585, 0, 0, 11585]);
//! ```

pub mod command;
pub mod driver;
mod error;
pub mod fixed;
mod math;
pub mod offset;
pub mod period;
mod processor;
pub mod report;
mod session;
mod types;

// Flat re-exports for downstream firmware
pub use command::{Command, CommandFlags, dispatch};
pub use driver::{
    CalibrationSensors, DriverSensorType, SensorConfig, SensorDriver, TareAxes, TareBasis,
    TareRequest,
};
pub use error::{ConfigError, TrackerError};
pub use fixed::{
    ANGULAR_VELOCITY_Q_POINT, FixedQuaternion, QUATERNION_Q_POINT, compose, dequantize, quantize,
};
pub use math::{DECIDEG_TO_RAD, DEG_TO_RAD, Vector3Ext};
pub use offset::{MountingOffset, euler_to_float_quaternion, euler_to_quaternion};
pub use period::{Clock, NoClock, PeriodMeter};
pub use processor::{ProcessedSample, SampleProcessor, angular_velocity_to_fixed};
pub use report::{
    HID_REPORT_DESCRIPTOR, NoSerial, OutputReport, REPORT_LEN, REPORT_VERSION, ReportEncoder,
    ReportSink, SerialSink,
};
pub use session::TrackerSession;
pub use types::*;
