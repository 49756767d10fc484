//! Shared test doubles for the integration tests
#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;

use nalgebra::{Quaternion, Vector3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use tracker_3dof::{
    CalibrationSensors, Clock, Command, FixedQuaternion, OutputReport, RawSensorSample,
    ReportSink, SensorConfig, SensorDriver, SerialSink, TareRequest,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Rejected,
}

/// Scripted sensor driver that records every call
#[derive(Debug, Default)]
pub struct MockDriver {
    /// One entry per poll; an empty queue means no sample
    pub polls: VecDeque<Option<RawSensorSample>>,
    pub configs: Vec<SensorConfig>,
    pub commands: Vec<Command>,
    pub tare_requests: Vec<TareRequest>,
    pub calibration_sensors: Vec<CalibrationSensors>,
    pub fail_configure: bool,
    pub fail_commands: bool,
}

impl MockDriver {
    pub fn with_samples<I: IntoIterator<Item = Option<RawSensorSample>>>(polls: I) -> Self {
        Self {
            polls: polls.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn push(&mut self, sample: Option<RawSensorSample>) {
        self.polls.push_back(sample);
    }

    fn command(&mut self, command: Command) -> Result<(), MockError> {
        self.commands.push(command);
        if self.fail_commands {
            Err(MockError::Rejected)
        } else {
            Ok(())
        }
    }
}

impl SensorDriver for MockDriver {
    type Error = MockError;

    fn configure(&mut self, config: &SensorConfig) -> Result<(), MockError> {
        if self.fail_configure {
            return Err(MockError::Rejected);
        }
        self.configs.push(*config);
        Ok(())
    }

    fn poll(&mut self) -> Option<RawSensorSample> {
        self.polls.pop_front().flatten()
    }

    fn tare(&mut self, request: TareRequest) -> Result<(), MockError> {
        self.tare_requests.push(request);
        self.command(Command::Tare)
    }

    fn save_calibration(&mut self) -> Result<(), MockError> {
        self.command(Command::SaveCalibration)
    }

    fn enable_calibration(&mut self, sensors: CalibrationSensors) -> Result<(), MockError> {
        self.calibration_sensors.push(sensors);
        self.command(Command::EnableCalibration)
    }

    fn clear_calibration(&mut self) -> Result<(), MockError> {
        self.command(Command::ClearCalibration)
    }
}

/// Report sink that keeps everything it receives
#[derive(Debug, Default)]
pub struct CaptureSink {
    pub reports: Vec<OutputReport>,
}

impl ReportSink for CaptureSink {
    fn send(&mut self, report: &OutputReport) {
        self.reports.push(*report);
    }
}

/// Serial sink that keeps the raw byte stream
#[derive(Debug, Default)]
pub struct CaptureSerial {
    pub bytes: Vec<u8>,
}

impl SerialSink for CaptureSerial {
    fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }
}

/// Manually advanced microsecond clock
#[derive(Debug, Default)]
pub struct FakeClock {
    now: Cell<u32>,
}

impl FakeClock {
    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }
}

impl Clock for FakeClock {
    fn now_us(&self) -> u32 {
        self.now.get()
    }
}

pub fn sample(rotation: Quaternion<f32>) -> RawSensorSample {
    RawSensorSample::new(rotation, Vector3::zeros())
}

pub fn level_sample() -> RawSensorSample {
    sample(Quaternion::identity())
}

/// Deterministic source of random unit quaternions
pub struct UnitQuaternions {
    rng: Pcg64,
}

impl UnitQuaternions {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    pub fn next_float(&mut self) -> Quaternion<f32> {
        loop {
            let q = Quaternion::new(
                self.rng.random_range(-1.0f32..1.0),
                self.rng.random_range(-1.0f32..1.0),
                self.rng.random_range(-1.0f32..1.0),
                self.rng.random_range(-1.0f32..1.0),
            );
            let norm = q.norm();
            if norm > 0.1 {
                return q / norm;
            }
        }
    }

    pub fn next_fixed(&mut self, q_point: u8) -> FixedQuaternion {
        FixedQuaternion::from_quaternion(&self.next_float(), q_point)
    }
}
