use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nalgebra::{Quaternion, Vector3};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::f32::consts::PI;
use tracker_3dof::{
    CalibrationSensors, Command, CommandFlags, FixedQuaternion, MountingOffset, NoSerial,
    OffsetFrame, OutputReport, ProcessedSample, QUATERNION_Q_POINT, RawSensorSample,
    ReportEncoder, ReportSink, SampleProcessor, SensorConfig, SensorDriver, TareRequest,
    TrackerSession, TrackerSettings, compose, euler_to_quaternion,
};

// Pre-generated head motion so the RNG stays out of the measured loop
struct PreGeneratedSamples {
    samples: Vec<RawSensorSample>,
    index: usize,
}

impl PreGeneratedSamples {
    fn new(count: usize, seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            let time = i as f32 * 0.0025; // 400Hz report rate
            let phase = time * 0.5 * 2.0 * PI;

            // Slow yaw sweep with a little nodding
            let yaw = 0.6 * phase.sin() + rng.random_range(-0.002..0.002);
            let pitch = 0.2 * (phase * 1.3).cos() + rng.random_range(-0.002..0.002);
            let rotation = Quaternion::from_parts(
                (0.5 * yaw).cos() * (0.5 * pitch).cos(),
                Vector3::new(
                    -(0.5 * yaw).sin() * (0.5 * pitch).sin(),
                    (0.5 * yaw).cos() * (0.5 * pitch).sin(),
                    (0.5 * yaw).sin() * (0.5 * pitch).cos(),
                ),
            );

            // deci-degrees per second
            let angular_velocity = Vector3::new(
                200.0 * phase.cos() + rng.random_range(-5.0..5.0),
                80.0 * (phase * 1.3).sin() + rng.random_range(-5.0..5.0),
                rng.random_range(-5.0..5.0),
            );

            samples.push(RawSensorSample::new(rotation, angular_velocity));
        }

        Self { samples, index: 0 }
    }

    fn next(&mut self) -> RawSensorSample {
        let sample = self.samples[self.index];
        self.index = (self.index + 1) % self.samples.len();
        sample
    }
}

impl SensorDriver for PreGeneratedSamples {
    type Error = ();

    fn configure(&mut self, _config: &SensorConfig) -> Result<(), ()> {
        Ok(())
    }

    fn poll(&mut self) -> Option<RawSensorSample> {
        Some(self.next())
    }

    fn tare(&mut self, _request: TareRequest) -> Result<(), ()> {
        Ok(())
    }

    fn save_calibration(&mut self) -> Result<(), ()> {
        Ok(())
    }

    fn enable_calibration(&mut self, _sensors: CalibrationSensors) -> Result<(), ()> {
        Ok(())
    }

    fn clear_calibration(&mut self) -> Result<(), ()> {
        Ok(())
    }
}

/// Sink that keeps only the latest report
struct LatestReport(Option<OutputReport>);

impl ReportSink for LatestReport {
    fn send(&mut self, report: &OutputReport) {
        self.0 = Some(*report);
    }
}

fn settings() -> TrackerSettings {
    TrackerSettings {
        mounting_offset: Vector3::new(10.0, -20.0, 90.0),
        mirror_serial: false,
        ..Default::default()
    }
}

/// Benchmark the fixed-point Hamilton product
fn bench_compose(c: &mut Criterion) {
    let lhs = euler_to_quaternion(&Vector3::new(10.0, -20.0, 90.0), QUATERNION_Q_POINT);
    let rhs = euler_to_quaternion(&Vector3::new(-35.0, 5.0, 12.5), QUATERNION_Q_POINT);

    c.bench_function("fixed_compose", |b| {
        b.iter(|| compose(black_box(&lhs), black_box(&rhs), QUATERNION_Q_POINT))
    });
}

/// Benchmark building the mounting offset from Euler angles
fn bench_euler_to_quaternion(c: &mut Criterion) {
    let euler = Vector3::new(10.0, -20.0, 90.0);

    c.bench_function("euler_to_quaternion", |b| {
        b.iter(|| euler_to_quaternion(black_box(&euler), QUATERNION_Q_POINT))
    });
}

/// Benchmark quantizing and correcting one sample
fn bench_process(c: &mut Criterion) {
    let processor = SampleProcessor::new(MountingOffset::new(
        Vector3::new(10.0, -20.0, 90.0),
        OffsetFrame::Reference,
        QUATERNION_Q_POINT,
    ));
    let mut data = PreGeneratedSamples::new(1000, 42);

    c.bench_function("sample_process", |b| {
        b.iter(|| processor.process(black_box(&data.next())))
    });
}

/// Benchmark report encoding
fn bench_encode(c: &mut Criterion) {
    let mut encoder = ReportEncoder::new();
    let sample = ProcessedSample {
        orientation: FixedQuaternion::new(11585, 0, 0, 11585, QUATERNION_Q_POINT),
        angular_velocity: [1200, -300, 25],
    };

    c.bench_function("report_encode", |b| {
        b.iter(|| encoder.encode(black_box(&sample)))
    });
}

/// Benchmark a full loop iteration with a sample ready
fn bench_loop_task(c: &mut Criterion) {
    let flags = CommandFlags::new();
    let driver = PreGeneratedSamples::new(1000, 7);
    let Ok(mut session) = TrackerSession::new(driver, &flags, settings()) else {
        panic!("benchmark session setup failed");
    };
    let mut hid = LatestReport(None);

    c.bench_function("tracker_loop_task", |b| {
        b.iter(|| session.loop_task(&mut hid, &mut NoSerial))
    });
}

/// Benchmark loop iterations that also forward a command
fn bench_loop_task_with_command(c: &mut Criterion) {
    let flags = CommandFlags::new();
    let driver = PreGeneratedSamples::new(1000, 11);
    let Ok(mut session) = TrackerSession::new(driver, &flags, settings()) else {
        panic!("benchmark session setup failed");
    };
    let mut hid = LatestReport(None);

    c.bench_function("tracker_loop_task_with_command", |b| {
        b.iter(|| {
            flags.request(Command::Tare);
            session.loop_task(&mut hid, &mut NoSerial)
        })
    });
}

criterion_group!(
    benches,
    bench_compose,
    bench_euler_to_quaternion,
    bench_process,
    bench_encode,
    bench_loop_task,
    bench_loop_task_with_command
);

criterion_main!(benches);
