//! Simulated tracker run
//!
//! Drives a tracker session from a synthetic sensor that sweeps the head
//! left and right, prints every tenth report and issues a tare halfway
//! through.
//!
//! Run with: `cargo run --example simulated`

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use tracker_3dof::{
    CalibrationSensors, Command, CommandFlags, OutputReport, RawSensorSample, ReportSink,
    SensorConfig, SensorDriver, SensorMode, SerialSink, TareRequest, TrackerSession,
    TrackerSettings,
};

const REPORT_INTERVAL_US: u16 = 2_500; // 400 Hz
const REPORT_COUNT: u32 = 400;

/// Sensor that sweeps yaw +/-45 degrees at 0.5 Hz
struct SweepSensor {
    tick: u32,
    period_s: f32,
}

impl SensorDriver for SweepSensor {
    type Error = ();

    fn configure(&mut self, config: &SensorConfig) -> Result<(), ()> {
        println!(
            "sensor: report 0x{:02X} every {} us",
            config.sensor_type.report_id(),
            config.report_interval_us
        );
        self.period_s = f32::from(config.report_interval_us) * 1e-6;
        Ok(())
    }

    fn poll(&mut self) -> Option<RawSensorSample> {
        let t = self.tick as f32 * self.period_s;
        self.tick += 1;

        let omega = core::f32::consts::PI; // 0.5 Hz
        let yaw = 45f32.to_radians() * (omega * t).sin();
        let yaw_rate = 45.0 * omega * (omega * t).cos(); // deg/s

        let rotation: Quaternion<f32> =
            *UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw).quaternion();
        Some(RawSensorSample::new(
            rotation,
            Vector3::new(0.0, 0.0, yaw_rate * 10.0),
        ))
    }

    fn tare(&mut self, request: TareRequest) -> Result<(), ()> {
        println!("sensor: tare {:?}", request.axes);
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

/// Prints a decoded view of every tenth report
struct PrintSink;

impl ReportSink for PrintSink {
    fn send(&mut self, report: &OutputReport) {
        if report.sequence() % 10 != 0 {
            return;
        }
        let q = report.quaternion().to_quaternion();
        let rate = report.angular_velocity_rad();
        println!(
            "#{:3} q = [{:+.4}, {:+.4}, {:+.4}, {:+.4}]  w_z = {:+.3} rad/s",
            report.sequence(),
            q.w,
            q.i,
            q.j,
            q.k,
            rate[2]
        );
    }
}

/// Counts mirrored serial bytes
struct SerialCounter(usize);

impl SerialSink for SerialCounter {
    fn write(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

fn main() {
    let flags = CommandFlags::new();
    let settings = TrackerSettings {
        sensor_mode: SensorMode::SensorFusionNoMagnetometer,
        report_interval_us: REPORT_INTERVAL_US,
        mounting_offset: Vector3::new(0.0, 0.0, 90.0),
        ..Default::default()
    };
    let sensor = SweepSensor {
        tick: 0,
        period_s: 0.0,
    };

    let mut session = match TrackerSession::new(sensor, &flags, settings) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("setup failed: {err}");
            return;
        }
    };

    let mut hid = PrintSink;
    let mut serial = SerialCounter(0);
    for i in 0..REPORT_COUNT {
        if i == REPORT_COUNT / 2 {
            flags.request(Command::Tare);
        }
        session.loop_task(&mut hid, &mut serial);
        if let Some(command) = session.last_command() {
            println!("forwarded {:?}", command);
        }
    }

    println!(
        "sent {} reports, {} serial bytes",
        REPORT_COUNT, serial.0
    );
}
