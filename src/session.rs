//! Tracker session: the per-device state and its loop
//!
//! A session owns the sensor driver, the frozen mounting offset, the report
//! sequence counter and the optional period meter. Command flags live outside
//! the session so interrupt handlers can raise them while it runs; the
//! session only clears them.
//!
//! Call [`TrackerSession::loop_task`] repeatedly. It never blocks: a missing
//! sample simply makes the iteration a no-op apart from command dispatch.

use log::{info, trace};

use crate::command::{Command, CommandFlags, dispatch};
use crate::driver::{SensorConfig, SensorDriver};
use crate::error::{ConfigError, TrackerError};
use crate::fixed::QUATERNION_Q_POINT;
use crate::offset::MountingOffset;
use crate::period::{Clock, NoClock, PeriodMeter};
use crate::processor::SampleProcessor;
use crate::report::{OutputReport, ReportEncoder, ReportSink, SerialSink};
use crate::types::{RawSensorSample, TrackerSettings};

/// Running tracker bound to one sensor driver
pub struct TrackerSession<'f, D: SensorDriver, C: Clock = NoClock> {
    driver: D,
    clock: C,
    commands: &'f CommandFlags,
    settings: TrackerSettings,
    processor: SampleProcessor,
    encoder: ReportEncoder,
    period: Option<PeriodMeter>,
    last_command: Option<Command>,
}

impl<'f, D: SensorDriver> TrackerSession<'f, D, NoClock> {
    /// Configure the sensor and build the mounting offset
    ///
    /// Sessions built here have no clock, so `measure_period` is rejected;
    /// use [`TrackerSession::with_clock`] to measure the report period.
    pub fn new(
        driver: D,
        commands: &'f CommandFlags,
        settings: TrackerSettings,
    ) -> Result<Self, TrackerError<D::Error>> {
        if settings.measure_period {
            return Err(ConfigError::PeriodMeasurementNeedsClock.into());
        }
        Self::with_clock(driver, NoClock, commands, settings)
    }
}

impl<'f, D: SensorDriver, C: Clock> TrackerSession<'f, D, C> {
    /// Configure the sensor and build the mounting offset, using `clock` for
    /// period measurement
    pub fn with_clock(
        mut driver: D,
        clock: C,
        commands: &'f CommandFlags,
        settings: TrackerSettings,
    ) -> Result<Self, TrackerError<D::Error>> {
        settings.validate()?;

        let config = SensorConfig {
            sensor_type: settings.sensor_mode.sensor_type(),
            report_interval_us: settings.report_interval_us,
            prediction_s: settings.prediction_s,
        };
        driver.configure(&config).map_err(TrackerError::Driver)?;

        let offset = MountingOffset::new(
            settings.mounting_offset,
            settings.offset_frame,
            QUATERNION_Q_POINT,
        );
        info!(
            "tracker configured: {:?} (report 0x{:02X}) every {} us, offset {:?}",
            settings.sensor_mode,
            config.sensor_type.report_id(),
            settings.report_interval_us,
            offset.quaternion().components()
        );

        Ok(Self {
            driver,
            clock,
            commands,
            settings,
            processor: SampleProcessor::new(offset),
            encoder: ReportEncoder::new(),
            period: settings.measure_period.then(PeriodMeter::new),
            last_command: None,
        })
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Frozen mounting offset
    pub fn offset(&self) -> &MountingOffset {
        self.processor.offset()
    }

    /// Command flags consumed by this session
    pub fn commands(&self) -> &'f CommandFlags {
        self.commands
    }

    /// Sequence number of the last report produced
    pub fn sequence(&self) -> u8 {
        self.encoder.sequence()
    }

    /// Command honoured by the most recent iteration
    pub fn last_command(&self) -> Option<Command> {
        self.last_command
    }

    /// Last published report period, if period measurement is enabled
    pub fn last_report_period_us(&self) -> Option<u32> {
        self.period.as_ref().and_then(PeriodMeter::last_period_us)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Run one loop iteration
    ///
    /// Polls the driver; if a sample arrived it is corrected, encoded once and
    /// delivered to `hid` (and mirrored to `serial` when enabled). Then at
    /// most one pending command is forwarded to the driver. Returns whether a
    /// report was produced.
    pub fn loop_task<R, S>(&mut self, hid: &mut R, serial: &mut S) -> bool
    where
        R: ReportSink + ?Sized,
        S: SerialSink + ?Sized,
    {
        let produced = match self.driver.poll() {
            Some(sample) => {
                self.emit(&sample, hid, serial);
                true
            }
            None => false,
        };

        self.last_command = dispatch(self.commands, &mut self.driver);

        produced
    }

    fn emit<R, S>(&mut self, sample: &RawSensorSample, hid: &mut R, serial: &mut S)
    where
        R: ReportSink + ?Sized,
        S: SerialSink + ?Sized,
    {
        let processed = self.processor.process(sample);
        let report: OutputReport = self.encoder.encode(&processed);

        hid.send(&report);
        if self.settings.mirror_serial {
            serial.write(&report.mirror_frame());
        }
        trace!("report {} sent", report.sequence());

        if let Some(meter) = self.period.as_mut()
            && let Some(period) = meter.record(self.clock.now_us())
        {
            info!("report period: {} us", period);
        }
    }

    /// Stop the session and hand the driver back for shutdown
    pub fn end(self) -> D {
        info!("tracker stopped after sequence {}", self.encoder.sequence());
        self.driver
    }
}
