//! Command flags and their dispatcher
//!
//! External code (a USB control request, a button interrupt) raises flags at
//! any time through a shared reference. Once per loop iteration the
//! dispatcher picks the highest-priority pending flag, forwards it to the
//! sensor driver and clears it. The remaining flags wait for later
//! iterations, so the driver never sees two commands in the same iteration.
//!
//! ```text
//!          ┌──────────── tare pending ───────────► TARING ───┐
//!          ├──────────── save pending ───────────► SAVING ───┤
//!  IDLE ───┼──────────── enable pending ─────────► ENABLING ─┼──► IDLE
//!          └──────────── clear pending ──────────► CLEARING ─┘
//! ```

use core::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};

use crate::driver::{CalibrationSensors, SensorDriver, TareRequest};

/// Commands the tracker can forward to the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Zero the current orientation
    Tare,
    /// Persist dynamic calibration data
    SaveCalibration,
    /// Turn dynamic calibration on
    EnableCalibration,
    /// Discard dynamic calibration data
    ClearCalibration,
}

impl Command {
    /// All commands, highest priority first
    pub const PRIORITY: [Command; 4] = [
        Command::Tare,
        Command::SaveCalibration,
        Command::EnableCalibration,
        Command::ClearCalibration,
    ];
}

/// Pending command triggers
///
/// Flags may be raised from any context; only the dispatcher clears them.
#[derive(Debug, Default)]
pub struct CommandFlags {
    tare: AtomicBool,
    save_calibration: AtomicBool,
    enable_calibration: AtomicBool,
    clear_calibration: AtomicBool,
}

impl CommandFlags {
    pub const fn new() -> Self {
        Self {
            tare: AtomicBool::new(false),
            save_calibration: AtomicBool::new(false),
            enable_calibration: AtomicBool::new(false),
            clear_calibration: AtomicBool::new(false),
        }
    }

    fn flag(&self, command: Command) -> &AtomicBool {
        match command {
            Command::Tare => &self.tare,
            Command::SaveCalibration => &self.save_calibration,
            Command::EnableCalibration => &self.enable_calibration,
            Command::ClearCalibration => &self.clear_calibration,
        }
    }

    /// Raise a command; raising an already pending command has no effect
    pub fn request(&self, command: Command) {
        self.flag(command).store(true, Ordering::Release);
    }

    pub fn is_pending(&self, command: Command) -> bool {
        self.flag(command).load(Ordering::Acquire)
    }

    /// Whether any command is waiting
    pub fn any_pending(&self) -> bool {
        Command::PRIORITY.iter().any(|c| self.is_pending(*c))
    }

    /// Highest-priority pending command, without clearing it
    pub fn next_pending(&self) -> Option<Command> {
        Command::PRIORITY.iter().copied().find(|c| self.is_pending(*c))
    }

    fn clear(&self, command: Command) {
        self.flag(command).store(false, Ordering::Release);
    }
}

/// Honour at most one pending command
///
/// Returns the command that was forwarded to the driver. A driver error is
/// logged and the flag is cleared anyway; commands are not retried.
///
/// # Example
/// ```
/// use tracker_3dof::{Command, CommandFlags};
///
/// let flags = CommandFlags::new();
/// flags.request(Command::ClearCalibration);
/// flags.request(Command::Tare);
/// assert_eq!(flags.next_pending(), Some(Command::Tare));
/// ```
pub fn dispatch<D: SensorDriver>(flags: &CommandFlags, driver: &mut D) -> Option<Command> {
    let command = flags.next_pending()?;

    let result = match command {
        Command::Tare => driver.tare(TareRequest::default()),
        Command::SaveCalibration => driver.save_calibration(),
        Command::EnableCalibration => driver.enable_calibration(CalibrationSensors::all()),
        Command::ClearCalibration => driver.clear_calibration(),
    };
    flags.clear(command);

    match result {
        Ok(()) => debug!("{:?} sent to sensor", command),
        Err(e) => warn!("{:?} failed: {:?}", command, e),
    }

    Some(command)
}
