//! Report encoding and delivery
//!
//! A report is a fixed 16-byte record:
//!
//! | offset | field                            |
//! |--------|----------------------------------|
//! | 0      | version (`0x02`)                 |
//! | 1      | sequence number                  |
//! | 2..10  | quaternion i, j, k, real         |
//! | 10..16 | angular velocity x, y, z         |
//!
//! Every multi-byte field is a signed 16-bit value stored low byte first.
//! The encoder owns the sequence counter; sinks only ever see finished
//! reports, so the same report can be handed to several transports.

use crate::fixed::{ANGULAR_VELOCITY_Q_POINT, FixedQuaternion, QUATERNION_Q_POINT};
use crate::processor::ProcessedSample;

/// Version tag carried in byte 0 of every report
pub const REPORT_VERSION: u8 = 0x02;

/// Encoded report length in bytes
pub const REPORT_LEN: usize = 16;

/// Length of the mirrored serial frame
pub const MIRROR_FRAME_LEN: usize = 11;

const VERSION_OFFSET: usize = 0;
const SEQUENCE_OFFSET: usize = 1;
const QUATERNION_OFFSET: usize = 2;
const ANGULAR_VELOCITY_OFFSET: usize = 10;

/// Vendor-defined HID report descriptor for the tracker interface
///
/// 16-byte input report, 64-byte output report, 16-byte feature report.
pub const HID_REPORT_DESCRIPTOR: [u8; 53] = [
    0x06, 0xFF, 0xFF, // Usage Page (Vendor Defined 0xFFFF)
    0x09, 0x01, // Usage (0x01)
    0xA1, 0x01, // Collection (Application)
    0x09, 0x02, //   Usage (0x02)
    0x09, 0x03, //   Usage (0x03)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x10, //   Report Count (16)
    0x81, 0x02, //   Input (Data,Var,Abs)
    0x09, 0x04, //   Usage (0x04)
    0x09, 0x05, //   Usage (0x05)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x40, //   Report Count (64)
    0x91, 0x02, //   Output (Data,Var,Abs)
    0x09, 0x06, //   Usage (0x06)
    0x09, 0x07, //   Usage (0x07)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x10, //   Report Count (16)
    0xB1, 0x02, //   Feature (Data,Var,Abs)
    0xC0, // End Collection
];

/// One encoded tracker report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputReport {
    bytes: [u8; REPORT_LEN],
}

impl OutputReport {
    /// Encode a processed sample under the given sequence number
    pub fn new(sequence: u8, sample: &ProcessedSample) -> Self {
        let q = &sample.orientation;
        let [x, y, z] = sample.angular_velocity;

        let mut bytes = [0u8; REPORT_LEN];
        bytes[VERSION_OFFSET] = REPORT_VERSION;
        bytes[SEQUENCE_OFFSET] = sequence;

        let fields = [q.i, q.j, q.k, q.real, x, y, z];
        for (chunk, field) in bytes[QUATERNION_OFFSET..].chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }

        Self { bytes }
    }

    /// Wrap already-encoded bytes
    pub const fn from_bytes(bytes: [u8; REPORT_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; REPORT_LEN] {
        &self.bytes
    }

    pub fn version(&self) -> u8 {
        self.bytes[VERSION_OFFSET]
    }

    pub fn sequence(&self) -> u8 {
        self.bytes[SEQUENCE_OFFSET]
    }

    fn field(&self, offset: usize) -> i16 {
        i16::from_le_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }

    /// Decoded orientation in Q14
    pub fn quaternion(&self) -> FixedQuaternion {
        FixedQuaternion::new(
            self.field(QUATERNION_OFFSET + 6),
            self.field(QUATERNION_OFFSET),
            self.field(QUATERNION_OFFSET + 2),
            self.field(QUATERNION_OFFSET + 4),
            QUATERNION_Q_POINT,
        )
    }

    /// Decoded angular velocity in Q14 radians per second
    pub fn angular_velocity(&self) -> [i16; 3] {
        [
            self.field(ANGULAR_VELOCITY_OFFSET),
            self.field(ANGULAR_VELOCITY_OFFSET + 2),
            self.field(ANGULAR_VELOCITY_OFFSET + 4),
        ]
    }

    /// Angular velocity in radians per second
    pub fn angular_velocity_rad(&self) -> [f32; 3] {
        self.angular_velocity()
            .map(|v| crate::fixed::dequantize(v, ANGULAR_VELOCITY_Q_POINT))
    }

    /// Serial mirror frame: sequence, quaternion bytes, then CR LF
    pub fn mirror_frame(&self) -> [u8; MIRROR_FRAME_LEN] {
        let mut frame = [0u8; MIRROR_FRAME_LEN];
        frame[0] = self.sequence();
        frame[1..9].copy_from_slice(&self.bytes[QUATERNION_OFFSET..ANGULAR_VELOCITY_OFFSET]);
        frame[9..].copy_from_slice(b"\r\n");
        frame
    }
}

/// Sequence-numbering report encoder
///
/// The counter starts at zero and is advanced once per encoded report, so
/// the first report carries sequence 1. It wraps after 255.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportEncoder {
    sequence: u8,
}

impl ReportEncoder {
    pub const fn new() -> Self {
        Self { sequence: 0 }
    }

    /// Sequence number of the most recent report
    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Encode one sample, advancing the sequence counter
    ///
    /// # Example
    /// ```
    /// use tracker_3dof::{FixedQuaternion, ProcessedSample, ReportEncoder};
    ///
    /// let mut encoder = ReportEncoder::new();
    /// let sample = ProcessedSample {
    ///     orientation: FixedQuaternion::identity(14),
    ///     angular_velocity: [0, 0, 0],
    /// };
    /// let report = encoder.encode(&sample);
    /// assert_eq!(report.sequence(), 1);
    /// assert_eq!(&report.as_bytes()[..2], &[0x02, 0x01]);
    /// ```
    pub fn encode(&mut self, sample: &ProcessedSample) -> OutputReport {
        self.sequence = self.sequence.wrapping_add(1);
        OutputReport::new(self.sequence, sample)
    }
}

/// Transport receiving whole reports, e.g. a HID interrupt endpoint
///
/// Delivery is fire-and-forget.
pub trait ReportSink {
    fn send(&mut self, report: &OutputReport);
}

impl<T: ReportSink + ?Sized> ReportSink for &mut T {
    fn send(&mut self, report: &OutputReport) {
        (**self).send(report)
    }
}

/// Fan a report out to two sinks
impl<A: ReportSink, B: ReportSink> ReportSink for (A, B) {
    fn send(&mut self, report: &OutputReport) {
        self.0.send(report);
        self.1.send(report);
    }
}

/// Byte stream used for the mirrored serial output
pub trait SerialSink {
    fn write(&mut self, bytes: &[u8]);
}

impl<T: SerialSink + ?Sized> SerialSink for &mut T {
    fn write(&mut self, bytes: &[u8]) {
        (**self).write(bytes)
    }
}

/// Serial sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSerial;

impl SerialSink for NoSerial {
    fn write(&mut self, _bytes: &[u8]) {}
}
