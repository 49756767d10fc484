//! Report period measurement
//!
//! Debug aid for checking the actual report rate against the configured
//! interval. Every [`PERIOD_LOG_INTERVAL`] reports the most recent
//! inter-report period is published.

/// Number of reports between published period measurements
pub const PERIOD_LOG_INTERVAL: u8 = 100;

/// Free-running microsecond clock
///
/// The counter may wrap; periods are computed with wrapping arithmetic.
pub trait Clock {
    fn now_us(&self) -> u32;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }
}

/// Clock for sessions that never measure the report period
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClock;

impl Clock for NoClock {
    fn now_us(&self) -> u32 {
        0
    }
}

/// Tracks the time between consecutive reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodMeter {
    last_us: u32,
    counter: u8,
    last_period_us: Option<u32>,
}

impl PeriodMeter {
    pub const fn new() -> Self {
        Self {
            last_us: 0,
            counter: 0,
            last_period_us: None,
        }
    }

    /// Record a report produced at `now_us`
    ///
    /// Returns the period since the previous report on every
    /// [`PERIOD_LOG_INTERVAL`]th call, `None` otherwise.
    pub fn record(&mut self, now_us: u32) -> Option<u32> {
        let period = now_us.wrapping_sub(self.last_us);
        self.last_us = now_us;
        self.counter += 1;

        if self.counter == PERIOD_LOG_INTERVAL {
            self.counter = 0;
            self.last_period_us = Some(period);
            return Some(period);
        }
        None
    }

    /// Most recently published period in microseconds
    pub fn last_period_us(&self) -> Option<u32> {
        self.last_period_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publishes_every_interval() {
        let mut meter = PeriodMeter::new();
        let mut now = 0u32;
        for _ in 0..PERIOD_LOG_INTERVAL - 1 {
            now += 2_500;
            assert_eq!(meter.record(now), None);
        }
        now += 2_600;
        assert_eq!(meter.record(now), Some(2_600));
        assert_eq!(meter.last_period_us(), Some(2_600));

        // Counter restarts
        now += 2_500;
        assert_eq!(meter.record(now), None);
        assert_eq!(meter.last_period_us(), Some(2_600));
    }

    #[test]
    fn test_period_across_clock_wrap() {
        let mut meter = PeriodMeter::new();
        let mut now = u32::MAX - 50 * 1_000;
        for _ in 0..PERIOD_LOG_INTERVAL - 1 {
            now = now.wrapping_add(1_000);
            meter.record(now);
        }
        now = now.wrapping_add(1_000);
        assert_eq!(meter.record(now), Some(1_000));
    }

    #[test]
    fn test_no_clock_reads_zero() {
        assert_eq!(NoClock.now_us(), 0);
        assert_eq!((&NoClock).now_us(), 0);
    }
}
