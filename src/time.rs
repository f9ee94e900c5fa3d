/**
 * Time handling for the orchestrator.
 * The host drives everything through delta updates, so effect time is a
 * monotone logical clock rather than a wall clock. Wall time only appears
 * in the Timer used for tick diagnostics.
 */
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

/// Represents a moment on the orchestrator's logical clock
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Default)]
pub struct EffectTime(u64); // u64 nanoseconds for Ord compliance

impl EffectTime {
    /// Create effect time from nanoseconds
    #[inline]
    pub fn from_nanos(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }

    /// Create effect time from milliseconds
    #[inline]
    pub fn from_millis(milliseconds: f64) -> Result<Self, EffectError> {
        Self::from_seconds(milliseconds / 1000.0)
    }

    /// Create a new effect time
    #[inline]
    pub fn from_seconds(seconds: f64) -> Result<Self, EffectError> {
        if seconds < 0.0 || !seconds.is_finite() {
            return Err(EffectError::InvalidTime { time: seconds });
        }
        let nanos = (seconds * 1_000_000_000.0) as u64;
        Ok(Self(nanos))
    }

    /// Zero time
    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    /// Get time in seconds
    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Get time in milliseconds
    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Get time in nanoseconds
    #[inline]
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Add duration to this time
    #[inline]
    pub fn add(&self, duration: EffectTime) -> Self {
        Self(self.0.saturating_add(duration.0))
    }

    /// Subtract duration from this time
    #[inline]
    pub fn sub(&self, duration: EffectTime) -> Self {
        Self(self.0.saturating_sub(duration.0))
    }

    /// Clamp time to a range
    #[inline]
    pub fn clamp(&self, min: EffectTime, max: EffectTime) -> Self {
        if self.0 < min.0 {
            min
        } else if self.0 > max.0 {
            max
        } else {
            *self
        }
    }
}

impl std::ops::Add for EffectTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::ops::AddAssign for EffectTime {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::ops::Sub for EffectTime {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::ops::SubAssign for EffectTime {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

// Easier conversions
impl From<u64> for EffectTime {
    fn from(nanos: u64) -> Self {
        Self::from_nanos(nanos)
    }
}

impl From<EffectTime> for u64 {
    fn from(time: EffectTime) -> Self {
        time.0
    }
}

impl From<f64> for EffectTime {
    fn from(seconds: f64) -> Self {
        Self::from_seconds(seconds.max(0.0)).unwrap_or(Self::zero())
    }
}

impl From<EffectTime> for f64 {
    fn from(time: EffectTime) -> Self {
        time.as_seconds()
    }
}

impl From<Duration> for EffectTime {
    fn from(duration: Duration) -> Self {
        EffectTime::from_nanos(duration.as_nanos() as u64)
    }
}

impl From<EffectTime> for Duration {
    fn from(time: EffectTime) -> Self {
        Duration::from_nanos(time.0)
    }
}

/// Represents a time range on the effect clock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: EffectTime,
    pub end: EffectTime,
}

impl TimeRange {
    /// Create a new time range
    #[inline]
    pub fn new(start: EffectTime, end: EffectTime) -> Result<Self, EffectError> {
        if start > end {
            return Err(EffectError::TimeOutOfRange {
                time: start.as_seconds(),
                start: 0.0,
                end: end.as_seconds(),
            });
        }
        Ok(Self { start, end })
    }

    /// Create a range from zero to the given duration
    #[inline]
    pub fn from_duration(duration: EffectTime) -> Self {
        Self {
            start: EffectTime::zero(),
            end: duration,
        }
    }

    /// Get the duration of this range
    #[inline]
    pub fn duration(&self) -> EffectTime {
        EffectTime(self.end.0 - self.start.0)
    }

    /// Check if a time is within this range (inclusive)
    #[inline]
    pub fn contains(&self, time: EffectTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// Normalize a time within this range to [0, 1]
    #[inline]
    pub fn normalize_time(&self, time: EffectTime) -> f64 {
        if self.duration().as_seconds() == 0.0 {
            return 0.0;
        }
        ((time.as_seconds() - self.start.as_seconds()) / self.duration().as_seconds())
            .clamp(0.0, 1.0)
    }

    /// Denormalize a value from [0, 1] to this range
    #[inline]
    pub fn denormalize_time(&self, normalized: f64) -> EffectTime {
        let clamped = normalized.clamp(0.0, 1.0);
        EffectTime::from(self.start.as_seconds() + clamped * self.duration().as_seconds())
    }
}

/// Wall-clock timer for measuring how long a tick actually took
#[derive(Debug, Clone)]
pub struct Timer {
    start: instant::Instant,
}

impl Timer {
    /// Start a new timer
    #[inline]
    pub fn new() -> Self {
        Self {
            start: instant::Instant::now(),
        }
    }

    /// Elapsed wall time in microseconds
    #[inline]
    pub fn elapsed_micros(&self) -> u128 {
        self.start.elapsed().as_micros()
    }

    /// Elapsed wall time in milliseconds
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Restart the timer
    #[inline]
    pub fn restart(&mut self) {
        self.start = instant::Instant::now();
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_time() {
        let time1 = EffectTime::from_seconds(1.5).unwrap();
        let time2 = EffectTime::from_seconds(2.0).unwrap();

        assert_eq!(time1.as_seconds(), 1.5);
        assert_eq!(time1.as_millis(), 1500.0);

        let sum = time1.add(time2);
        assert_eq!(sum.as_seconds(), 3.5);

        let diff = time2.sub(time1);
        assert_eq!(diff.as_seconds(), 0.5);
    }

    #[test]
    fn test_invalid_time() {
        assert!(EffectTime::from_seconds(-1.0).is_err());
        assert!(EffectTime::from_seconds(f64::NAN).is_err());
        assert!(EffectTime::from_seconds(f64::INFINITY).is_err());
    }

    #[test]
    fn test_saturating_sub() {
        let small = EffectTime::from_nanos(10);
        let large = EffectTime::from_nanos(100);
        assert_eq!(small.sub(large), EffectTime::zero());
    }

    #[test]
    fn test_time_range() {
        let start = EffectTime::from_seconds(1.0).unwrap();
        let end = EffectTime::from_seconds(3.0).unwrap();
        let range = TimeRange::new(start, end).unwrap();

        assert_eq!(range.duration().as_seconds(), 2.0);
        assert!(range.contains(EffectTime::from_seconds(2.0).unwrap()));
        assert!(!range.contains(EffectTime::from_seconds(4.0).unwrap()));

        assert_eq!(
            range.normalize_time(EffectTime::from_seconds(2.0).unwrap()),
            0.5
        );
        assert_eq!(range.denormalize_time(0.5).as_seconds(), 2.0);
    }

    #[test]
    fn test_zero_duration_range() {
        let range = TimeRange::from_duration(EffectTime::zero());
        assert_eq!(range.normalize_time(EffectTime::from_nanos(5)), 0.0);
    }
}
