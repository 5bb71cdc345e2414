#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The time at which the simulation started
pub const START_TIME: Time = Time(0.0);

/// Elapsed simulated time in seconds
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Time(f64);

/// A span of simulated time in seconds
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Duration(f64);

impl Time {
    pub const fn from_seconds_f64(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds as f64)
    }

    pub fn as_seconds_f64(&self) -> f64 {
        self.0
    }

    pub fn as_millis_f64(&self) -> f64 {
        self.0 * 1_000.0
    }

    /// Get elapsed seconds (rounded down)
    pub fn to_seconds(self) -> u64 {
        self.0 as u64
    }

    /// Times are never NaN, so this is a total order
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }

    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }

    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl Duration {
    pub const ZERO: Self = Self(0.0);

    pub const fn from_seconds_f64(seconds: f64) -> Self {
        Self(seconds)
    }

    pub fn from_micros(micros: u64) -> Self {
        Self(micros as f64 / 1_000_000.0)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(millis as f64 / 1_000.0)
    }

    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds as f64)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn as_seconds_f64(&self) -> f64 {
        self.0
    }

    pub fn as_millis_f64(&self) -> f64 {
        self.0 * 1_000.0
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl std::ops::Add<Duration> for Time {
    type Output = Self;

    fn add(self, other: Duration) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::AddAssign<Duration> for Time {
    fn add_assign(&mut self, other: Duration) {
        self.0 += other.0
    }
}

impl std::ops::AddAssign<Duration> for Duration {
    fn add_assign(&mut self, other: Duration) {
        self.0 += other.0
    }
}

impl std::ops::Add for Duration {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::Mul<u64> for Duration {
    type Output = Self;

    fn mul(self, factor: u64) -> Self {
        Self(self.0 * factor as f64)
    }
}

impl std::ops::Sub<Self> for Time {
    type Output = Duration;

    fn sub(self, other: Self) -> Duration {
        Duration(self.0 - other.0)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        write!(w, "{:.3}ms", self.as_millis_f64())
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, w: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        let secs = self.0.trunc() as u64;
        let minutes = secs / 60;
        let millis = (self.0 - secs as f64) * 1_000.0;

        if minutes > 0 {
            write!(w, "{minutes:02}min ")?;
        }

        write!(w, "{:02}s {millis:.3}ms", secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::{Duration, Time};

    #[test]
    fn duration_from_millis() {
        let duration = Duration::from_millis(1500);

        assert_eq!(1.5, duration.as_seconds_f64());
        assert_eq!(1500.0, duration.as_millis_f64());
    }

    #[test]
    fn time_arithmetic() {
        let time = Time::from_seconds(2) + Duration::from_millis(250);

        assert_eq!(2, time.to_seconds());
        assert_eq!(Duration::from_millis(250), time - Time::from_seconds(2));
        assert_eq!(time, time.max(Time::from_seconds(1)));
    }

    #[test]
    fn display() {
        let time = Time::from_seconds_f64(61.5);
        assert_eq!("01min 01s 500.000ms", time.to_string());
        assert_eq!("0.960ms", Duration::from_micros(960).to_string());
    }
}
