//! Duration value type (RFC 5545 §3.3.6).

use std::fmt;

/// A DURATION value in wire structure: nominal components plus a sign.
///
/// Weeks are exclusive of the other fields in the wire grammar (`P2W` vs
/// `P1DT2H`), but the struct stores both so arithmetic helpers stay simple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Duration {
    pub negative: bool,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.weeks == 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Total signed length in seconds.
    #[must_use]
    pub const fn total_seconds(self) -> i64 {
        let magnitude = self.weeks as i64 * 7 * 86_400
            + self.days as i64 * 86_400
            + self.hours as i64 * 3600
            + self.minutes as i64 * 60
            + self.seconds as i64;
        if self.negative { -magnitude } else { magnitude }
    }

    #[must_use]
    pub fn to_chrono(self) -> chrono::Duration {
        chrono::Duration::seconds(self.total_seconds())
    }

    /// Builds a canonical wire duration (days/hours/minutes/seconds) from a
    /// chrono duration. Sub-second precision is dropped.
    #[must_use]
    pub fn from_chrono(duration: chrono::Duration) -> Self {
        let negative = duration < chrono::Duration::zero();
        let mut remaining = duration.num_seconds().unsigned_abs();

        let days = u32::try_from(remaining / 86_400).unwrap_or(u32::MAX);
        remaining %= 86_400;
        let hours = u32::try_from(remaining / 3600).unwrap_or(0);
        remaining %= 3600;
        let minutes = u32::try_from(remaining / 60).unwrap_or(0);
        let seconds = u32::try_from(remaining % 60).unwrap_or(0);

        Self {
            negative,
            weeks: 0,
            days,
            hours,
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        if self.weeks > 0 {
            return write!(f, "{}W", self.weeks);
        }

        if self.days > 0 {
            write!(f, "{}D", self.days)?;
        }

        let has_time = self.hours > 0 || self.minutes > 0 || self.seconds > 0;
        if has_time || self.days == 0 {
            f.write_str("T")?;
            if self.hours > 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes > 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds > 0 || (self.hours == 0 && self.minutes == 0 && self.days == 0) {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}
