//! Time-of-day samples as read from the real-time clock.
//!
//! See [`ClockTime`].

use time::{OffsetDateTime, PrimitiveDateTime};

use crate::{Error, Result};

include!(concat!(env!("OUT_DIR"), "/build_time.rs"));

/// One sample of the wall clock at one-second resolution.
///
/// Two samples compare equal when hour, minute, and second all match, so changes below one
/// second are invisible to the clock face.
///
/// ```
/// use strip_clock::clock_time::ClockTime;
///
/// let morning = ClockTime::new(7, 5, 30);
/// assert_eq!(morning.to_string(), "7:5:30");
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    /// Hour of the day, 0-23.
    pub hour: u8,
    /// Minute of the hour, 0-59.
    pub minute: u8,
    /// Second of the minute, 0-59.
    pub second: u8,
}

impl ClockTime {
    /// Create a sample from its parts.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

impl From<time::Time> for ClockTime {
    fn from(time: time::Time) -> Self {
        let (hour, minute, second) = time.as_hms();
        Self::new(hour, minute, second)
    }
}

impl From<PrimitiveDateTime> for ClockTime {
    fn from(date_time: PrimitiveDateTime) -> Self {
        date_time.time().into()
    }
}

// Same `h:m:s` shape the clock logs on every render.
impl core::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}:{}", self.hour, self.minute, self.second)
    }
}

/// Local date and time of the build, used to seed a real-time clock that has stopped.
///
/// The offset from UTC comes from the `UTC_OFFSET_MINUTES` environment variable at build time
/// (default 0).
///
/// # Errors
///
/// Returns [`Error::InvalidBuildTimestamp`] if the generated timestamp is not representable.
pub fn build_local_time() -> Result<PrimitiveDateTime> {
    let date_time = OffsetDateTime::from_unix_timestamp(BUILD_LOCAL_UNIX_SECONDS)
        .map_err(|_| Error::InvalidBuildTimestamp)?;
    Ok(PrimitiveDateTime::new(date_time.date(), date_time.time()))
}
