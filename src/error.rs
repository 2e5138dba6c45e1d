use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[derive(Debug, Display, Error)]
pub enum Error {
    // `#[error(not(source))]` below tells `derive_more` that `embassy_executor::SpawnError` does
    // not implement Rust's `core::error::Error` trait.
    /// An embassy task could not be spawned.
    #[cfg(feature = "arm")]
    #[display("{_0:?}")]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// The clock configuration does not describe a drawable clock face.
    #[display("Invalid clock configuration: {_0}")]
    InvalidConfig(ConfigError),

    /// A clock configuration could not be encoded or decoded with `postcard`.
    #[display("Clock configuration encoding failed: {_0:?}")]
    ConfigCodec(#[error(not(source))] postcard::Error),

    /// Nothing acknowledged the real-time clock's I2C address.
    #[display("Couldn't find RTC")]
    RtcNotFound,

    /// An I2C transfer to an already-found real-time clock failed.
    #[display("RTC I2C transfer failed")]
    RtcBus,

    /// The real-time clock registers hold something that is not a date and time.
    #[display("RTC returned an invalid date or time")]
    RtcInvalidData,

    /// The date and time cannot be stored by the real-time clock (DS1307 years are 2000-2099).
    #[display("Date or time is out of the RTC's range")]
    RtcOutOfRange,

    /// The timestamp generated by `build.rs` is not a valid date and time.
    #[display("Build timestamp is not a valid date and time")]
    InvalidBuildTimestamp,
}

/// Reasons a [`ClockConfig`](crate::clock_config::ClockConfig) is rejected when it is loaded.
///
/// Every one of these would otherwise show up at render time as a division by zero or a fill
/// boundary outside its zone.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A field that sizes a zone or divides a time value is zero.
    #[display("{_0} must be positive")]
    ZeroField(#[error(not(source))] &'static str),

    /// `interval_hours` is too small to have half and quarter ticks.
    #[display("interval_hours is {_0} but must be at least 4 for half and quarter ticks")]
    TooFewHourPixels(#[error(not(source))] u16),

    /// `interval_hours` does not split into whole half and quarter spacings.
    #[display(
        "interval_hours is {_0} but must be a multiple of 4 for even half and quarter ticks"
    )]
    TicksNotEven(#[error(not(source))] u16),

    /// The active window does not fit within one day.
    #[display("hours_start {hours_start} + total_hours {total_hours} must not exceed 24")]
    WindowPastMidnight {
        /// First displayed hour.
        hours_start: u8,
        /// Number of displayed hours.
        total_hours: u8,
    },

    /// One hour of pixels does not cover exactly sixty minutes.
    #[display(
        "interval_hours {interval_hours} * interval_minutes {interval_minutes} must equal 60"
    )]
    HoursNotProportional {
        /// Pixels per hour.
        interval_hours: u16,
        /// Minutes per hour-track pixel, and minute-counter width.
        interval_minutes: u16,
    },

    /// The second counter cannot represent a whole minute.
    #[display(
        "interval_seconds {interval_seconds} * seconds_representation {seconds_representation} must be at least 60"
    )]
    SecondsDoNotCoverMinute {
        /// Width of the second counter.
        interval_seconds: u16,
        /// Seconds per second-counter pixel.
        seconds_representation: u16,
    },

    /// The three zones need more pixels than the strip has.
    #[display("zones end at pixel {zones_end} but total is only {total}")]
    ZonesExceedStrip {
        /// One past the last second-counter pixel.
        zones_end: usize,
        /// Configured pixel count.
        total: u16,
    },

    /// The configured pixel count is not the length of the strip being drawn.
    #[display("total is {total} but the strip has {len} pixels")]
    PixelCountMismatch {
        /// Configured pixel count.
        total: u16,
        /// Strip length.
        len: usize,
    },
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err)
    }
}

impl From<postcard::Error> for Error {
    fn from(err: postcard::Error) -> Self {
        Self::ConfigCodec(err)
    }
}

#[cfg(feature = "arm")]
impl From<embassy_executor::SpawnError> for Error {
    fn from(err: embassy_executor::SpawnError) -> Self {
        Self::TaskSpawn(err)
    }
}
