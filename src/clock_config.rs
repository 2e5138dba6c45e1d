//! The primary parameters of a clock face: zone sizes, the active window, and colors.
//!
//! A [`ClockConfig`] is a plain value. It can be built in code (usually starting from
//! [`ClockConfig::DEFAULT`]) or loaded from `postcard` bytes, and is checked with
//! [`ClockConfig::validate`] before anything is drawn. Derived values such as zone boundaries
//! live in [`ZoneLayout`](crate::zone_layout::ZoneLayout), which is computed once from it.
//!
//! # Example: Load a Stored Configuration
//!
//! ```
//! use strip_clock::clock_config::ClockConfig;
//!
//! let mut buffer = [0u8; 64];
//! let stored = ClockConfig::DEFAULT.to_postcard(&mut buffer)?;
//!
//! let config = ClockConfig::from_postcard(stored)?;
//! assert_eq!(config, ClockConfig::DEFAULT);
//! assert!(config.is_active_hour(18));
//! assert!(!config.is_active_hour(19));
//! # Ok::<(), strip_clock::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::led_strip::Rgb;
use crate::{ConfigError, Result};

/// Colors for every kind of pixel on the clock face.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockColors {
    /// Hour-track pixel at the start of an hour.
    #[serde(with = "rgb_tuple")]
    pub hour_tick: Rgb,
    /// Hour-track pixel at the half hour.
    #[serde(with = "rgb_tuple")]
    pub half_tick: Rgb,
    /// Hour-track pixel at a quarter hour.
    #[serde(with = "rgb_tuple")]
    pub quarter_tick: Rgb,
    /// Any pixel that has not elapsed yet and is not a tick.
    #[serde(with = "rgb_tuple")]
    pub future: Rgb,
    /// Elapsed hour-track pixel.
    #[serde(with = "rgb_tuple")]
    pub past: Rgb,
    /// Elapsed minute-counter pixel.
    #[serde(with = "rgb_tuple")]
    pub minute_counter: Rgb,
    /// Elapsed second-counter pixel.
    #[serde(with = "rgb_tuple")]
    pub second_counter: Rgb,
}

impl ClockColors {
    /// Yellow hour ticks, blue half ticks, red quarter ticks on white; green for elapsed time.
    pub const DEFAULT: Self = Self {
        hour_tick: Rgb::new(255, 255, 0),
        half_tick: Rgb::new(0, 0, 255),
        quarter_tick: Rgb::new(255, 0, 0),
        future: Rgb::new(255, 255, 255),
        past: Rgb::new(0, 255, 0),
        minute_counter: Rgb::new(0, 0, 255),
        second_counter: Rgb::new(0, 255, 0),
    };
}

impl Default for ClockColors {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Primary clock-face parameters.
///
/// The strip is split into three contiguous zones starting at pixel 0:
///
/// - hour track: `total_hours * interval_hours` pixels
/// - minute counter: `interval_minutes` pixels
/// - second counter: `interval_seconds` pixels
///
/// The face is lit only while the hour is in `hours_start..hours_start + total_hours`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Pixels on the strip.
    pub total: u16,
    /// First hour of the day that is displayed.
    pub hours_start: u8,
    /// Number of displayed hours.
    pub total_hours: u8,
    /// Hour-track pixels per displayed hour.
    pub interval_hours: u16,
    /// Minutes per hour-track pixel; also the width of the minute counter.
    pub interval_minutes: u16,
    /// Width of the second counter.
    pub interval_seconds: u16,
    /// Seconds per second-counter pixel.
    pub seconds_representation: u16,
    /// Pixel colors.
    pub colors: ClockColors,
}

impl ClockConfig {
    /// A 165-pixel strip showing 06:00 to 19:00 with twelve pixels (five minutes each) per hour,
    /// a five-pixel minute counter, and a four-pixel second counter (fifteen seconds each).
    pub const DEFAULT: Self = Self {
        total: 165,
        hours_start: 6,
        total_hours: 13,
        interval_hours: 12,
        interval_minutes: 5,
        interval_seconds: 4,
        seconds_representation: 15,
        colors: ClockColors::DEFAULT,
    };

    /// Spacing of half-hour ticks.
    #[must_use]
    pub const fn interval_halves(&self) -> u16 {
        self.interval_hours / 2
    }

    /// Spacing of quarter-hour ticks.
    #[must_use]
    pub const fn interval_quarters(&self) -> u16 {
        self.interval_hours / 4
    }

    /// Whether the face is lit at `hour`.
    #[must_use]
    pub const fn is_active_hour(&self, hour: u8) -> bool {
        let hour = hour as u16;
        let hours_start = self.hours_start as u16;
        hour >= hours_start && hour < hours_start + self.total_hours as u16
    }

    /// One past the last pixel of the second counter.
    #[must_use]
    pub const fn zones_end(&self) -> usize {
        self.total_hours as usize * self.interval_hours as usize
            + self.interval_minutes as usize
            + self.interval_seconds as usize
    }

    /// Check that every sample in the active window renders inside its zone.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.total == 0 {
            return Err(ConfigError::ZeroField("total"));
        }
        if self.total_hours == 0 {
            return Err(ConfigError::ZeroField("total_hours"));
        }
        if self.interval_hours == 0 {
            return Err(ConfigError::ZeroField("interval_hours"));
        }
        if self.interval_minutes == 0 {
            return Err(ConfigError::ZeroField("interval_minutes"));
        }
        if self.interval_seconds == 0 {
            return Err(ConfigError::ZeroField("interval_seconds"));
        }
        if self.seconds_representation == 0 {
            return Err(ConfigError::ZeroField("seconds_representation"));
        }
        // quarters would be zero
        if self.interval_hours < 4 {
            return Err(ConfigError::TooFewHourPixels(self.interval_hours));
        }
        if self.hours_start as u16 + self.total_hours as u16 > 24 {
            return Err(ConfigError::WindowPastMidnight {
                hours_start: self.hours_start,
                total_hours: self.total_hours,
            });
        }
        if self.interval_hours as u32 * self.interval_minutes as u32 != 60 {
            return Err(ConfigError::HoursNotProportional {
                interval_hours: self.interval_hours,
                interval_minutes: self.interval_minutes,
            });
        }
        if self.interval_hours % 4 != 0 {
            return Err(ConfigError::TicksNotEven(self.interval_hours));
        }
        if (self.interval_seconds as u32) * (self.seconds_representation as u32) < 60 {
            return Err(ConfigError::SecondsDoNotCoverMinute {
                interval_seconds: self.interval_seconds,
                seconds_representation: self.seconds_representation,
            });
        }
        if self.zones_end() > self.total as usize {
            return Err(ConfigError::ZonesExceedStrip {
                zones_end: self.zones_end(),
                total: self.total,
            });
        }
        Ok(())
    }

    /// Decode a configuration stored with [`ClockConfig::to_postcard`] and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigCodec`](crate::Error::ConfigCodec) if the bytes do not decode,
    /// or [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the decoded value is rejected.
    pub fn from_postcard(bytes: &[u8]) -> Result<Self> {
        let config: Self = postcard::from_bytes(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Encode this configuration into `buffer`, returning the used prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigCodec`](crate::Error::ConfigCodec) if `buffer` is too small.
    pub fn to_postcard<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8]> {
        Ok(postcard::to_slice(self, buffer)?)
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// `smart_leds` colors have no serde support of their own.
mod rgb_tuple {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::led_strip::Rgb;

    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        (color.r, color.g, color.b).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let (r, g, b) = <(u8, u8, u8)>::deserialize(deserializer)?;
        Ok(Rgb::new(r, g, b))
    }
}
