//! Zone boundaries and the static tick pattern derived from a [`ClockConfig`].
//!
//! The layout is computed once at startup and never changes. It knows nothing about the current
//! time; see [`clock_render`](crate::clock_render) for that.

use core::ops::Range;

use crate::clock_config::{ClockColors, ClockConfig};
use crate::led_strip::{Frame1d, Rgb};
use crate::{ConfigError, Result};

/// How an hour-track pixel is marked when it has not elapsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Start of an hour.
    Hour,
    /// Half past.
    Half,
    /// Quarter past or quarter to.
    Quarter,
    /// No tick.
    Plain,
}

impl Tick {
    /// Classify hour-track pixel `index`, checking hour, then half, then quarter.
    ///
    /// Index 0 is always [`Tick::Hour`].
    ///
    /// ```
    /// use strip_clock::zone_layout::Tick;
    ///
    /// let ticks: Vec<Tick> = (0..12).map(|index| Tick::classify(index, 12)).collect();
    /// assert_eq!(ticks[0], Tick::Hour);
    /// assert_eq!(ticks[3], Tick::Quarter);
    /// assert_eq!(ticks[6], Tick::Half);
    /// assert_eq!(ticks[9], Tick::Quarter);
    /// assert_eq!(ticks[1], Tick::Plain);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `interval_hours` is less than 4, which would make the quarter spacing zero.
    #[must_use]
    pub const fn classify(index: usize, interval_hours: u16) -> Self {
        assert!(interval_hours >= 4, "interval_hours must be at least 4");
        let interval_hours = interval_hours as usize;
        if index % interval_hours == 0 {
            Self::Hour
        } else if index % (interval_hours / 2) == 0 {
            Self::Half
        } else if index % (interval_hours / 4) == 0 {
            Self::Quarter
        } else {
            Self::Plain
        }
    }
}

impl ClockColors {
    /// Color of a pixel with this tick mark that has not elapsed.
    #[must_use]
    pub const fn tick_color(&self, tick: Tick) -> Rgb {
        match tick {
            Tick::Hour => self.hour_tick,
            Tick::Half => self.half_tick,
            Tick::Quarter => self.quarter_tick,
            Tick::Plain => self.future,
        }
    }
}

/// The three zones of an `N`-pixel clock face and its time-independent colors.
///
/// ```
/// use strip_clock::clock_config::ClockConfig;
/// use strip_clock::zone_layout::ZoneLayout;
///
/// let layout = ZoneLayout::<165>::new(&ClockConfig::DEFAULT)?;
/// assert_eq!(layout.clock_zone(), 0..156);
/// assert_eq!(layout.minutes_zone(), 156..161);
/// assert_eq!(layout.seconds_zone(), 161..165);
/// # Ok::<(), strip_clock::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ZoneLayout<const N: usize> {
    config: ClockConfig,
    clock: Range<usize>,
    minutes: Range<usize>,
    seconds: Range<usize>,
    static_colors: Frame1d<N>,
}

impl<const N: usize> ZoneLayout<N> {
    /// Validate `config` and lay it out on an `N`-pixel strip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the configuration is
    /// rejected by [`ClockConfig::validate`] or `config.total` is not `N`.
    pub fn new(config: &ClockConfig) -> Result<Self> {
        config.validate()?;
        if usize::from(config.total) != N {
            return Err(ConfigError::PixelCountMismatch {
                total: config.total,
                len: N,
            }
            .into());
        }

        let clock_end = usize::from(config.total_hours) * usize::from(config.interval_hours);
        let minutes_end = clock_end + usize::from(config.interval_minutes);
        let seconds_end = minutes_end + usize::from(config.interval_seconds);

        // Pixels past the second counter stay dark.
        let mut static_colors = Frame1d::new();
        for (index, pixel) in static_colors.iter_mut().enumerate().take(clock_end) {
            *pixel = config
                .colors
                .tick_color(Tick::classify(index, config.interval_hours));
        }
        for pixel in static_colors
            .iter_mut()
            .take(seconds_end)
            .skip(clock_end)
        {
            *pixel = config.colors.future;
        }

        Ok(Self {
            config: *config,
            clock: 0..clock_end,
            minutes: clock_end..minutes_end,
            seconds: minutes_end..seconds_end,
            static_colors,
        })
    }

    /// The configuration this layout was built from.
    #[must_use]
    pub const fn config(&self) -> &ClockConfig {
        &self.config
    }

    /// Hour-track pixels.
    #[must_use]
    pub fn clock_zone(&self) -> Range<usize> {
        self.clock.clone()
    }

    /// Minute-counter pixels.
    #[must_use]
    pub fn minutes_zone(&self) -> Range<usize> {
        self.minutes.clone()
    }

    /// Second-counter pixels.
    #[must_use]
    pub fn seconds_zone(&self) -> Range<usize> {
        self.seconds.clone()
    }

    /// Colors of every pixel when no time has elapsed.
    #[must_use]
    pub const fn static_colors(&self) -> &Frame1d<N> {
        &self.static_colors
    }

    /// Static color of pixel `index`, or `None` past the end of the strip.
    #[must_use]
    pub fn static_color(&self, index: usize) -> Option<Rgb> {
        self.static_colors.get(index).copied()
    }

    /// Dump every configuration and layout field.
    #[cfg(feature = "defmt")]
    pub fn log(&self) {
        let config = &self.config;
        let colors = &config.colors;
        defmt::info!("                 total: {}", config.total);
        defmt::info!("           total_hours: {}", config.total_hours);
        defmt::info!("           hours_start: {}", config.hours_start);
        defmt::info!("        interval_hours: {}", config.interval_hours);
        defmt::info!("       interval_halves: {}", config.interval_halves());
        defmt::info!("     interval_quarters: {}", config.interval_quarters());
        defmt::info!("            clock_zone: {}..{}", self.clock.start, self.clock.end);
        defmt::info!("      interval_minutes: {}", config.interval_minutes);
        defmt::info!("          minutes_zone: {}..{}", self.minutes.start, self.minutes.end);
        defmt::info!("      interval_seconds: {}", config.interval_seconds);
        defmt::info!("seconds_representation: {}", config.seconds_representation);
        defmt::info!("          seconds_zone: {}..{}", self.seconds.start, self.seconds.end);
        log_color("             hour_tick", colors.hour_tick);
        log_color("             half_tick", colors.half_tick);
        log_color("          quarter_tick", colors.quarter_tick);
        log_color("                future", colors.future);
        log_color("                  past", colors.past);
        log_color("        minute_counter", colors.minute_counter);
        log_color("        second_counter", colors.second_counter);
    }
}

#[cfg(feature = "defmt")]
fn log_color(label: &str, color: Rgb) {
    defmt::info!("{=str}: ({}, {}, {})", label, color.r, color.g, color.b);
}
