//! Paint one time sample onto a clock-face frame.

use core::ops::Range;

use crate::clock_time::ClockTime;
use crate::led_strip::{Frame1d, Rgb};
use crate::zone_layout::ZoneLayout;

/// Per-zone pixel indices below which time has elapsed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FillBoundaries {
    /// Hour-track boundary: whole hours since `hours_start` plus elapsed minute steps.
    pub time_index: usize,
    /// Minute-counter boundary: minutes into the current hour-track pixel.
    pub minute_index: usize,
    /// Second-counter boundary: elapsed second steps.
    pub second_index: usize,
}

/// Compute the fill boundaries of `time` on `layout`.
///
/// `time.hour` must be in the active window; see
/// [`ClockConfig::is_active_hour`](crate::clock_config::ClockConfig::is_active_hour).
///
/// ```
/// use strip_clock::clock_config::ClockConfig;
/// use strip_clock::clock_render::fill_boundaries;
/// use strip_clock::clock_time::ClockTime;
/// use strip_clock::zone_layout::ZoneLayout;
///
/// let layout = ZoneLayout::<165>::new(&ClockConfig::DEFAULT)?;
/// let boundaries = fill_boundaries(&layout, ClockTime::new(7, 5, 30));
/// assert_eq!(boundaries.time_index, 13);
/// assert_eq!(boundaries.minute_index, layout.minutes_zone().start);
/// assert_eq!(boundaries.second_index, layout.seconds_zone().start + 2);
/// # Ok::<(), strip_clock::Error>(())
/// ```
///
/// # Panics
///
/// Panics if `time.hour` is before `hours_start` or a boundary falls outside its zone.
#[must_use]
pub fn fill_boundaries<const N: usize>(layout: &ZoneLayout<N>, time: ClockTime) -> FillBoundaries {
    let config = layout.config();
    assert!(
        config.is_active_hour(time.hour),
        "hour must be within the active window"
    );
    let hours_elapsed = usize::from(time.hour - config.hours_start);
    let minute = usize::from(time.minute);
    let interval_minutes = usize::from(config.interval_minutes);

    let boundaries = FillBoundaries {
        time_index: layout.clock_zone().start
            + hours_elapsed * usize::from(config.interval_hours)
            + minute / interval_minutes,
        minute_index: layout.minutes_zone().start + minute % interval_minutes,
        second_index: layout.seconds_zone().start
            + usize::from(time.second) / usize::from(config.seconds_representation),
    };
    assert_within(boundaries.time_index, &layout.clock_zone());
    assert_within(boundaries.minute_index, &layout.minutes_zone());
    assert_within(boundaries.second_index, &layout.seconds_zone());
    boundaries
}

/// Write every zone pixel of `frame` for `time` and return the boundaries used.
///
/// Pixels below a zone's boundary get that zone's elapsed color; the rest get their static
/// color from the layout. Pixels past the second counter are not touched.
///
/// # Panics
///
/// Same conditions as [`fill_boundaries`].
pub fn render<const N: usize>(
    layout: &ZoneLayout<N>,
    time: ClockTime,
    frame: &mut Frame1d<N>,
) -> FillBoundaries {
    let boundaries = fill_boundaries(layout, time);
    let colors = &layout.config().colors;
    let static_colors = layout.static_colors();

    fill_zone(
        frame,
        static_colors,
        layout.clock_zone(),
        boundaries.time_index,
        colors.past,
    );
    fill_zone(
        frame,
        static_colors,
        layout.minutes_zone(),
        boundaries.minute_index,
        colors.minute_counter,
    );
    fill_zone(
        frame,
        static_colors,
        layout.seconds_zone(),
        boundaries.second_index,
        colors.second_counter,
    );
    boundaries
}

fn fill_zone<const N: usize>(
    frame: &mut Frame1d<N>,
    static_colors: &Frame1d<N>,
    zone: Range<usize>,
    boundary: usize,
    elapsed: Rgb,
) {
    let pixels = frame.iter_mut().zip(static_colors.iter()).enumerate();
    for (index, (pixel, static_color)) in pixels.take(zone.end).skip(zone.start) {
        *pixel = if index < boundary {
            elapsed
        } else {
            *static_color
        };
    }
}

// A boundary equal to `zone.end` means the whole zone has elapsed.
fn assert_within(boundary: usize, zone: &Range<usize>) {
    assert!(
        zone.start <= boundary && boundary <= zone.end,
        "fill boundary {boundary} outside zone {}..{}",
        zone.start,
        zone.end
    );
}
