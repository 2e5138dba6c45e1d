//! Decorative frame sequences for testing a strip, separate from the clock.
//!
//! ```
//! use strip_clock::led_strip::{Frame1d, colors};
//! use strip_clock::strip_patterns::{color_wipe, theater_chase};
//!
//! let last = color_wipe(Frame1d::<6>::new(), colors::RED).last();
//! assert_eq!(last, Some(Frame1d::filled(colors::RED)));
//!
//! let [first, ..] = theater_chase::<6>(colors::WHITE);
//! assert_eq!(first[3], colors::WHITE);
//! assert_eq!(first[4], colors::BLACK);
//! ```

use crate::led_strip::{Frame1d, Rgb};

/// How many times the demo plays the three [`theater_chase`] frames.
pub const THEATER_CHASE_REPEATS: usize = 10;

/// Paint `color` over `start` one pixel at a time.
///
/// Frame `i` has pixels `0..=i` set to `color` and the rest as in `start`, so the iterator yields
/// `N` frames. `start` is not cleared first.
pub fn color_wipe<const N: usize>(
    start: Frame1d<N>,
    color: Rgb,
) -> impl Iterator<Item = Frame1d<N>> {
    (0..N).scan(start, move |frame, index| {
        if let Some(pixel) = frame.get_mut(index) {
            *pixel = color;
        }
        Some(*frame)
    })
}

/// Marquee frames: frame `offset` lights every third pixel starting at `offset`.
#[must_use]
pub fn theater_chase<const N: usize>(color: Rgb) -> [Frame1d<N>; 3] {
    core::array::from_fn(|offset| {
        let mut frame = Frame1d::new();
        for pixel in frame.iter_mut().skip(offset).step_by(3) {
            *pixel = color;
        }
        frame
    })
}
