//! The clock's poll-and-dispatch state machine and its device loop.
//!
//! [`ClockFace`] decides, for each time sample, whether to repaint, blank, or do nothing.
//! [`StripClock`] connects it to a real-time clock and an LED strip.
//!
//! # Example: Drive a Clock Face by Hand
//!
//! ```
//! use strip_clock::clock_config::ClockConfig;
//! use strip_clock::clock_face::{ClockFace, FaceAction};
//! use strip_clock::clock_time::ClockTime;
//!
//! let mut face = ClockFace::<165>::new(&ClockConfig::DEFAULT)?;
//!
//! assert!(matches!(face.update(ClockTime::new(7, 5, 30)), FaceAction::Render(_)));
//! assert_eq!(face.update(ClockTime::new(7, 5, 30)), FaceAction::Unchanged);
//!
//! // Before 06:00 the strip is cleared once, then left alone.
//! assert_eq!(face.update(ClockTime::new(5, 0, 0)), FaceAction::Blank);
//! assert_eq!(face.update(ClockTime::new(5, 0, 1)), FaceAction::AlreadyBlank);
//! # Ok::<(), strip_clock::Error>(())
//! ```

use embassy_time::Duration;

use crate::Result;
use crate::clock_config::ClockConfig;
use crate::clock_render::{FillBoundaries, render};
use crate::clock_time::ClockTime;
use crate::led_strip::Frame1d;
use crate::rtc::Rtc;
use crate::zone_layout::ZoneLayout;

/// How often [`StripClock::run`] samples the real-time clock by default.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where the face is in its life.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceState {
    /// No sample has been seen yet.
    NeverRendered,
    /// The last accepted sample was inside the active window and was drawn.
    Active,
    /// The last accepted sample was outside the active window and the strip is dark.
    Blanked,
}

/// What [`ClockFace::update`] did with a sample.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaceAction {
    /// Same sample as last time; nothing to do.
    Unchanged,
    /// The frame was repainted for a new in-range sample.
    Render(FillBoundaries),
    /// The frame was cleared for the first out-of-range sample.
    Blank,
    /// A new out-of-range sample arrived while already dark.
    AlreadyBlank,
}

impl FaceAction {
    /// Whether the frame changed and must be written to the strip.
    #[must_use]
    pub const fn needs_flush(self) -> bool {
        matches!(self, Self::Render(_) | Self::Blank)
    }
}

/// The frame shown on an `N`-pixel strip, together with the last sample and blanking latch.
#[derive(Clone, Debug)]
pub struct ClockFace<const N: usize> {
    layout: ZoneLayout<N>,
    frame: Frame1d<N>,
    last_sample: Option<ClockTime>,
    state: FaceState,
}

impl<const N: usize> ClockFace<N> {
    /// Lay out `config` and start with a dark frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if `config` is rejected.
    pub fn new(config: &ClockConfig) -> Result<Self> {
        Ok(Self::from_layout(ZoneLayout::new(config)?))
    }

    /// Start with a dark frame on an existing layout.
    #[must_use]
    pub const fn from_layout(layout: ZoneLayout<N>) -> Self {
        Self {
            layout,
            frame: Frame1d::new(),
            last_sample: None,
            state: FaceState::NeverRendered,
        }
    }

    /// Accept one time sample.
    ///
    /// A sample equal to the previous one is ignored. Otherwise an in-range hour repaints the
    /// frame, and an out-of-range hour clears it unless it is already clear.
    pub fn update(&mut self, time: ClockTime) -> FaceAction {
        if self.last_sample == Some(time) {
            return FaceAction::Unchanged;
        }
        self.last_sample = Some(time);

        if self.layout.config().is_active_hour(time.hour) {
            let boundaries = render(&self.layout, time, &mut self.frame);
            self.state = FaceState::Active;
            FaceAction::Render(boundaries)
        } else if self.is_blanked() {
            FaceAction::AlreadyBlank
        } else {
            self.frame = Frame1d::new();
            self.state = FaceState::Blanked;
            FaceAction::Blank
        }
    }

    /// Drop the last sample so the next one is dispatched again.
    ///
    /// Used when the frame from the last [`update`](Self::update) never reached the strip. A
    /// blank that was not shown also releases the latch.
    pub fn forget_sample(&mut self) {
        self.last_sample = None;
        if self.is_blanked() {
            self.state = FaceState::NeverRendered;
        }
    }

    /// The frame as it should currently appear on the strip.
    #[must_use]
    pub const fn frame(&self) -> &Frame1d<N> {
        &self.frame
    }

    /// The layout the face draws with.
    #[must_use]
    pub const fn layout(&self) -> &ZoneLayout<N> {
        &self.layout
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> FaceState {
        self.state
    }

    /// The most recent sample, accepted or not.
    #[must_use]
    pub const fn last_sample(&self) -> Option<ClockTime> {
        self.last_sample
    }

    /// The already-off latch.
    #[must_use]
    pub const fn is_blanked(&self) -> bool {
        matches!(self.state, FaceState::Blanked)
    }
}

/// Something that can show a whole frame at once.
pub trait FrameSink<const N: usize> {
    /// Show `frame`, returning once it is fully sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be shown.
    async fn write_frame(&self, frame: Frame1d<N>) -> Result<()>;
}

impl<T: FrameSink<N> + ?Sized, const N: usize> FrameSink<N> for &T {
    async fn write_frame(&self, frame: Frame1d<N>) -> Result<()> {
        (**self).write_frame(frame).await
    }
}

/// A [`ClockFace`] fed by a real-time clock and shown on a [`FrameSink`].
pub struct StripClock<R, S, const N: usize> {
    rtc: R,
    sink: S,
    face: ClockFace<N>,
}

impl<R: Rtc, S: FrameSink<N>, const N: usize> StripClock<R, S, N> {
    /// Combine a started real-time clock, a strip, and a face.
    #[must_use]
    pub const fn new(rtc: R, sink: S, face: ClockFace<N>) -> Self {
        Self { rtc, sink, face }
    }

    /// The face being shown.
    #[must_use]
    pub const fn face(&self) -> &ClockFace<N> {
        &self.face
    }

    /// Read the time once and flush the frame if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the real-time clock cannot be read or the frame cannot be written.
    /// A failed read leaves the face untouched. A failed write forgets the sample, so the next
    /// poll redraws or blanks again.
    pub async fn poll_once(&mut self) -> Result<FaceAction> {
        let now = ClockTime::from(self.rtc.now().await?);
        let action = self.face.update(now);
        if action.needs_flush() {
            if let Err(err) = self.sink.write_frame(*self.face.frame()).await {
                self.face.forget_sample();
                return Err(err);
            }
        }
        Ok(action)
    }

    /// Poll forever, logging each render and blank.
    ///
    /// Errors are logged and the loop carries on with the next sample.
    #[cfg(feature = "arm")]
    pub async fn run(&mut self, poll_interval: Duration) -> ! {
        loop {
            match self.poll_once().await {
                Ok(FaceAction::Render(_)) => {
                    if let Some(time) = self.face.last_sample() {
                        defmt::info!("{}:{}:{}", time.hour, time.minute, time.second);
                    }
                }
                Ok(FaceAction::Blank) => defmt::info!("Outside clock hours, strip cleared"),
                Ok(FaceAction::AlreadyBlank) => defmt::trace!("Outside clock hours"),
                Ok(FaceAction::Unchanged) => {}
                Err(err) => defmt::warn!("Clock poll failed: {}", defmt::Display2Format(&err)),
            }
            embassy_time::Timer::after(poll_interval).await;
        }
    }
}
