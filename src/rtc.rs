//! A battery-backed real-time clock that the clock face reads its time from.
//!
//! See [`Rtc`] for the operations and [`Ds1307`] for the chip driver.

pub mod ds1307;

pub use ds1307::{DS1307_ADDRESS, Ds1307};

use time::PrimitiveDateTime;

use crate::Result;

/// Operations the clock needs from a real-time clock.
pub trait Rtc {
    /// Check that the device answers on its bus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RtcNotFound`](crate::Error::RtcNotFound) if it does not.
    async fn begin(&mut self) -> Result<()>;

    /// Whether the oscillator is keeping time.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be read.
    async fn is_running(&mut self) -> Result<bool>;

    /// Set the date and time and start the oscillator.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be written or cannot store `date_time`.
    async fn adjust(&mut self, date_time: PrimitiveDateTime) -> Result<()>;

    /// Current local date and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be read or holds an invalid date and time.
    async fn now(&mut self) -> Result<PrimitiveDateTime>;
}

impl<T: Rtc + ?Sized> Rtc for &mut T {
    async fn begin(&mut self) -> Result<()> {
        (**self).begin().await
    }

    async fn is_running(&mut self) -> Result<bool> {
        (**self).is_running().await
    }

    async fn adjust(&mut self, date_time: PrimitiveDateTime) -> Result<()> {
        (**self).adjust(date_time).await
    }

    async fn now(&mut self) -> Result<PrimitiveDateTime> {
        (**self).now().await
    }
}

/// What [`start_rtc`] found.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RtcStart {
    /// The clock was already keeping time and was left alone.
    Running,
    /// The clock was stopped and has been set to this date and time.
    Seeded(PrimitiveDateTime),
}

/// Find the real-time clock and, if it has stopped, set it to `seed`.
///
/// `seed` is usually [`build_local_time`](crate::clock_time::build_local_time).
///
/// # Errors
///
/// Returns [`Error::RtcNotFound`](crate::Error::RtcNotFound) if the device is absent, or any
/// error from reading or seeding it.
pub async fn start_rtc<R: Rtc>(rtc: &mut R, seed: PrimitiveDateTime) -> Result<RtcStart> {
    rtc.begin().await?;
    if rtc.is_running().await? {
        return Ok(RtcStart::Running);
    }
    rtc.adjust(seed).await?;
    Ok(RtcStart::Seeded(seed))
}
