//! Driver for the Maxim DS1307 I2C real-time clock.
//!
//! The seven timekeeping registers start at `0x00` and hold BCD values:
//!
//! | Register | Contents                                          |
//! |----------|---------------------------------------------------|
//! | `0x00`   | seconds; bit 7 is clock halt (CH)                 |
//! | `0x01`   | minutes                                           |
//! | `0x02`   | hours; bit 6 selects 12-hour mode, bit 5 is PM    |
//! | `0x03`   | weekday, 1-7                                      |
//! | `0x04`   | day of month                                      |
//! | `0x05`   | month                                             |
//! | `0x06`   | year within 2000-2099                             |

use embedded_hal_async::i2c::I2c;
use time::{Date, Month, PrimitiveDateTime, Time};

use super::Rtc;
use crate::{Error, Result};

/// Fixed 7-bit I2C address of the DS1307.
pub const DS1307_ADDRESS: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const CLOCK_HALT: u8 = 0x80;
const HOUR_12: u8 = 0x40;
const HOUR_PM: u8 = 0x20;
const YEAR_BASE: i32 = 2000;

/// A DS1307 on an async I2C bus.
pub struct Ds1307<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Ds1307<I2C> {
    /// Wrap the bus the DS1307 is on.
    #[must_use]
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn read_registers<const LEN: usize>(&mut self) -> Result<[u8; LEN]> {
        let mut registers = [0u8; LEN];
        self.i2c
            .write_read(DS1307_ADDRESS, &[REG_SECONDS], &mut registers)
            .await
            .map_err(|_| Error::RtcBus)?;
        Ok(registers)
    }
}

impl<I2C: I2c> Rtc for Ds1307<I2C> {
    async fn begin(&mut self) -> Result<()> {
        self.read_registers::<1>()
            .await
            .map(|_| ())
            .map_err(|_| Error::RtcNotFound)
    }

    async fn is_running(&mut self) -> Result<bool> {
        let [seconds] = self.read_registers::<1>().await?;
        Ok(seconds & CLOCK_HALT == 0)
    }

    async fn adjust(&mut self, date_time: PrimitiveDateTime) -> Result<()> {
        let year = date_time
            .year()
            .checked_sub(YEAR_BASE)
            .and_then(|year| u8::try_from(year).ok())
            .filter(|year| *year < 100)
            .ok_or(Error::RtcOutOfRange)?;
        // Clock halt stays clear so the oscillator starts.
        let frame = [
            REG_SECONDS,
            to_bcd(date_time.second()),
            to_bcd(date_time.minute()),
            to_bcd(date_time.hour()),
            to_bcd(date_time.weekday().number_from_sunday()),
            to_bcd(date_time.day()),
            to_bcd(u8::from(date_time.month())),
            to_bcd(year),
        ];
        self.i2c
            .write(DS1307_ADDRESS, &frame)
            .await
            .map_err(|_| Error::RtcBus)
    }

    async fn now(&mut self) -> Result<PrimitiveDateTime> {
        let [seconds, minutes, hours, _weekday, day, month, year] =
            self.read_registers::<7>().await?;
        decode(seconds, minutes, hours, day, month, year)
    }
}

fn decode(
    seconds: u8,
    minutes: u8,
    hours: u8,
    day: u8,
    month: u8,
    year: u8,
) -> Result<PrimitiveDateTime> {
    let second = from_bcd(seconds & !CLOCK_HALT)?;
    let minute = from_bcd(minutes & 0x7F)?;
    let hour = if hours & HOUR_12 == 0 {
        from_bcd(hours & 0x3F)?
    } else {
        let hour_12 = from_bcd(hours & 0x1F)?;
        if !(1..=12).contains(&hour_12) {
            return Err(Error::RtcInvalidData);
        }
        let pm_offset = if hours & HOUR_PM == 0 { 0 } else { 12 };
        hour_12 % 12 + pm_offset
    };
    let day = from_bcd(day & 0x3F)?;
    let month = Month::try_from(from_bcd(month & 0x1F)?).map_err(|_| Error::RtcInvalidData)?;
    let year = YEAR_BASE + i32::from(from_bcd(year)?);

    let date = Date::from_calendar_date(year, month, day).map_err(|_| Error::RtcInvalidData)?;
    let time = Time::from_hms(hour, minute, second).map_err(|_| Error::RtcInvalidData)?;
    Ok(PrimitiveDateTime::new(date, time))
}

const fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

fn from_bcd(bcd: u8) -> Result<u8> {
    let (tens, ones) = (bcd >> 4, bcd & 0x0F);
    if tens > 9 || ones > 9 {
        return Err(Error::RtcInvalidData);
    }
    Ok(tens * 10 + ones)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bcd_round_trips_two_digit_values() {
        assert_eq!(to_bcd(59), 0x59);
        assert_eq!(from_bcd(0x59).ok(), Some(59));
        assert_eq!(to_bcd(7), 0x07);
    }

    #[test]
    fn bcd_rejects_hex_digits() {
        assert!(matches!(from_bcd(0x5A), Err(Error::RtcInvalidData)));
        assert!(matches!(from_bcd(0xA0), Err(Error::RtcInvalidData)));
    }

    #[test]
    fn twelve_hour_mode_maps_to_day_hours() {
        let midnight = decode(0, 0, HOUR_12 | 0x12, 1, 1, 0x24).map(|dt| dt.hour());
        let noon = decode(0, 0, HOUR_12 | HOUR_PM | 0x12, 1, 1, 0x24).map(|dt| dt.hour());
        let evening = decode(0, 0, HOUR_12 | HOUR_PM | 0x07, 1, 1, 0x24).map(|dt| dt.hour());
        assert_eq!(midnight.ok(), Some(0));
        assert_eq!(noon.ok(), Some(12));
        assert_eq!(evening.ok(), Some(19));
    }

    #[test]
    fn halted_seconds_still_decode() {
        let date_time = decode(CLOCK_HALT | 0x42, 0x30, 0x06, 0x15, 0x03, 0x25);
        assert_eq!(date_time.map(|dt| (dt.hour(), dt.minute(), dt.second())).ok(), Some((6, 30, 42)));
    }
}
