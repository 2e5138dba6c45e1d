#![allow(missing_docs)]
use embassy_futures::block_on;
use embedded_hal_async::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};
use strip_clock::Error;
use strip_clock::rtc::{DS1307_ADDRESS, Ds1307, Rtc, RtcStart, start_rtc};
use time::macros::datetime;

/// Register file of a DS1307 behind an I2C bus.
struct FakeDs1307 {
    registers: [u8; 64],
    pointer: usize,
    present: bool,
    fail_transfers: bool,
    writes: usize,
}

impl FakeDs1307 {
    fn new(timekeeping: [u8; 7]) -> Self {
        let mut registers = [0u8; 64];
        registers[..7].copy_from_slice(&timekeeping);
        Self {
            registers,
            pointer: 0,
            present: true,
            fail_transfers: false,
            writes: 0,
        }
    }

    fn absent() -> Self {
        Self {
            present: false,
            ..Self::new([0; 7])
        }
    }
}

impl ErrorType for FakeDs1307 {
    type Error = ErrorKind;
}

impl I2c for FakeDs1307 {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if !self.present || address != DS1307_ADDRESS {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if self.fail_transfers {
            return Err(ErrorKind::Bus);
        }
        for operation in operations {
            match operation {
                Operation::Write(bytes) => {
                    let (register, data) = bytes.split_first().ok_or(ErrorKind::Other)?;
                    self.pointer = usize::from(*register);
                    for byte in data {
                        self.registers[self.pointer % 64] = *byte;
                        self.pointer += 1;
                    }
                    if !data.is_empty() {
                        self.writes += 1;
                    }
                }
                Operation::Read(buffer) => {
                    for byte in buffer.iter_mut() {
                        *byte = self.registers[self.pointer % 64];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

// 2025-03-15 (a Saturday) 07:05:30, 24-hour mode
const SATURDAY_MORNING: [u8; 7] = [0x30, 0x05, 0x07, 0x07, 0x15, 0x03, 0x25];

#[test]
fn missing_chip_is_not_found() {
    let mut rtc = Ds1307::new(FakeDs1307::absent());

    let err = block_on(rtc.begin()).unwrap_err();

    assert!(matches!(err, Error::RtcNotFound));
    assert_eq!(err.to_string(), "Couldn't find RTC");
}

#[test]
fn clock_halt_bit_means_not_running() {
    let mut halted = SATURDAY_MORNING;
    halted[0] |= 0x80;
    let mut stopped = Ds1307::new(FakeDs1307::new(halted));
    let mut running = Ds1307::new(FakeDs1307::new(SATURDAY_MORNING));

    assert!(!block_on(stopped.is_running()).unwrap());
    assert!(block_on(running.is_running()).unwrap());
}

#[test]
fn now_decodes_registers() {
    let mut rtc = Ds1307::new(FakeDs1307::new(SATURDAY_MORNING));

    let now = block_on(rtc.now()).unwrap();

    assert_eq!(now, datetime!(2025-03-15 07:05:30));
}

#[test]
fn now_decodes_twelve_hour_mode() {
    let mut registers = SATURDAY_MORNING;
    registers[2] = 0x40 | 0x20 | 0x11; // 11 PM
    let mut rtc = Ds1307::new(FakeDs1307::new(registers));

    assert_eq!(block_on(rtc.now()).unwrap(), datetime!(2025-03-15 23:05:30));
}

#[test]
fn adjust_writes_bcd_and_starts_oscillator() {
    let mut halted = [0u8; 7];
    halted[0] = 0x80;
    let mut rtc = Ds1307::new(FakeDs1307::new(halted));

    block_on(rtc.adjust(datetime!(2031-12-31 23:59:58))).unwrap();
    let bus = rtc.release();

    // 2031-12-31 is a Wednesday, weekday 4 counting from Sunday
    assert_eq!(&bus.registers[..7], &[0x58, 0x59, 0x23, 0x04, 0x31, 0x12, 0x31]);
    assert_eq!(bus.writes, 1);
}

#[test]
fn adjust_then_now_returns_same_time() {
    let mut rtc = Ds1307::new(FakeDs1307::new([0x80, 0, 0, 1, 1, 1, 0]));
    let date_time = datetime!(2024-02-29 06:00:00);

    block_on(rtc.adjust(date_time)).unwrap();

    assert!(block_on(rtc.is_running()).unwrap());
    assert_eq!(block_on(rtc.now()).unwrap(), date_time);
}

#[test]
fn years_outside_chip_range_are_rejected() {
    let mut rtc = Ds1307::new(FakeDs1307::new(SATURDAY_MORNING));

    let before = block_on(rtc.adjust(datetime!(1999-12-31 23:59:59))).unwrap_err();
    let after = block_on(rtc.adjust(datetime!(2100-01-01 00:00:00))).unwrap_err();

    assert!(matches!(before, Error::RtcOutOfRange));
    assert!(matches!(after, Error::RtcOutOfRange));
    assert_eq!(rtc.release().writes, 0);
}

#[test]
fn impossible_dates_are_invalid_data() {
    let mut registers = SATURDAY_MORNING;
    registers[4] = 0x31; // February 31st
    registers[5] = 0x02;
    let mut rtc = Ds1307::new(FakeDs1307::new(registers));

    assert!(matches!(block_on(rtc.now()), Err(Error::RtcInvalidData)));
}

#[test]
fn bus_failure_after_begin_is_a_bus_error() {
    let mut fake = FakeDs1307::new(SATURDAY_MORNING);
    fake.fail_transfers = true;
    let mut rtc = Ds1307::new(fake);

    assert!(matches!(block_on(rtc.now()), Err(Error::RtcBus)));
}

#[test]
fn start_rtc_seeds_only_a_stopped_clock() {
    let seed = datetime!(2025-06-01 12:00:00);

    let mut running = Ds1307::new(FakeDs1307::new(SATURDAY_MORNING));
    assert_eq!(block_on(start_rtc(&mut running, seed)).unwrap(), RtcStart::Running);
    assert_eq!(block_on(running.now()).unwrap(), datetime!(2025-03-15 07:05:30));

    let mut halted = SATURDAY_MORNING;
    halted[0] |= 0x80;
    let mut stopped = Ds1307::new(FakeDs1307::new(halted));
    assert_eq!(block_on(start_rtc(&mut stopped, seed)).unwrap(), RtcStart::Seeded(seed));
    assert_eq!(block_on(stopped.now()).unwrap(), seed);
}

#[test]
fn start_rtc_fails_fast_without_chip() {
    let mut rtc = Ds1307::new(FakeDs1307::absent());

    let err = block_on(start_rtc(&mut rtc, datetime!(2025-06-01 12:00:00))).unwrap_err();

    assert!(matches!(err, Error::RtcNotFound));
}
