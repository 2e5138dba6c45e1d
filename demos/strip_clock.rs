#![allow(missing_docs)]
//! A 165-pixel clock face lit from 06:00 to 19:00, with its time kept by a DS1307.
//!
//! Wiring: strip data on GPIO 6, DS1307 SDA on GPIO 4 and SCL on GPIO 5.
#![no_std]
#![no_main]

use core::{convert::Infallible, panic};

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use strip_clock::{
    Result,
    clock_config::ClockConfig,
    clock_face::{ClockFace, POLL_INTERVAL, StripClock},
    clock_time::build_local_time,
    irqs::I2c0Irqs,
    led_strip::{Current, Frame1d, Gamma, led_strip},
    rtc::{Ds1307, RtcStart, start_rtc},
};
use {defmt_rtt as _, panic_probe as _};

// Brightness about 1/5 of full.
led_strip! {
    LedStripClock {
        pin: PIN_6,
        len: 165,
        max_current: Current::Milliamps(1940),
        gamma: Gamma::Linear,
        max_frames: 0,
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());

    let i2c = I2c::new_async(p.I2C0, p.PIN_5, p.PIN_4, I2c0Irqs, i2c::Config::default());
    let mut rtc = Ds1307::new(i2c);
    match start_rtc(&mut rtc, build_local_time()?).await? {
        RtcStart::Running => info!("RTC is running"),
        RtcStart::Seeded(seed) => info!(
            "RTC was not running, set to build time {}-{}-{} {}:{}:{}",
            seed.year(),
            u8::from(seed.month()),
            seed.day(),
            seed.hour(),
            seed.minute(),
            seed.second()
        ),
    }

    let face = ClockFace::<{ LedStripClock::LEN }>::new(&ClockConfig::DEFAULT)?;
    face.layout().log();

    let led_strip = LedStripClock::new(p.PIN_6, p.PIO0, p.DMA_CH0, spawner)?;
    led_strip.write_frame(Frame1d::new()).await?;

    let mut clock = StripClock::new(rtc, &**led_strip, face);
    clock.run(POLL_INTERVAL).await
}
