#![allow(missing_docs)]
//! Test pattern for the clock's strip: red, green, then blue wipes, followed by a white marquee.
#![no_std]
#![no_main]

use core::{convert::Infallible, panic};

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use strip_clock::{
    Result,
    led_strip::{Current, Frame1d, colors, led_strip},
    strip_patterns::{THEATER_CHASE_REPEATS, color_wipe, theater_chase},
};
use {defmt_rtt as _, panic_probe as _};

led_strip! {
    LedStripClock {
        pin: PIN_6,
        len: 165,
        max_current: Current::Milliamps(1940),
        max_frames: 3,
    }
}

const WIPE_STEP: Duration = Duration::from_millis(50);
const CHASE_STEP: Duration = Duration::from_millis(50);

#[embassy_executor::main]
async fn main(spawner: Spawner) -> ! {
    let err = inner_main(spawner).await.unwrap_err();
    panic!("{err}");
}

async fn inner_main(spawner: Spawner) -> Result<Infallible> {
    let p = embassy_rp::init(Default::default());
    let led_strip = LedStripClock::new(p.PIN_6, p.PIO0, p.DMA_CH0, spawner)?;

    let mut frame = Frame1d::new();
    for color in [colors::RED, colors::GREEN, colors::BLUE] {
        for step in color_wipe(frame, color) {
            led_strip.write_frame(step).await?;
            frame = step;
            Timer::after(WIPE_STEP).await;
        }
    }

    let chase = theater_chase(colors::WHITE);
    for _ in 0..THEATER_CHASE_REPEATS {
        for step in chase {
            led_strip.write_frame(step).await?;
            Timer::after(CHASE_STEP).await;
        }
    }

    // Keep the marquee going without this task's help.
    led_strip
        .animate(chase.map(|step| (step, CHASE_STEP)))
        .await?;
    core::future::pending().await
}
