#![no_std]
#![no_main]
#![allow(dead_code, reason = "types are only named, never constructed")]
//! Check that `led_strip!` honors the visibility written before the struct name.

use defmt_rtt as _;
use panic_probe as _;
use strip_clock::led_strip;

// No visibility: private to this module
led_strip! {
    LedStripDefault {
        pin: PIN_3,
        len: 48,
    }
}

mod explicit_pub {
    use strip_clock::led_strip;
    use strip_clock::led_strip::{Current, Gamma};

    led_strip! {
        pub LedStripExplicitPub {
            pin: PIN_4,
            len: 165,
            pio: PIO1,
            dma: DMA_CH1,
            max_current: Current::Milliamps(1940),
            gamma: Gamma::Linear,
            max_frames: 3,
        }
    }
}

mod pub_crate {
    use strip_clock::led_strip;

    led_strip! {
        pub(crate) LedStripPubCrate {
            pin: PIN_5,
            len: 12,
            max_frames: 0,
        }
    }
}

mod module_visibility {
    use strip_clock::led_strip;

    led_strip! {
        pub(super) LedStripModulePrivate {
            pin: PIN_7,
            len: 16,
        }
    }
}

#[cortex_m_rt::entry]
fn main() -> ! {
    type _Default = LedStripDefault;
    type _ExplicitPub = explicit_pub::LedStripExplicitPub;
    type _PubCrate = pub_crate::LedStripPubCrate;
    type _ModulePrivate = module_visibility::LedStripModulePrivate;

    const _: () = assert!(explicit_pub::LedStripExplicitPub::MAX_BRIGHTNESS == 49);
    const _: () = assert!(pub_crate::LedStripPubCrate::MAX_FRAMES == 0);

    loop {
        cortex_m::asm::wfi();
    }
}
