//! An analog clock face on a WS2812 LED strip, for Pico 1 and 2, reading time from a DS1307.
//!
//! The strip is split into three tracks:
//!
//! - **Hour track:** a fixed number of pixels per displayed hour, with tick marks at each hour,
//!   half hour, and quarter hour. Elapsed pixels turn the "past" color.
//! - **Minute counter:** counts minutes within the current hour-track pixel.
//! - **Second counter:** counts seconds within the current minute, several seconds per pixel.
//!
//! Outside the configured hours the strip is dark.
//!
//! # Glossary
//!
//! - **Zone layout:** the three tracks' pixel ranges plus the tick pattern, computed once from a
//!   [`ClockConfig`](clock_config::ClockConfig). See [`zone_layout`].
//! - **Fill boundary:** the first not-yet-elapsed pixel of a track. See [`clock_render`].
//! - **Active window:** the hours during which the face is lit.
//! - **PIO ([Programmable I/O](https://medium.com/data-science/nine-pico-pio-wats-with-rust-part-1-9d062067dc25)):**
//!   Pico 1 has 2. Pico 2 has 3. The LED strip is driven by one PIO state machine.
#![cfg_attr(not(any(test, feature = "host")), no_std)]
#![allow(async_fn_in_trait, reason = "single-threaded embedded")]

#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

#[cfg(all(feature = "arm", not(any(feature = "pico1", feature = "pico2"))))]
compile_error!("The 'arm' feature needs a board feature: 'pico1' or 'pico2'");

#[cfg(all(feature = "arm", feature = "host"))]
compile_error!("Cannot enable both 'arm' and 'host' features simultaneously");

// Interrupt bindings shared by the LED strip and the RTC bus
#[cfg(feature = "arm")]
#[doc(hidden)]
pub mod irqs;

pub mod clock_config;
pub mod clock_face;
pub mod clock_render;
pub mod clock_time;
mod error;
pub mod led_strip;
pub mod rtc;
pub mod strip_patterns;
#[cfg(feature = "host")]
pub mod to_png;
pub mod zone_layout;

// Re-export error types and result (used throughout)
pub use crate::error::{ConfigError, Error, Result};
