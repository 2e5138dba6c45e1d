//! A device abstraction for the NeoPixel-style (WS2812) LED strip the clock face is drawn on.
//!
//! Pixel data lives in a [`Frame1d`]. The clock builds a whole frame, then hands it to the strip
//! in one `write_frame` call, so the strip never shows half of one time and half of another.
//! On the host, only the frame, color, and lookup-table items are available.
//!
//! # Example: Write a Single Frame1d
//!
//! In this example, we light the first twelve pixels of a 165-pixel strip yellow (one hour of
//! hour track) and leave the rest dark. Here, the generated struct is named `LedStripClock`.
//!
//! ```ignore
//! # #![no_std]
//! # #![no_main]
//! # use panic_probe as _;
//! # use core::convert::Infallible;
//! # use core::default::Default;
//! use strip_clock::{Result, led_strip::{Current, Frame1d, Gamma, colors}};
//! use strip_clock::led_strip;
//!
//! led_strip! {
//!     LedStripClock {
//!         pin: PIN_6,                            // GPIO pin for LED data
//!         len: 165,                              // 165 LEDs
//!         max_current: Current::Milliamps(1940), // About 1/5 brightness
//!         gamma: Gamma::Linear,                  // No color correction
//!     }
//! }
//!
//! # #[embassy_executor::main]
//! # async fn main(spawner: embassy_executor::Spawner) -> ! {
//! #     let err = example(spawner).await.unwrap_err();
//! #     core::panic!("{err}");
//! # }
//! async fn example(spawner: embassy_executor::Spawner) -> Result<Infallible> {
//!     let p = embassy_rp::init(Default::default());
//!     let led_strip = LedStripClock::new(p.PIN_6, p.PIO0, p.DMA_CH0, spawner)?;
//!
//!     let mut frame = Frame1d::new();
//!     for pixel in frame.iter_mut().take(12) {
//!         *pixel = colors::YELLOW;
//!     }
//!     led_strip.write_frame(frame).await?;
//!     core::future::pending().await // run forever
//! }
//! ```

/// Predefined RGB color constants from the `smart_leds` crate.
///
/// Common colors include `RED`, `GREEN`, `BLUE`, `YELLOW`, `WHITE`, `BLACK`, `CYAN`, `MAGENTA`, `ORANGE`, `PURPLE`.
#[doc(inline)]
pub use smart_leds::colors;

use core::ops::{Deref, DerefMut};

use smart_leds::RGB8;

// ============================================================================
// Gamma Correction
// ============================================================================

/// Gamma correction mode for LED strips.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Gamma {
    /// Linear gamma (no correction). Gamma = 1.0
    Linear,
    /// Standard gamma 2.2 correction for perceived brightness.
    Gamma2_2,
}

impl Default for Gamma {
    fn default() -> Self {
        GAMMA_DEFAULT
    }
}

/// Default gamma correction curve for generated LED strips (`Gamma::Gamma2_2`).
pub const GAMMA_DEFAULT: Gamma = Gamma::Gamma2_2;

/// Gamma 2.2 lookup table for 8-bit values.
/// Pre-computed to avoid floating point math: corrected = (value/255)^2.2 * 255
const GAMMA_2_2_TABLE: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2,
    3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 6, 6, 6, 6, 7, 7, 7, 8, 8, 8, 9, 9, 9, 10, 10, 11, 11,
    11, 12, 12, 13, 13, 13, 14, 14, 15, 15, 16, 16, 17, 17, 18, 18, 19, 19, 20, 20, 21, 22, 22, 23,
    23, 24, 25, 25, 26, 26, 27, 28, 28, 29, 30, 30, 31, 32, 33, 33, 34, 35, 35, 36, 37, 38, 39, 39,
    40, 41, 42, 43, 43, 44, 45, 46, 47, 48, 49, 49, 50, 51, 52, 53, 54, 55, 56, 57, 58, 59, 60, 61,
    62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 73, 74, 75, 76, 77, 78, 79, 81, 82, 83, 84, 85, 87, 88,
    89, 90, 91, 93, 94, 95, 97, 98, 99, 100, 102, 103, 105, 106, 107, 109, 110, 111, 113, 114, 116,
    117, 119, 120, 121, 123, 124, 126, 127, 129, 130, 132, 133, 135, 137, 138, 140, 141, 143, 145,
    146, 148, 149, 151, 153, 154, 156, 158, 159, 161, 163, 165, 166, 168, 170, 172, 173, 175, 177,
    179, 181, 182, 184, 186, 188, 190, 192, 194, 196, 197, 199, 201, 203, 205, 207, 209, 211, 213,
    215, 217, 219, 221, 223, 225, 227, 229, 231, 234, 236, 238, 240, 242, 244, 246, 248, 251, 253,
    255,
];

/// Generate a combined gamma correction and brightness scaling lookup table.
///
/// `combo_table[input_value]` is the value sent to the LED after applying `gamma` and scaling
/// by `max_brightness` (the stand-in for a runtime brightness setting).
#[doc(hidden)] // Implementation detail used by macro-generated strip types
#[must_use]
pub const fn generate_combo_table(gamma: Gamma, max_brightness: u8) -> [u8; 256] {
    let mut result = [0u8; 256];
    let mut index = 0;
    while index < 256 {
        let corrected = match gamma {
            Gamma::Linear => index as u8,
            Gamma::Gamma2_2 => GAMMA_2_2_TABLE[index],
        };
        // (value * brightness) / 255
        result[index] = ((corrected as u16 * max_brightness as u16) / 255) as u8;
        index += 1;
    }
    result
}

// ============================================================================
// Current Limiting
// ============================================================================

/// Used by [`led_strip!`] to budget current, which in turn sets the strip's brightness.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Current {
    /// Limit brightness so that every LED at full white stays within this many milliamps.
    ///
    /// A 165-LED strip draws 9900 mA at full brightness (60 mA per LED); `Milliamps(1940)`
    /// caps brightness at 49 of 255, roughly one fifth.
    Milliamps(u16),
    /// No limit; brightness stays at 100%.
    Unlimited,
}

impl Default for Current {
    fn default() -> Self {
        MAX_CURRENT_DEFAULT
    }
}

/// Default current budget for generated LED strips (`Current::Milliamps(250)`).
pub const MAX_CURRENT_DEFAULT: Current = Current::Milliamps(250);

/// Default maximum animation frames for generated LED strips (`16`).
pub const MAX_FRAMES_DEFAULT: usize = 16;

/// Worst-case draw of one WS2812 LED at full white.
const MILLIAMPS_PER_LED: u32 = 60;

impl Current {
    /// Maximum brightness (0-255) that keeps `led_count` LEDs within this budget.
    #[must_use]
    pub const fn max_brightness(self, led_count: usize) -> u8 {
        assert!(led_count > 0, "led_count must be positive");
        match self {
            Self::Milliamps(ma) => {
                let worst_case_ma = led_count as u32 * MILLIAMPS_PER_LED;
                let scale = (ma as u32 * 255) / worst_case_ma;
                if scale > 255 { 255 } else { scale as u8 }
            }
            Self::Unlimited => 255,
        }
    }
}

// ============================================================================
// Frame1d
// ============================================================================

/// RGB color representation re-exported from the `smart_leds` crate.
pub type Rgb = RGB8;

/// [`Rgb`] pixel data for an LED strip.
///
/// Frames deref to `[Rgb; N]`, so pixels can be read and written directly before the frame is
/// passed to the strip's `write_frame` method. [`Frame1d::new`] is the cleared (all off) frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Frame1d<const N: usize>(pub [Rgb; N]);

impl<const N: usize> Frame1d<N> {
    /// Number of LEDs in this frame.
    pub const LEN: usize = N;

    /// Create a new blank (all black) frame.
    #[must_use]
    pub const fn new() -> Self {
        Self([Rgb::new(0, 0, 0); N])
    }

    /// Create a frame filled with a single color.
    #[must_use]
    pub const fn filled(color: Rgb) -> Self {
        Self([color; N])
    }

    /// Copy of this frame passed through a combined gamma/brightness table.
    #[must_use]
    pub fn corrected(&self, combo_table: &[u8; 256]) -> Self {
        let mut corrected = *self;
        for color in corrected.iter_mut() {
            *color = Rgb::new(
                combo_table[usize::from(color.r)],
                combo_table[usize::from(color.g)],
                combo_table[usize::from(color.b)],
            );
        }
        corrected
    }
}

impl<const N: usize> Deref for Frame1d<N> {
    type Target = [Rgb; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> DerefMut for Frame1d<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<const N: usize> From<[Rgb; N]> for Frame1d<N> {
    fn from(array: [Rgb; N]) -> Self {
        Self(array)
    }
}

impl<const N: usize> From<Frame1d<N>> for [Rgb; N] {
    fn from(frame: Frame1d<N>) -> Self {
        frame.0
    }
}

impl<const N: usize> Default for Frame1d<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "arm")]
pub use device::{
    Command, LedStrip, LedStripCommandSignal, LedStripCompletionSignal, LedStripPio,
    LedStripStatic, PioBus, led_strip_driver_loop,
};

#[cfg(feature = "arm")]
mod device {
    use core::cell::RefCell;

    use embassy_futures::select::{Either, select};
    use embassy_rp::pio::{Common, Instance};
    use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program, RgbColorOrder};
    use embassy_sync::blocking_mutex::Mutex;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::once_lock::OnceLock;
    use embassy_sync::signal::Signal;
    use embassy_time::{Duration, Timer};
    use heapless::Vec;

    use super::Frame1d;
    use crate::Result;
    use crate::clock_face::FrameSink;

    // ========================================================================
    // PIO Bus
    // ========================================================================

    /// Trait for PIO peripherals that can be used with LED strips.
    #[doc(hidden)] // Required pub for macro expansion in downstream crates
    pub trait LedStripPio: Instance {
        /// The interrupt binding type for this PIO
        type Irqs: embassy_rp::interrupt::typelevel::Binding<
                <Self as Instance>::Interrupt,
                embassy_rp::pio::InterruptHandler<Self>,
            >;

        /// Get the interrupt configuration
        fn irqs() -> Self::Irqs;
    }

    impl LedStripPio for embassy_rp::peripherals::PIO0 {
        type Irqs = crate::irqs::Pio0Irqs;

        fn irqs() -> Self::Irqs {
            crate::irqs::Pio0Irqs
        }
    }

    impl LedStripPio for embassy_rp::peripherals::PIO1 {
        type Irqs = crate::irqs::Pio1Irqs;

        fn irqs() -> Self::Irqs {
            crate::irqs::Pio1Irqs
        }
    }

    #[cfg(feature = "pico2")]
    impl LedStripPio for embassy_rp::peripherals::PIO2 {
        type Irqs = crate::irqs::Pio2Irqs;

        fn irqs() -> Self::Irqs {
            crate::irqs::Pio2Irqs
        }
    }

    /// PIO `Common` resource plus the WS2812 program, loaded once.
    #[doc(hidden)] // Support type for macro-generated strip types; not intended as surface API
    pub struct PioBus<'d, PIO: Instance> {
        common: Mutex<CriticalSectionRawMutex, RefCell<Common<'d, PIO>>>,
        ws2812_program: OnceLock<PioWs2812Program<'d, PIO>>,
    }

    impl<'d, PIO: Instance> PioBus<'d, PIO> {
        /// Create a new PIO bus with the given Common resource
        pub fn new(common: Common<'d, PIO>) -> Self {
            Self {
                common: Mutex::new(RefCell::new(common)),
                ws2812_program: OnceLock::new(),
            }
        }

        /// Get or initialize the WS2812 program (only loaded once)
        pub fn get_program(&'static self) -> &'static PioWs2812Program<'d, PIO> {
            self.ws2812_program
                .get_or_init(|| self.with_common(|common| PioWs2812Program::new(common)))
        }

        /// Access the common resource for initializing a driver
        pub fn with_common<F, R>(&self, f: F) -> R
        where
            F: FnOnce(&mut Common<'d, PIO>) -> R,
        {
            self.common.lock(|common_cell: &RefCell<Common<'d, PIO>>| {
                let mut common = common_cell.borrow_mut();
                f(&mut common)
            })
        }
    }

    // ========================================================================
    // LED Strip Commands and Static
    // ========================================================================

    #[doc(hidden)] // Required pub for macro expansion in downstream crates
    pub type LedStripCommandSignal<const N: usize, const MAX_FRAMES: usize> =
        Signal<CriticalSectionRawMutex, Command<N, MAX_FRAMES>>;

    #[doc(hidden)] // Required pub for macro expansion in downstream crates
    pub type LedStripCompletionSignal = Signal<CriticalSectionRawMutex, ()>;

    #[doc(hidden)]
    // Command for the LED strip driver loop.
    #[derive(Clone)]
    pub enum Command<const N: usize, const MAX_FRAMES: usize> {
        DisplayStatic(Frame1d<N>),
        Animate(Vec<(Frame1d<N>, Duration), MAX_FRAMES>),
    }

    /// Static resources shared between an [`LedStrip`] and its driver task.
    #[doc(hidden)] // Must be pub for method signatures and macro expansion in downstream crates
    pub struct LedStripStatic<const N: usize, const MAX_FRAMES: usize> {
        command_signal: LedStripCommandSignal<N, MAX_FRAMES>,
        completion_signal: LedStripCompletionSignal,
    }

    impl<const N: usize, const MAX_FRAMES: usize> LedStripStatic<N, MAX_FRAMES> {
        /// Creates static resources.
        #[must_use]
        #[doc(hidden)]
        pub const fn new_static() -> Self {
            Self {
                command_signal: Signal::new(),
                completion_signal: Signal::new(),
            }
        }

        #[doc(hidden)]
        pub fn command_signal(&'static self) -> &'static LedStripCommandSignal<N, MAX_FRAMES> {
            &self.command_signal
        }

        #[doc(hidden)]
        pub fn completion_signal(&'static self) -> &'static LedStripCompletionSignal {
            &self.completion_signal
        }
    }

    /// Deref target for strip types generated by [`led_strip!`](crate::led_strip!).
    ///
    /// All LED strip methods are reached through the generated type.
    pub struct LedStrip<const N: usize, const MAX_FRAMES: usize> {
        command_signal: &'static LedStripCommandSignal<N, MAX_FRAMES>,
        completion_signal: &'static LedStripCompletionSignal,
    }

    impl<const N: usize, const MAX_FRAMES: usize> LedStrip<N, MAX_FRAMES> {
        /// Creates LED strip resources.
        #[must_use]
        #[doc(hidden)]
        pub const fn new_static() -> LedStripStatic<N, MAX_FRAMES> {
            LedStripStatic::new_static()
        }

        #[doc(hidden)]
        pub fn new(led_strip_static: &'static LedStripStatic<N, MAX_FRAMES>) -> Self {
            Self {
                command_signal: led_strip_static.command_signal(),
                completion_signal: led_strip_static.completion_signal(),
            }
        }

        /// Writes a full frame to the LED strip and waits until it has been sent.
        /// It remains displayed until another command replaces it.
        ///
        /// See the [module documentation](mod@crate::led_strip) for example usage.
        ///
        /// # Errors
        ///
        /// Currently infallible; the `Result` matches the crate's other device calls.
        pub async fn write_frame(&self, frame: Frame1d<N>) -> Result<()> {
            self.command_signal.signal(Command::DisplayStatic(frame));
            self.completion_signal.wait().await;
            Ok(())
        }

        /// Loop forever through a sequence of animation frames.
        /// They remain displayed until another command replaces them.
        ///
        /// Each frame is a tuple of `(Frame1d, Duration)`.
        ///
        /// # Errors
        ///
        /// Currently infallible; the `Result` matches the crate's other device calls.
        pub async fn animate(
            &self,
            frames: impl IntoIterator<Item = (Frame1d<N>, Duration)>,
        ) -> Result<()> {
            assert!(
                MAX_FRAMES > 0,
                "max_frames must be positive for LED strip animations"
            );
            let mut sequence: Vec<(Frame1d<N>, Duration), MAX_FRAMES> = Vec::new();
            for (frame, duration) in frames {
                assert!(
                    duration.as_micros() > 0,
                    "animation frame duration must be positive"
                );
                assert!(
                    sequence.push((frame, duration)).is_ok(),
                    "animation sequence must fit within MAX_FRAMES"
                );
            }
            assert!(
                !sequence.is_empty(),
                "animation requires at least one frame"
            );
            self.command_signal.signal(Command::Animate(sequence));
            self.completion_signal.wait().await;
            Ok(())
        }
    }

    impl<const N: usize, const MAX_FRAMES: usize> FrameSink<N> for LedStrip<N, MAX_FRAMES> {
        async fn write_frame(&self, frame: Frame1d<N>) -> Result<()> {
            Self::write_frame(self, frame).await
        }
    }

    #[doc(hidden)] // Required pub for macro expansion in downstream crates
    pub async fn led_strip_driver_loop<
        PIO,
        const SM: usize,
        const N: usize,
        const MAX_FRAMES: usize,
        ORDER,
    >(
        mut driver: PioWs2812<'static, PIO, SM, N, ORDER>,
        command_signal: &'static LedStripCommandSignal<N, MAX_FRAMES>,
        completion_signal: &'static LedStripCompletionSignal,
        combo_table: &'static [u8; 256],
    ) -> !
    where
        PIO: Instance,
        ORDER: RgbColorOrder,
    {
        let mut command = command_signal.wait().await;
        loop {
            command_signal.reset();
            command = match command {
                Command::DisplayStatic(frame) => {
                    driver.write(&frame.corrected(combo_table)).await;
                    completion_signal.signal(());
                    command_signal.wait().await
                }
                Command::Animate(frames) => {
                    run_frame_animation(
                        &mut driver,
                        &frames,
                        command_signal,
                        completion_signal,
                        combo_table,
                    )
                    .await
                }
            };
        }
    }

    // Returns the command that interrupted the animation.
    async fn run_frame_animation<
        PIO,
        const SM: usize,
        const N: usize,
        const MAX_FRAMES: usize,
        ORDER,
    >(
        driver: &mut PioWs2812<'static, PIO, SM, N, ORDER>,
        frames: &Vec<(Frame1d<N>, Duration), MAX_FRAMES>,
        command_signal: &'static LedStripCommandSignal<N, MAX_FRAMES>,
        completion_signal: &'static LedStripCompletionSignal,
        combo_table: &'static [u8; 256],
    ) -> Command<N, MAX_FRAMES>
    where
        PIO: Instance,
        ORDER: RgbColorOrder,
    {
        completion_signal.signal(());

        loop {
            for (frame, duration) in frames {
                driver.write(&frame.corrected(combo_table)).await;

                if let Either::First(new_command) =
                    select(command_signal.wait(), Timer::after(*duration)).await
                {
                    return new_command;
                }
            }
        }
    }
}

/// Macro to generate a device type for one NeoPixel-style (WS2812) LED strip.
///
/// See the [module documentation](mod@crate::led_strip) for a complete example.
///
/// **Required fields:**
///
/// - `pin`: GPIO pin for LED data
/// - `len`: Number of LEDs
///
/// **Optional fields (in this order):**
///
/// - `pio`: PIO resource (default: `PIO0`)
/// - `dma`: DMA channel (default: `DMA_CH0`)
/// - `max_current`: Current budget (default: [`MAX_CURRENT_DEFAULT`] = 250 mA)
/// - `gamma`: Color curve (default: [`GAMMA_DEFAULT`] = `Gamma::Gamma2_2`)
/// - `max_frames`: Maximum animation frames (default: [`MAX_FRAMES_DEFAULT`] = 16)
///
/// # Current Limiting
///
/// The `max_current` field scales brightness so that all LEDs at full white stay within the
/// budget. Each WS2812 LED is assumed to draw 60 mA at full brightness. The resulting
/// `MAX_BRIGHTNESS` is baked into a compile-time lookup table together with the gamma curve,
/// so it has no runtime cost.
///
/// For a 165-LED clock, 165 × 60 mA = 9.9 A at full white. Use a separate 5 V supply and share
/// ground with the Pico.
#[macro_export]
macro_rules! led_strip {
    ($($tt:tt)*) => { $crate::__led_strip_impl! { $($tt)* } };
}

/// Implementation macro. Not part of the public API; use [`led_strip!`] instead.
#[doc(hidden)]
#[macro_export]
macro_rules! __led_strip_impl {
    (@peripheral [] $default:ident) => { ::embassy_rp::peripherals::$default };
    (@peripheral [$value:ident] $default:ident) => { ::embassy_rp::peripherals::$value };
    (@value [] $default:expr) => { $default };
    (@value [$value:expr] $default:expr) => { $value };

    (
        $vis:vis $name:ident {
            pin: $pin:ident,
            len: $len:expr
            $(, pio: $pio:ident)?
            $(, dma: $dma:ident)?
            $(, max_current: $max_current:expr)?
            $(, gamma: $gamma:expr)?
            $(, max_frames: $max_frames:expr)?
            $(,)?
        }
    ) => {
        ::paste::paste! {
            type [<$name Pio>] = $crate::__led_strip_impl!(@peripheral [$($pio)?] PIO0);
            type [<$name Dma>] = $crate::__led_strip_impl!(@peripheral [$($dma)?] DMA_CH0);
            type [<$name Pin>] = ::embassy_rp::peripherals::$pin;
            const [<$name:snake:upper _MAX_FRAMES>]: usize =
                $crate::__led_strip_impl!(@value [$($max_frames)?] $crate::led_strip::MAX_FRAMES_DEFAULT);

            /// LED strip generated by `led_strip!`.
            ///
            /// Derefs to `LedStrip` for `write_frame` and `animate`.
            $vis struct $name {
                strip: $crate::led_strip::LedStrip<{ $len }, { [<$name:snake:upper _MAX_FRAMES>] }>,
            }

            impl $name {
                /// The number of LEDs in this strip.
                pub const LEN: usize = $len;
                /// Maximum number of animation frames.
                pub const MAX_FRAMES: usize = [<$name:snake:upper _MAX_FRAMES>];
                /// Maximum brightness level, limited by the power budget in `max_current`.
                pub const MAX_BRIGHTNESS: u8 =
                    $crate::__led_strip_impl!(@value [$($max_current)?] $crate::led_strip::MAX_CURRENT_DEFAULT)
                        .max_brightness(Self::LEN);

                // Combined gamma correction and brightness scaling table
                const COMBO_TABLE: [u8; 256] = $crate::led_strip::generate_combo_table(
                    $crate::__led_strip_impl!(@value [$($gamma)?] $crate::led_strip::GAMMA_DEFAULT),
                    Self::MAX_BRIGHTNESS,
                );

                /// Create the strip and spawn its driver task.
                ///
                /// The `pin`, `pio`, and `dma` parameters must match the macro fields
                /// (`PIO0` and `DMA_CH0` unless set).
                ///
                /// # Errors
                ///
                /// Returns an error if the driver task cannot be spawned.
                pub fn new(
                    pin: impl Into<::embassy_rp::Peri<'static, [<$name Pin>]>>,
                    pio: ::embassy_rp::Peri<'static, [<$name Pio>]>,
                    dma: impl Into<::embassy_rp::Peri<'static, [<$name Dma>]>>,
                    spawner: ::embassy_executor::Spawner,
                ) -> $crate::Result<&'static Self> {
                    static STRIP_STATIC: $crate::led_strip::LedStripStatic<{ $len }, { [<$name:snake:upper _MAX_FRAMES>] }> =
                        $crate::led_strip::LedStrip::new_static();
                    static STRIP_CELL: ::static_cell::StaticCell<$name> = ::static_cell::StaticCell::new();
                    static BUS_CELL: ::static_cell::StaticCell<
                        $crate::led_strip::PioBus<'static, [<$name Pio>]>
                    > = ::static_cell::StaticCell::new();

                    let ::embassy_rp::pio::Pio { common, sm0, .. } = ::embassy_rp::pio::Pio::new(
                        pio,
                        <[<$name Pio>] as $crate::led_strip::LedStripPio>::irqs(),
                    );
                    let bus = BUS_CELL.init($crate::led_strip::PioBus::new(common));

                    let token = [<$name:snake _driver_task>](
                        bus,
                        sm0,
                        dma.into(),
                        pin.into(),
                        STRIP_STATIC.command_signal(),
                        STRIP_STATIC.completion_signal(),
                    );
                    spawner.spawn(token).map_err($crate::Error::TaskSpawn)?;

                    let strip = $crate::led_strip::LedStrip::new(&STRIP_STATIC);
                    Ok(STRIP_CELL.init(Self { strip }))
                }
            }

            impl ::core::ops::Deref for $name {
                type Target = $crate::led_strip::LedStrip<{ $len }, { [<$name:snake:upper _MAX_FRAMES>] }>;

                fn deref(&self) -> &Self::Target {
                    &self.strip
                }
            }

            #[::embassy_executor::task]
            async fn [<$name:snake _driver_task>](
                bus: &'static $crate::led_strip::PioBus<'static, [<$name Pio>]>,
                sm: ::embassy_rp::pio::StateMachine<'static, [<$name Pio>], 0>,
                dma: ::embassy_rp::Peri<'static, [<$name Dma>]>,
                pin: ::embassy_rp::Peri<'static, [<$name Pin>]>,
                command_signal: &'static $crate::led_strip::LedStripCommandSignal<{ $len }, { [<$name:snake:upper _MAX_FRAMES>] }>,
                completion_signal: &'static $crate::led_strip::LedStripCompletionSignal,
            ) -> ! {
                let program = bus.get_program();
                let driver = bus.with_common(|common| {
                    ::embassy_rp::pio_programs::ws2812::PioWs2812::<[<$name Pio>], 0, { $len }, _>::new(
                        common, sm, dma, pin, program,
                    )
                });
                $crate::led_strip::led_strip_driver_loop(
                    driver,
                    command_signal,
                    completion_signal,
                    &$name::COMBO_TABLE,
                )
                .await
            }
        }
    };
}

#[cfg(feature = "arm")]
pub use led_strip;
