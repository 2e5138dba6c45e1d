//! Internal interrupt bindings for the LED strip's PIO and the real-time clock's I2C bus.

::embassy_rp::bind_interrupts! {
    pub struct Pio0Irqs {
        PIO0_IRQ_0 => ::embassy_rp::pio::InterruptHandler<::embassy_rp::peripherals::PIO0>;
    }
}

::embassy_rp::bind_interrupts! {
    pub struct Pio1Irqs {
        PIO1_IRQ_0 => ::embassy_rp::pio::InterruptHandler<::embassy_rp::peripherals::PIO1>;
    }
}

#[cfg(feature = "pico2")]
::embassy_rp::bind_interrupts! {
    pub struct Pio2Irqs {
        PIO2_IRQ_0 => ::embassy_rp::pio::InterruptHandler<::embassy_rp::peripherals::PIO2>;
    }
}

::embassy_rp::bind_interrupts! {
    pub struct I2c0Irqs {
        I2C0_IRQ => ::embassy_rp::i2c::InterruptHandler<::embassy_rp::peripherals::I2C0>;
    }
}

::embassy_rp::bind_interrupts! {
    pub struct I2c1Irqs {
        I2C1_IRQ => ::embassy_rp::i2c::InterruptHandler<::embassy_rp::peripherals::I2C1>;
    }
}
