//! RP2350 GPIO implementation

use crate::platform::{
    traits::{GpioInterface, GpioMode},
    Result,
};
use embassy_rp::gpio::{AnyPin, Level, Output};

/// RP2350 GPIO output backed by an embassy-rp `Output`.
///
/// Writes hit the SIO registers directly, so a level change is visible on
/// the pin within the same cycle that requested it.
pub struct Rp2350Gpio {
    pin: Output<'static>,
}

impl Rp2350Gpio {
    /// Wrap a degraded pin as a push-pull output, driven low.
    pub fn new_output(pin: AnyPin) -> Self {
        Self {
            pin: Output::new(pin, Level::Low),
        }
    }
}

impl GpioInterface for Rp2350Gpio {
    fn set_high(&mut self) -> Result<()> {
        self.pin.set_high();
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.pin.set_low();
        Ok(())
    }

    fn read(&self) -> bool {
        self.pin.is_set_high()
    }

    fn mode(&self) -> GpioMode {
        GpioMode::OutputPushPull
    }
}
