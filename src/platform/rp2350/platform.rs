//! RP2350 platform initialization and pin allocation

use crate::platform::{error::PlatformError, traits::Platform, Result};
use embassy_rp::gpio::{AnyPin, Input, Pin, Pull};

use super::{Rp2350Gpio, Rp2350Timer};

/// RP2350 platform implementation
///
/// Owns every bank-0 pin as a degraded `AnyPin` so peripherals can be
/// created from the numeric assignments in the board config. Each pin can
/// be taken exactly once.
pub struct Rp2350Platform {
    timer: Rp2350Timer,
    pins: [Option<AnyPin>; 30],
}

impl Platform for Rp2350Platform {
    type Gpio = Rp2350Gpio;
    type Timer = Rp2350Timer;

    /// Initialize clocks and the time driver. Must be called exactly once,
    /// before any peripheral is touched.
    fn init() -> Result<Self> {
        let p = embassy_rp::init(Default::default());

        let pins: [Option<AnyPin>; 30] = [
            Some(p.PIN_0.degrade()),
            Some(p.PIN_1.degrade()),
            Some(p.PIN_2.degrade()),
            Some(p.PIN_3.degrade()),
            Some(p.PIN_4.degrade()),
            Some(p.PIN_5.degrade()),
            Some(p.PIN_6.degrade()),
            Some(p.PIN_7.degrade()),
            Some(p.PIN_8.degrade()),
            Some(p.PIN_9.degrade()),
            Some(p.PIN_10.degrade()),
            Some(p.PIN_11.degrade()),
            Some(p.PIN_12.degrade()),
            Some(p.PIN_13.degrade()),
            Some(p.PIN_14.degrade()),
            Some(p.PIN_15.degrade()),
            Some(p.PIN_16.degrade()),
            Some(p.PIN_17.degrade()),
            Some(p.PIN_18.degrade()),
            Some(p.PIN_19.degrade()),
            Some(p.PIN_20.degrade()),
            Some(p.PIN_21.degrade()),
            Some(p.PIN_22.degrade()),
            Some(p.PIN_23.degrade()),
            Some(p.PIN_24.degrade()),
            Some(p.PIN_25.degrade()),
            Some(p.PIN_26.degrade()),
            Some(p.PIN_27.degrade()),
            Some(p.PIN_28.degrade()),
            Some(p.PIN_29.degrade()),
        ];

        Ok(Self {
            timer: Rp2350Timer::new(),
            pins,
        })
    }

    fn system_clock_hz(&self) -> u32 {
        150_000_000
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        Ok(Rp2350Gpio::new_output(self.take_pin(pin)?))
    }

    fn timer(&self) -> &Self::Timer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Self::Timer {
        &mut self.timer
    }
}

impl Rp2350Platform {
    fn take_pin(&mut self, pin: u8) -> Result<AnyPin> {
        self.pins
            .get_mut(pin as usize)
            .and_then(Option::take)
            .ok_or(PlatformError::ResourceUnavailable)
    }

    /// Take the RC input pin as an edge-capable floating input.
    ///
    /// Returned as a raw embassy `Input` because edge waiting is bound to
    /// the async runtime rather than to the portable GPIO trait.
    pub fn create_rc_input(&mut self, pin: u8) -> Result<Input<'static>> {
        Ok(Input::new(self.take_pin(pin)?, Pull::None))
    }
}
