//! Mock Platform implementation for testing

use crate::platform::{error::PlatformError, traits::Platform, Result};

use super::{MockGpio, MockTimer};

/// Number of simulated bank-0 GPIO pins
const GPIO_COUNT: usize = 30;

/// Mock Platform implementation
///
/// Hands out mock peripherals and tracks pin allocation so a double
/// `create_gpio` on the same pin fails the way a real board would.
#[derive(Debug)]
pub struct MockPlatform {
    timer: MockTimer,
    gpio_allocated: [bool; GPIO_COUNT],
}

impl MockPlatform {
    /// Create a new mock platform
    pub fn new() -> Self {
        Self {
            timer: MockTimer::new(),
            gpio_allocated: [false; GPIO_COUNT],
        }
    }

    /// Maximum GPIO pin number
    pub const MAX_GPIO: u8 = GPIO_COUNT as u8 - 1;
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MockPlatform {
    type Gpio = MockGpio;
    type Timer = MockTimer;

    fn init() -> Result<Self> {
        Ok(Self::new())
    }

    fn system_clock_hz(&self) -> u32 {
        150_000_000 // Simulated 150 MHz system clock
    }

    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio> {
        if pin > Self::MAX_GPIO || self.gpio_allocated[pin as usize] {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.gpio_allocated[pin as usize] = true;
        Ok(MockGpio::new_output())
    }

    fn timer(&self) -> &Self::Timer {
        &self.timer
    }

    fn timer_mut(&mut self) -> &mut Self::Timer {
        &mut self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gpio_allocation_is_exclusive() {
        let mut platform = MockPlatform::init().unwrap();

        assert!(platform.create_gpio(10).is_ok());
        assert!(matches!(
            platform.create_gpio(10),
            Err(PlatformError::ResourceUnavailable)
        ));
        assert!(platform.create_gpio(11).is_ok());
    }

    #[test]
    fn invalid_pin_rejected() {
        let mut platform = MockPlatform::init().unwrap();
        assert!(matches!(
            platform.create_gpio(MockPlatform::MAX_GPIO + 1),
            Err(PlatformError::ResourceUnavailable)
        ));
    }
}
