//! GPIO interface trait
//!
//! Defines the digital output/input interface that platform implementations
//! must provide. Every power-stage switch is driven through this trait, so
//! implementations must make `set_high`/`set_low` take effect immediately:
//! the PWM drive engine relies on the level being visible to the next cycle.

use crate::platform::{
    error::{GpioError, PlatformError},
    Result,
};

/// GPIO pin mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioMode {
    /// Input mode (high impedance)
    Input,
    /// Output mode (push-pull)
    OutputPushPull,
}

/// GPIO interface trait
///
/// # Safety Invariants
///
/// - Only one owner per GPIO pin instance
/// - No concurrent access to the same pin from multiple contexts
pub trait GpioInterface {
    /// Set GPIO pin high (logic level 1)
    ///
    /// Only valid in output mode.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_high(&mut self) -> Result<()>;

    /// Set GPIO pin low (logic level 0)
    ///
    /// Only valid in output mode.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidMode)` if the pin
    /// is not configured as an output.
    fn set_low(&mut self) -> Result<()>;

    /// Read GPIO pin state
    ///
    /// Returns `true` if the pin is high, `false` if low.
    /// For outputs this is the last driven level.
    fn read(&self) -> bool;

    /// Get current GPIO pin mode
    fn mode(&self) -> GpioMode;
}

/// Adapter implementing [`GpioInterface`] over any embedded-hal output pin.
///
/// Lets the switch bank run on HALs this crate has no dedicated platform
/// for. The driven level is shadowed locally since `OutputPin` has no
/// readback.
pub struct HalOutput<P> {
    pin: P,
    level: bool,
}

impl<P: embedded_hal::digital::OutputPin> HalOutput<P> {
    /// Wrap an embedded-hal output pin, driving it low first.
    pub fn new(mut pin: P) -> Result<Self> {
        pin.set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))?;
        Ok(Self { pin, level: false })
    }
}

impl<P: embedded_hal::digital::OutputPin> GpioInterface for HalOutput<P> {
    fn set_high(&mut self) -> Result<()> {
        self.pin
            .set_high()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))?;
        self.level = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<()> {
        self.pin
            .set_low()
            .map_err(|_| PlatformError::Gpio(GpioError::HardwareError))?;
        self.level = false;
        Ok(())
    }

    fn read(&self) -> bool {
        self.level
    }

    fn mode(&self) -> GpioMode {
        GpioMode::OutputPushPull
    }
}
