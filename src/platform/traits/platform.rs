//! Root platform trait
//!
//! Aggregates the peripheral interfaces a board must provide and owns
//! platform initialization. Concrete peripheral types are associated types,
//! so the control core compiles down to direct register writes with no
//! dynamic dispatch.

use super::{GpioInterface, TimerInterface};
use crate::platform::Result;

/// Root platform trait
///
/// # Example
///
/// ```ignore
/// let mut platform = MockPlatform::init()?;
/// let switch = platform.create_gpio(10)?;
/// let t0 = platform.timer().now_us();
/// ```
pub trait Platform: Sized {
    /// GPIO peripheral type
    type Gpio: GpioInterface;

    /// Timer peripheral type
    type Timer: TimerInterface;

    /// Initialize the platform
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if initialization fails.
    fn init() -> Result<Self>;

    /// Get system clock frequency in Hz
    fn system_clock_hz(&self) -> u32;

    /// Create a GPIO output instance for the given pin number
    ///
    /// The pin is driven low before being handed out, so a freshly created
    /// switch output is always in the off state.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the pin is already in
    /// use or the pin number is invalid.
    fn create_gpio(&mut self, pin: u8) -> Result<Self::Gpio>;

    /// Get timer instance
    fn timer(&self) -> &Self::Timer;

    /// Get mutable timer instance
    fn timer_mut(&mut self) -> &mut Self::Timer;
}
