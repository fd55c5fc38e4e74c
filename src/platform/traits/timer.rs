//! Timer interface trait
//!
//! Monotonic time source plus blocking delays. The transition sequences in
//! the motor state machine call `delay_us` while holding the global critical
//! section, so implementations must busy-wait rather than yield: the
//! dead-time between switch changes has to elapse with interrupts masked.

use crate::platform::Result;

/// Timer interface trait
pub trait TimerInterface {
    /// Busy-wait for the given number of microseconds
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer(TimerError::InvalidDuration)` if the
    /// duration cannot be represented by the underlying timer.
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Busy-wait for the given number of milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    /// Current monotonic time in microseconds since platform init
    ///
    /// The counter is wide enough that wraparound is not observable in
    /// practice; pulse-width arithmetic still uses wrapping subtraction.
    fn now_us(&self) -> u64;

    /// Current monotonic time in milliseconds since platform init
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
