//! RP2350 Timer implementation

use crate::platform::{traits::TimerInterface, Result};
use embassy_time::{block_for, Duration, Instant};

/// Timer backed by embassy-time's 64-bit microsecond driver.
///
/// `delay_us` uses `block_for`, a busy-wait against the free-running TIMER
/// peripheral. Reading the counter needs no interrupt service, so these
/// delays keep working inside critical sections; the transition sequences
/// depend on that.
#[derive(Debug, Default)]
pub struct Rp2350Timer;

impl Rp2350Timer {
    /// Create a timer handle (the underlying peripheral is global).
    pub fn new() -> Self {
        Self
    }
}

impl TimerInterface for Rp2350Timer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        block_for(Duration::from_micros(us as u64));
        Ok(())
    }

    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
