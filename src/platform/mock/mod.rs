//! Mock platform implementation for testing
//!
//! This module provides mock implementations of the platform traits so the
//! control core can be exercised on the host without hardware.
//!
//! # Feature Gate
//!
//! Available during test builds (`#[cfg(test)]`) and when the `mock` feature
//! is enabled.
//!
//! # Example
//!
//! ```
//! use brushed_esc::platform::mock::MockPlatform;
//! use brushed_esc::platform::traits::{GpioInterface, Platform};
//!
//! let mut platform = MockPlatform::init().unwrap();
//! let mut switch = platform.create_gpio(10).unwrap();
//! switch.set_high().unwrap();
//! assert!(switch.read());
//! ```

#![cfg(any(test, feature = "mock"))]

mod gpio;
mod platform;
mod timer;

pub use gpio::MockGpio;
pub use platform::MockPlatform;
pub use timer::MockTimer;
