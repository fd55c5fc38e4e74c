//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod board;
pub mod gpio;
pub mod platform;
pub mod timer;

// Re-export trait interfaces
pub use board::BoardConfig;
pub use gpio::{GpioInterface, GpioMode, HalOutput};
pub use platform::Platform;
pub use timer::TimerInterface;
