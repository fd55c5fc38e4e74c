//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the ESC power stage. All
//! platform-specific code is isolated here; the control core only sees the
//! traits.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "pico2")]
pub mod rp2350;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{BoardConfig, GpioInterface, GpioMode, Platform, TimerInterface};
