//! Hardware-independent libraries
//!
//! Reusable pieces of the control core that only depend on the platform
//! traits:
//!
//! - `bridge`: the four logical power-stage switches
//! - `rc_pulse`: RC pulse-width decoding, signal-loss watchdog, and the
//!   atomic command cell shared with the control loop

pub mod bridge;
pub mod rc_pulse;

// Re-export commonly used types
pub use bridge::{Switch, SwitchBank};
pub use rc_pulse::{CommandCell, DriveCommand, PulseBand, PulseDecoder, Watchdog};
