//! Motor control core
//!
//! The authoritative drive state machine, the PWM drive engine, and the
//! control loop that reconciles pilot commands with the power stage.

pub mod control;
pub mod drive;

pub use control::{step, DutyCell};
pub use drive::{startup_beep, DriveController, BRAKE_SETTLE_MS, DEAD_TIME_US};

/// Maximum PWM duty value (duty == `DUTY_MAX` means the high switch stays
/// on for the whole cycle).
pub const DUTY_MAX: u8 = 255;

/// Actual configuration of the power stage.
///
/// Exactly one instance exists per controller; only the state machine in
/// [`drive::DriveController`] may change it, and every change goes through
/// a dead-time-sequenced transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
#[repr(u8)]
pub enum DriveState {
    /// Power-up state: no switch has ever been enabled
    Uninitialized = 0,
    /// Forward high + forward low conducting
    Forward = 1,
    /// Backward high + backward low conducting
    Backward = 2,
    /// Both low sides conducting (dynamic brake)
    Braking = 3,
}

impl DriveState {
    /// Decode from the wire representation used by the atomic command cell.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => DriveState::Forward,
            2 => DriveState::Backward,
            3 => DriveState::Braking,
            _ => DriveState::Uninitialized,
        }
    }

    /// State name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            DriveState::Uninitialized => "Uninitialized",
            DriveState::Forward => "Forward",
            DriveState::Backward => "Backward",
            DriveState::Braking => "Braking",
        }
    }
}
