//! Control loop
//!
//! Reconciles the pilot's decoded command against the actual power-stage
//! state, once per loop iteration:
//!
//! - Forward or Backward requested while braking: clear the duty register
//!   first (so the new direction starts from zero power), then transition.
//! - Any other mismatch, including a direction reversal while driving:
//!   transition to Braking. Reversals are never direct; they always pass
//!   through the brake.
//! - States already match: copy the commanded power into the duty register.
//!
//! Each iteration is non-blocking apart from the bounded dead-time delays
//! inside a transition.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::core::traits::SharedState;
use crate::libraries::rc_pulse::CommandCell;
use crate::motor::{drive::DriveController, DriveState};
use crate::platform::traits::{GpioInterface, TimerInterface};
use crate::platform::Result;

/// PWM duty register: written by the control loop, read by the PWM drive
/// engine at every cycle edge. 0 = high switch never on, 255 = always on.
pub struct DutyCell {
    duty: AtomicU8,
}

impl DutyCell {
    /// New duty register at zero.
    pub const fn new() -> Self {
        Self {
            duty: AtomicU8::new(0),
        }
    }

    /// Set the duty value.
    pub fn set(&self, duty: u8) {
        self.duty.store(duty, Ordering::Relaxed);
    }

    /// Read the duty value.
    pub fn get(&self) -> u8 {
        self.duty.load(Ordering::Relaxed)
    }
}

impl Default for DutyCell {
    fn default() -> Self {
        Self::new()
    }
}

/// One control-loop iteration.
///
/// Reads the newest command and either sequences a state transition (under
/// the shared controller's critical section) or updates the duty register.
pub fn step<G, T, S>(controller: &S, commands: &CommandCell, duty: &DutyCell) -> Result<()>
where
    G: GpioInterface,
    T: TimerInterface,
    S: SharedState<DriveController<G, T>>,
{
    let cmd = commands.load();
    let state = controller.with(|c| c.state());

    if cmd.target != state {
        match (cmd.target, state) {
            (DriveState::Forward, DriveState::Braking) => {
                duty.set(0);
                controller.with_mut(|c| c.go_forward())
            }
            (DriveState::Backward, DriveState::Braking) => {
                duty.set(0);
                controller.with_mut(|c| c.go_backward())
            }
            _ => controller.with_mut(|c| c.brake()),
        }
    } else {
        duty.set(cmd.power);
        Ok(())
    }
}
