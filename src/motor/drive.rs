//! Drive state machine and PWM drive engine
//!
//! [`DriveController`] is the only component allowed to reconfigure the
//! switch bank. State changes go through fixed transition sequences that
//! insert dead time between disabling one path and enabling the other, so
//! that opposing switches of the same half-bridge leg are never conductive
//! at once (shoot-through).
//!
//! ## Concurrency
//!
//! Callers share the controller behind a
//! [`SharedState`](crate::core::traits::SharedState). Transition sequences
//! and the PWM cycle hooks must run under `with_mut`, which on the target
//! masks interrupts for the whole closure. The dead-time delays therefore
//! busy-wait with interrupts off; that blocks pulse capture for a bounded
//! few hundred microseconds per transition (10 ms when entering the brake),
//! which the no-shoot-through invariant requires.

use crate::core::traits::SharedState;
use crate::libraries::bridge::{Switch, SwitchBank};
use crate::motor::{control::DutyCell, DriveState, DUTY_MAX};
use crate::platform::traits::{GpioInterface, TimerInterface};
use crate::platform::Result;

/// Dead time between disabling one switch and enabling the next, letting
/// gate drivers and stored inductive energy settle.
pub const DEAD_TIME_US: u32 = 200;

/// Hold time after entering the brake configuration before anything else
/// is allowed to happen.
pub const BRAKE_SETTLE_MS: u32 = 10;

/// Duty used by the startup self-test; low enough that the motor only
/// twitches audibly instead of spinning.
pub const BEEP_DUTY: u8 = 10;
/// Drive time per self-test beep.
pub const BEEP_DRIVE_MS: u32 = 200;
/// Brake pause after each self-test beep.
pub const BEEP_PAUSE_MS: u32 = 300;

/// Owner of the power-stage configuration.
pub struct DriveController<G: GpioInterface, T: TimerInterface> {
    switches: SwitchBank<G>,
    timer: T,
    state: DriveState,
}

impl<G: GpioInterface, T: TimerInterface> DriveController<G, T> {
    /// Create a controller over an all-off switch bank.
    pub fn new(switches: SwitchBank<G>, timer: T) -> Self {
        Self {
            switches,
            timer,
            state: DriveState::Uninitialized,
        }
    }

    /// Current actual state of the power stage.
    pub fn state(&self) -> DriveState {
        self.state
    }

    /// Switch bank, for state inspection.
    pub fn switches(&self) -> &SwitchBank<G> {
        &self.switches
    }

    /// Timer, for time accounting in tests.
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Move the power stage to `target` through the safe sequence.
    ///
    /// `Uninitialized` is not a reachable target; requesting it falls back
    /// to the brake configuration.
    pub fn transition_to(&mut self, target: DriveState) -> Result<()> {
        match target {
            DriveState::Forward => self.go_forward(),
            DriveState::Backward => self.go_backward(),
            DriveState::Braking | DriveState::Uninitialized => self.brake(),
        }
    }

    /// Enter the forward configuration: backward path off, dead time,
    /// forward low on, dead time, forward high on.
    ///
    /// No-op (no switch writes, no delays) when already forward.
    pub fn go_forward(&mut self) -> Result<()> {
        if self.state == DriveState::Forward {
            return Ok(());
        }
        self.switches.disable(Switch::BackwardHigh)?;
        self.switches.disable(Switch::BackwardLow)?;
        self.timer.delay_us(DEAD_TIME_US)?;
        self.switches.enable(Switch::ForwardLow)?;
        self.timer.delay_us(DEAD_TIME_US)?;
        self.switches.enable(Switch::ForwardHigh)?;
        self.state = DriveState::Forward;
        crate::log_info!("drive: {}", self.state.name());
        Ok(())
    }

    /// Enter the backward configuration; mirror image of [`Self::go_forward`].
    pub fn go_backward(&mut self) -> Result<()> {
        if self.state == DriveState::Backward {
            return Ok(());
        }
        self.switches.disable(Switch::ForwardHigh)?;
        self.switches.disable(Switch::ForwardLow)?;
        self.timer.delay_us(DEAD_TIME_US)?;
        self.switches.enable(Switch::BackwardLow)?;
        self.timer.delay_us(DEAD_TIME_US)?;
        self.switches.enable(Switch::BackwardHigh)?;
        self.state = DriveState::Backward;
        crate::log_info!("drive: {}", self.state.name());
        Ok(())
    }

    /// Short the motor through both low sides (dynamic brake), then hold
    /// for the settle time.
    ///
    /// No-op when already braking.
    pub fn brake(&mut self) -> Result<()> {
        if self.state == DriveState::Braking {
            return Ok(());
        }
        self.switches.disable(Switch::ForwardHigh)?;
        self.switches.disable(Switch::BackwardHigh)?;
        self.timer.delay_us(DEAD_TIME_US)?;
        self.switches.enable(Switch::ForwardLow)?;
        self.switches.enable(Switch::BackwardLow)?;
        self.state = DriveState::Braking;
        crate::log_info!("drive: {}", self.state.name());
        self.timer.delay_ms(BRAKE_SETTLE_MS)?;
        Ok(())
    }

    /// PWM cycle start: begin the ON part of the cycle by enabling the
    /// active direction's high switch. Braking and uninitialized states
    /// keep the high sides off.
    pub fn pwm_cycle_start(&mut self, duty: u8) -> Result<()> {
        if duty > 0 {
            match self.state {
                DriveState::Forward => self.switches.enable(Switch::ForwardHigh)?,
                DriveState::Backward => self.switches.enable(Switch::BackwardHigh)?,
                DriveState::Braking | DriveState::Uninitialized => {}
            }
        }
        Ok(())
    }

    /// PWM compare match: begin the OFF part of the cycle. Clearing both
    /// high switches is safe since at most the active one is on, and the
    /// low sides are never touched here.
    pub fn pwm_compare_match(&mut self, duty: u8) -> Result<()> {
        if duty < DUTY_MAX && self.state != DriveState::Braking {
            self.switches.disable(Switch::ForwardHigh)?;
            self.switches.disable(Switch::BackwardHigh)?;
        }
        Ok(())
    }
}

/// Audible power-on self-test: `beeps` short pulses alternating
/// backward/forward at a twitch-level duty, each followed by a brake pause.
/// Leaves the stage braking with the duty register cleared.
///
/// The pacing delays use a separate timer and run outside the controller's
/// critical section, so the PWM engine keeps chopping the active high
/// switch during each beep; only the transitions themselves lock out the
/// rest of the system.
pub fn startup_beep<G, T, S, P>(
    controller: &S,
    duty: &DutyCell,
    beeps: u8,
    pacing: &mut P,
) -> Result<()>
where
    G: GpioInterface,
    T: TimerInterface,
    S: SharedState<DriveController<G, T>>,
    P: TimerInterface,
{
    duty.set(BEEP_DUTY);

    for i in 0..beeps {
        if i % 2 == 1 {
            controller.with_mut(|c| c.go_forward())?;
        } else {
            controller.with_mut(|c| c.go_backward())?;
        }
        pacing.delay_ms(BEEP_DRIVE_MS)?;
        controller.with_mut(|c| c.brake())?;
        pacing.delay_ms(BEEP_PAUSE_MS)?;
    }

    duty.set(0);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockTimer;
    use crate::platform::traits::GpioMode;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    /// Shared switch-level event log: (switch, turned_on).
    type EventLog = Rc<RefCell<Vec<(Switch, bool)>>>;

    struct RecordingGpio {
        id: Switch,
        state: bool,
        log: EventLog,
    }

    impl GpioInterface for RecordingGpio {
        fn set_high(&mut self) -> Result<()> {
            self.state = true;
            self.log.borrow_mut().push((self.id, true));
            Ok(())
        }

        fn set_low(&mut self) -> Result<()> {
            self.state = false;
            self.log.borrow_mut().push((self.id, false));
            Ok(())
        }

        fn read(&self) -> bool {
            self.state
        }

        fn mode(&self) -> GpioMode {
            GpioMode::OutputPushPull
        }
    }

    fn recording_controller() -> (DriveController<RecordingGpio, MockTimer>, EventLog) {
        let log: EventLog = Rc::new(RefCell::new(Vec::new()));
        let pin = |id| RecordingGpio {
            id,
            state: false,
            log: Rc::clone(&log),
        };
        let bank = SwitchBank::new(
            pin(Switch::ForwardHigh),
            pin(Switch::ForwardLow),
            pin(Switch::BackwardHigh),
            pin(Switch::BackwardLow),
        );
        (DriveController::new(bank, MockTimer::new()), log)
    }

    /// Replay an event log and assert that opposing switches of the same
    /// half-bridge leg are never conductive simultaneously.
    fn assert_no_shoot_through(events: &[(Switch, bool)]) {
        let mut on = [false; 4];
        let idx = |s: Switch| s as usize;
        for &(s, level) in events {
            on[idx(s)] = level;
            assert!(
                !(on[idx(Switch::ForwardHigh)] && on[idx(Switch::BackwardLow)]),
                "forward-high and backward-low both on"
            );
            assert!(
                !(on[idx(Switch::BackwardHigh)] && on[idx(Switch::ForwardLow)]),
                "backward-high and forward-low both on"
            );
        }
    }

    #[test]
    fn forward_transition_sequences_switches_safely() {
        let (mut ctrl, log) = recording_controller();
        ctrl.brake().unwrap();
        log.borrow_mut().clear();

        ctrl.go_forward().unwrap();

        let events = log.borrow().clone();
        assert_eq!(
            events,
            vec![
                (Switch::BackwardHigh, false),
                (Switch::BackwardLow, false),
                (Switch::ForwardLow, true),
                (Switch::ForwardHigh, true),
            ]
        );
        assert_no_shoot_through(&events);
        assert_eq!(ctrl.state(), DriveState::Forward);
    }

    #[test]
    fn backward_transition_mirrors_forward() {
        let (mut ctrl, log) = recording_controller();
        ctrl.brake().unwrap();
        log.borrow_mut().clear();

        ctrl.go_backward().unwrap();

        let events = log.borrow().clone();
        assert_eq!(
            events,
            vec![
                (Switch::ForwardHigh, false),
                (Switch::ForwardLow, false),
                (Switch::BackwardLow, true),
                (Switch::BackwardHigh, true),
            ]
        );
        assert_no_shoot_through(&events);
        assert_eq!(ctrl.state(), DriveState::Backward);
    }

    #[test]
    fn brake_shorts_both_low_sides() {
        let (mut ctrl, log) = recording_controller();
        ctrl.go_forward().unwrap();
        log.borrow_mut().clear();

        ctrl.brake().unwrap();

        let events = log.borrow().clone();
        assert_eq!(
            events,
            vec![
                (Switch::ForwardHigh, false),
                (Switch::BackwardHigh, false),
                (Switch::ForwardLow, true),
                (Switch::BackwardLow, true),
            ]
        );
        assert!(ctrl.switches().is_on(Switch::ForwardLow));
        assert!(ctrl.switches().is_on(Switch::BackwardLow));
        assert_eq!(ctrl.state(), DriveState::Braking);
    }

    #[test]
    fn transitions_insert_dead_time() {
        let (mut ctrl, _log) = recording_controller();
        ctrl.brake().unwrap();
        let t0 = ctrl.timer().now_us();

        ctrl.go_forward().unwrap();
        assert_eq!(ctrl.timer().now_us() - t0, 2 * DEAD_TIME_US as u64);
    }

    #[test]
    fn brake_holds_settle_time() {
        let (mut ctrl, _log) = recording_controller();
        ctrl.go_forward().unwrap();
        let t0 = ctrl.timer().now_us();

        ctrl.brake().unwrap();
        assert_eq!(
            ctrl.timer().now_us() - t0,
            DEAD_TIME_US as u64 + BRAKE_SETTLE_MS as u64 * 1000
        );
    }

    #[test]
    fn transition_to_current_state_is_a_no_op() {
        let (mut ctrl, log) = recording_controller();
        ctrl.go_forward().unwrap();
        log.borrow_mut().clear();
        let t0 = ctrl.timer().now_us();

        ctrl.go_forward().unwrap();

        assert!(log.borrow().is_empty());
        assert_eq!(ctrl.timer().now_us(), t0);
        assert_eq!(ctrl.state(), DriveState::Forward);
    }

    #[test]
    fn full_transition_tour_never_shoots_through() {
        let (mut ctrl, log) = recording_controller();

        ctrl.brake().unwrap();
        ctrl.go_forward().unwrap();
        ctrl.brake().unwrap();
        ctrl.go_backward().unwrap();
        ctrl.brake().unwrap();
        ctrl.go_forward().unwrap();

        assert_no_shoot_through(&log.borrow());
    }

    #[test]
    fn pwm_cycle_drives_active_high_switch_only() {
        let (mut ctrl, _log) = recording_controller();
        ctrl.brake().unwrap();
        ctrl.go_forward().unwrap();

        ctrl.pwm_cycle_start(128).unwrap();
        assert!(ctrl.switches().is_on(Switch::ForwardHigh));
        assert!(!ctrl.switches().is_on(Switch::BackwardHigh));

        ctrl.pwm_compare_match(128).unwrap();
        assert!(!ctrl.switches().is_on(Switch::ForwardHigh));
        // Low side of the active direction is not the engine's to touch
        assert!(ctrl.switches().is_on(Switch::ForwardLow));
    }

    #[test]
    fn pwm_zero_duty_keeps_high_sides_off() {
        let (mut ctrl, _log) = recording_controller();
        ctrl.go_forward().unwrap();

        ctrl.pwm_cycle_start(0).unwrap();
        assert!(!ctrl.switches().is_on(Switch::ForwardHigh));
    }

    #[test]
    fn pwm_full_duty_never_clears_high_switch() {
        let (mut ctrl, _log) = recording_controller();
        ctrl.go_forward().unwrap();

        ctrl.pwm_cycle_start(DUTY_MAX).unwrap();
        ctrl.pwm_compare_match(DUTY_MAX).unwrap();
        assert!(ctrl.switches().is_on(Switch::ForwardHigh));
    }

    #[test]
    fn pwm_is_inert_while_braking() {
        let (mut ctrl, log) = recording_controller();
        ctrl.go_forward().unwrap();
        ctrl.brake().unwrap();
        log.borrow_mut().clear();

        ctrl.pwm_cycle_start(200).unwrap();
        ctrl.pwm_compare_match(200).unwrap();

        assert!(log.borrow().is_empty());
        assert!(ctrl.switches().is_on(Switch::ForwardLow));
        assert!(ctrl.switches().is_on(Switch::BackwardLow));
    }

    #[test]
    fn pwm_is_inert_before_first_transition() {
        let (mut ctrl, log) = recording_controller();

        ctrl.pwm_cycle_start(200).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn startup_beep_alternates_and_ends_braked() {
        let (ctrl, log) = recording_controller();
        let shared = crate::core::traits::MockState::new(ctrl);
        let duty = DutyCell::new();
        let mut pacing = MockTimer::new();

        startup_beep(&shared, &duty, 2, &mut pacing).unwrap();

        assert_eq!(duty.get(), 0);
        assert_eq!(shared.with(|c| c.state()), DriveState::Braking);
        assert_no_shoot_through(&log.borrow());
        // Two drive windows and two brake pauses on the pacing clock
        assert_eq!(
            pacing.now_us(),
            2 * (BEEP_DRIVE_MS + BEEP_PAUSE_MS) as u64 * 1000
        );

        // First beep drives backward, second forward
        let events = log.borrow().clone();
        let first_high = events
            .iter()
            .find(|(s, on)| *on && matches!(*s, Switch::ForwardHigh | Switch::BackwardHigh))
            .copied();
        assert_eq!(first_high, Some((Switch::BackwardHigh, true)));
        assert!(events.contains(&(Switch::ForwardHigh, true)));
    }
}
