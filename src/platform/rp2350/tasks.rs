//! Embassy tasks binding the control core to the board
//!
//! Four asynchronous contexts touch the shared controller, mirroring the
//! interrupt layout of the original power stage:
//!
//! - [`rc_input_task`]: edge handler on the RC input pin
//! - [`watchdog_task`]: 1 ms tick driving the signal-loss watchdog
//! - [`pwm_task`]: the two PWM cycle edges (cycle start, compare match)
//! - the control loop, run by the firmware entry point
//!
//! All of them go through [`SharedController`]'s critical section for
//! switch-touching work, and through the atomic cells below for plain
//! values.

use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker, Timer};

use super::{Rp2350Gpio, Rp2350Timer};
use crate::core::traits::{EmbassyState, SharedState};
use crate::libraries::rc_pulse::{
    service_watchdog, CommandCell, PulseBand, PulseDecoder, Watchdog,
};
use crate::motor::{drive, DriveController, DutyCell};

/// Controller shared across tasks behind a critical-section mutex.
pub type SharedController = EmbassyState<DriveController<Rp2350Gpio, Rp2350Timer>>;

/// Latest decoded pilot command.
pub static COMMANDS: CommandCell = CommandCell::new();

/// PWM duty register.
pub static DUTY: DutyCell = DutyCell::new();

/// RC signal-loss watchdog.
pub static WATCHDOG: Watchdog = Watchdog::new();

/// PWM cycle period: 8-bit duty resolution at roughly 7.8 kHz.
pub const PWM_PERIOD_US: u64 = 128;

/// RC input edge handler: time the high pulse and publish decoded commands.
#[embassy_executor::task]
pub async fn rc_input_task(mut rc_pin: Input<'static>) {
    let mut decoder = PulseDecoder::new(PulseBand::default());

    loop {
        rc_pin.wait_for_any_edge().await;
        let now_us = Instant::now().as_micros();

        if rc_pin.is_high() {
            decoder.on_rising_edge(now_us, &WATCHDOG);
        } else if let Some(cmd) = decoder.on_falling_edge(now_us) {
            COMMANDS.store(cmd);
        }
    }
}

/// Millisecond tick: count the watchdog down and force braking on loss.
#[embassy_executor::task]
pub async fn watchdog_task(controller: &'static SharedController) {
    let mut tick = Ticker::every(Duration::from_millis(1));

    loop {
        tick.next().await;
        let actual = controller.with(|c| c.state());
        service_watchdog(&WATCHDOG, actual, &COMMANDS);
    }
}

/// PWM drive engine: generate the cycle-start / compare-match pair.
///
/// The cycle start is paced by a ticker so the period does not drift with
/// scheduling latency; the compare point sits `duty/256` of the way into
/// the cycle.
#[embassy_executor::task]
pub async fn pwm_task(controller: &'static SharedController) {
    let mut cycle = Ticker::every(Duration::from_micros(PWM_PERIOD_US));

    loop {
        cycle.next().await;
        let duty = DUTY.get();

        if let Err(e) = controller.with_mut(|c| c.pwm_cycle_start(duty)) {
            crate::log_warn!("pwm cycle start: {}", e);
        }

        Timer::after(Duration::from_micros(PWM_PERIOD_US * duty as u64 / 256)).await;

        if let Err(e) = controller.with_mut(|c| c.pwm_compare_match(duty)) {
            crate::log_warn!("pwm compare match: {}", e);
        }
    }
}

/// Async rendition of [`drive::startup_beep`] for the embedded target: the
/// pacing waits must yield to the executor so the PWM task keeps chopping
/// during each beep.
pub async fn startup_beep(controller: &'static SharedController, beeps: u8) {
    DUTY.set(drive::BEEP_DUTY);

    for i in 0..beeps {
        let result = if i % 2 == 1 {
            controller.with_mut(|c| c.go_forward())
        } else {
            controller.with_mut(|c| c.go_backward())
        };
        if let Err(e) = result {
            crate::log_warn!("self-test drive: {}", e);
        }
        Timer::after(Duration::from_millis(drive::BEEP_DRIVE_MS as u64)).await;

        if let Err(e) = controller.with_mut(|c| c.brake()) {
            crate::log_warn!("self-test brake: {}", e);
        }
        Timer::after(Duration::from_millis(drive::BEEP_PAUSE_MS as u64)).await;
    }

    DUTY.set(0);
}
