//! brushed-esc firmware entry point
//!
//! Brings the platform up, runs the audible self-test, then settles into
//! the control loop. The RC edge handler, watchdog tick, and PWM engine
//! run as separate tasks.

#![no_std]
#![no_main]

use brushed_esc::core::traits::EmbassyState;
use brushed_esc::libraries::bridge::SwitchBank;
use brushed_esc::motor::{control, DriveController};
use brushed_esc::platform::rp2350::tasks::{self, SharedController, COMMANDS, DUTY};
use brushed_esc::platform::rp2350::{Rp2350Platform, Rp2350Timer};
use brushed_esc::platform::traits::Platform;
use brushed_esc::platform::BoardConfig;
use brushed_esc::{log_info, log_warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::yield_now;
use panic_probe as _;
use static_cell::StaticCell;

static CONTROLLER: StaticCell<SharedController> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let board = BoardConfig::from_build_env();
    let mut platform = Rp2350Platform::init().unwrap();
    log_info!("brushed-esc starting (board preset {})", env!("ESC_BOARD"));

    let switches = SwitchBank::from_platform(&mut platform, &board).unwrap();
    let rc_pin = platform.create_rc_input(board.rc_input).unwrap();

    // The unused phase-B leg is driven low once and held for the lifetime
    // of the firmware.
    let unused_leg = (
        platform.create_gpio(board.unused_high).unwrap(),
        platform.create_gpio(board.unused_low).unwrap(),
    );
    core::mem::forget(unused_leg);

    let controller: &'static SharedController = CONTROLLER.init(EmbassyState::new(
        DriveController::new(switches, Rp2350Timer::new()),
    ));

    spawner.spawn(tasks::pwm_task(controller)).unwrap();
    spawner.spawn(tasks::watchdog_task(controller)).unwrap();
    spawner.spawn(tasks::rc_input_task(rc_pin)).unwrap();

    tasks::startup_beep(controller, 1).await;
    log_info!("self-test done, entering control loop");

    loop {
        if let Err(e) = control::step(controller, &COMMANDS, &DUTY) {
            log_warn!("control step: {}", e);
        }
        yield_now().await;
    }
}
