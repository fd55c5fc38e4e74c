//! RC pulse input processing
//!
//! Decodes a standard hobby RC PWM signal (a repeating high pulse whose
//! width encodes stick position) into a desired drive direction and power:
//!
//! - Rising edge: remember the timestamp, feed the signal-loss watchdog.
//! - Falling edge: measure the width. Widths outside the configured band
//!   are glitches and are dropped without touching the previous command.
//!   In-band widths map to Forward/Backward with linearly scaled power, or
//!   to Braking inside the deadzone around neutral.
//! - Periodic tick (1 ms): count the watchdog down; once it hits zero the
//!   input is considered lost and Braking is forced until a fresh rising
//!   edge arrives.
//!
//! The decoder itself is owned by the edge handler. Everything it shares
//! with other contexts (the command, the watchdog count) lives in
//! single-word atomics.

use core::sync::atomic::{AtomicU16, AtomicU8, Ordering};

use crate::motor::DriveState;

/// Power is an unsigned 8-bit magnitude; 255 is full throttle.
pub const POWER_MAX: u8 = 255;

/// Watchdog reload value in ticks. At the 1 ms tick this gives a 50 ms
/// signal-loss window, a few missed frames of a standard 50 Hz RC link.
pub const WATCHDOG_RELOAD: u8 = 50;

/// Valid pulse-width band and neutral deadzone, in microseconds.
///
/// Defaults follow the common RC servo convention: 1.5 ms neutral,
/// 1.1-1.9 ms full range, with a 40 µs deadzone so a twitchy transmitter
/// at neutral does not chatter between braking and driving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseBand {
    /// Shortest accepted pulse (exclusive)
    pub min_us: u32,
    /// Neutral pulse width
    pub mid_us: u32,
    /// Longest accepted pulse (exclusive)
    pub max_us: u32,
    /// Half-width of the braking deadzone around neutral
    pub deadzone_us: u32,
}

impl Default for PulseBand {
    fn default() -> Self {
        Self {
            min_us: 1100,
            mid_us: 1500,
            max_us: 1900,
            deadzone_us: 40,
        }
    }
}

/// A decoded pilot command: desired direction plus power magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "pico2", derive(defmt::Format))]
pub struct DriveCommand {
    /// Desired drive state (never `Uninitialized` once a pulse decoded)
    pub target: DriveState,
    /// Desired power, 0-255
    pub power: u8,
}

/// RC pulse-width decoder.
///
/// Mutated only from the edge handler context; hands decoded commands back
/// to the caller instead of publishing them itself.
pub struct PulseDecoder {
    band: PulseBand,
    pulse_start_us: Option<u64>,
}

impl PulseDecoder {
    /// Create a decoder for the given pulse band.
    pub fn new(band: PulseBand) -> Self {
        Self {
            band,
            pulse_start_us: None,
        }
    }

    /// Handle a rising edge at `now_us`: start timing the pulse and feed
    /// the signal-loss watchdog.
    pub fn on_rising_edge(&mut self, now_us: u64, watchdog: &Watchdog) {
        self.pulse_start_us = Some(now_us);
        watchdog.feed();
    }

    /// Handle a falling edge at `now_us`.
    ///
    /// Returns the decoded command, or `None` when there was no matching
    /// rising edge or the width fell outside the valid band.
    pub fn on_falling_edge(&mut self, now_us: u64) -> Option<DriveCommand> {
        let start = self.pulse_start_us.take()?;
        self.decode(now_us.wrapping_sub(start))
    }

    /// Map a pulse width to a command. Out-of-band widths decode to `None`.
    fn decode(&self, width_us: u64) -> Option<DriveCommand> {
        let b = &self.band;
        if width_us <= b.min_us as u64 || width_us >= b.max_us as u64 {
            return None;
        }
        let width = width_us as u32;

        let cmd = if width > b.mid_us + b.deadzone_us {
            DriveCommand {
                target: DriveState::Forward,
                power: scale_power(width - b.mid_us, b.max_us - b.mid_us),
            }
        } else if width < b.mid_us - b.deadzone_us {
            DriveCommand {
                target: DriveState::Backward,
                power: scale_power(b.mid_us - width, b.mid_us - b.min_us),
            }
        } else {
            DriveCommand {
                target: DriveState::Braking,
                power: 0,
            }
        };
        Some(cmd)
    }
}

/// Linear power scaling: `offset` microseconds of stick travel over a
/// `range` microsecond span, into 0-255, saturating high.
fn scale_power(offset_us: u32, range_us: u32) -> u8 {
    let power = (offset_us as u64 * 256) / range_us as u64;
    power.min(POWER_MAX as u64) as u8
}

/// Signal-loss watchdog: counts down once per tick, reloaded by every
/// rising edge. Saturates at zero until the next reload.
pub struct Watchdog {
    count: AtomicU8,
}

impl Watchdog {
    /// Create a watchdog starting from a full reload, so power-up without
    /// a transmitter takes one full window before braking is forced.
    pub const fn new() -> Self {
        Self {
            count: AtomicU8::new(WATCHDOG_RELOAD),
        }
    }

    /// Reload the countdown (a rising edge was observed).
    pub fn feed(&self) {
        self.count.store(WATCHDOG_RELOAD, Ordering::Relaxed);
    }

    /// Advance one tick. Returns `true` when the countdown is exhausted;
    /// the count never goes below zero.
    pub fn tick(&self) -> bool {
        self.count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |c| {
                if c > 0 {
                    Some(c - 1)
                } else {
                    None
                }
            })
            .is_err()
    }
}

impl Default for Watchdog {
    fn default() -> Self {
        Self::new()
    }
}

/// Watchdog tick service: force Braking while the RC input is lost.
///
/// Called once per periodic tick. The braking demand is reasserted on every
/// expired tick, so it stays in force until a fresh rising edge reloads the
/// watchdog. The last commanded power is left in place; the control loop
/// only applies it again after the pilot leaves braking.
pub fn service_watchdog(watchdog: &Watchdog, actual: DriveState, commands: &CommandCell) {
    if watchdog.tick() && actual != DriveState::Braking {
        crate::log_warn!("RC signal lost, forcing brake");
        commands.force_braking();
    }
}

/// Latest decoded command, shared between the edge handler, the watchdog
/// tick, and the control loop.
///
/// Target and power are packed into one atomic word so a reader can never
/// see the direction of one command paired with the power of another.
/// Last-value-wins by design; the control loop consumes whatever is newest.
pub struct CommandCell {
    packed: AtomicU16,
}

impl CommandCell {
    /// New cell holding `Uninitialized` at power 0.
    pub const fn new() -> Self {
        Self {
            packed: AtomicU16::new(pack(DriveState::Uninitialized, 0)),
        }
    }

    /// Publish a freshly decoded command.
    pub fn store(&self, cmd: DriveCommand) {
        self.packed
            .store(pack(cmd.target, cmd.power), Ordering::Relaxed);
    }

    /// Read the most recent command.
    pub fn load(&self) -> DriveCommand {
        let raw = self.packed.load(Ordering::Relaxed);
        DriveCommand {
            target: DriveState::from_u8((raw >> 8) as u8),
            power: raw as u8,
        }
    }

    /// Override the target with Braking, keeping the stored power.
    pub fn force_braking(&self) {
        let _ = self
            .packed
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |raw| {
                Some(pack(DriveState::Braking, raw as u8))
            });
    }
}

impl Default for CommandCell {
    fn default() -> Self {
        Self::new()
    }
}

const fn pack(target: DriveState, power: u8) -> u16 {
    ((target as u16) << 8) | power as u16
}
