#![cfg_attr(not(test), no_std)]

//! brushed-esc - Brushless ESC power stage repurposed as a brushed motor controller
//!
//! This library turns a three-phase brushless ESC into a simple two-direction
//! brushed motor controller driven by a standard hobby RC PWM input. Two of the
//! three half-bridge legs are wired to the motor (the forward and backward
//! paths); the third leg stays off.
//!
//! The control core is platform-independent and host-testable: RC pulse
//! decoding, the direction/braking state machine with dead-time sequencing,
//! the PWM drive engine, and the control loop all run against the traits in
//! [`platform`], with a mock platform for tests and an RP2350/embassy
//! implementation for the target board.

// Platform abstraction layer (mock + RP2350 implementations)
pub mod platform;

// Core systems (logging, shared-state primitives)
pub mod core;

// Hardware-independent libraries (switch bank, RC pulse decoding)
pub mod libraries;

// Motor control (state machine, PWM drive engine, control loop)
pub mod motor;
