//! Logging abstraction
//!
//! Provides unified logging macros that work across targets:
//! - Embedded (`pico2` feature): defmt over RTT
//! - Host tests: `println!`
//! - Host non-test: no-op
//!
//! The macros are cheap enough to call from the control loop and from inside
//! transition critical sections; defmt defers formatting to the host side.

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        println!("[WARN] {}", format!($($arg)*));
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "pico2")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "pico2"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn macros_accept_format_args() {
        log_info!("state -> {}", "Forward");
        log_warn!("RC signal lost after {} ms", 50);
        log_debug!("duty = {}", 128u8);
    }
}
