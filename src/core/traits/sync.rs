//! Synchronized state abstraction for interrupt/loop shared data.
//!
//! The drive controller is touched from four contexts: the RC edge handler,
//! the watchdog tick, the PWM cycle handlers, and the control loop. On the
//! target, every access goes through a critical section so a transition
//! sequence can never be observed half-done; on the host, a `RefCell` is
//! enough because tests are single-threaded.

/// Platform-agnostic synchronized state access.
///
/// - [`EmbassyState`] for embedded targets (critical-section blocking mutex)
/// - [`MockState`] for host testing (`RefCell`)
///
/// # Example
///
/// ```ignore
/// fn current_state<S: SharedState<DriveController<G, T>>>(shared: &S) -> DriveState {
///     shared.with(|c| c.state())
/// }
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    ///
    /// On the target this holds the global critical section for the whole
    /// closure, including any busy-wait delays inside it. The motor state
    /// machine relies on exactly that: dead-time waits happen with
    /// interrupts masked so the PWM engine cannot race a transition.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

// ============================================================================
// Embassy Implementation
// ============================================================================

#[cfg(feature = "embassy")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Embassy-based synchronized state using a critical-section Mutex.
///
/// `with_mut` masks interrupts for the duration of the closure, making it
/// safe to call from interrupt handlers and tasks alike on a single core.
#[cfg(feature = "embassy")]
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, core::cell::RefCell<T>>,
}

#[cfg(feature = "embassy")]
impl<T> EmbassyState<T> {
    /// Creates a new `EmbassyState` wrapping the given value.
    ///
    /// This is a const fn, allowing static initialization.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(feature = "embassy")]
impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock synchronized state using `RefCell` for single-threaded testing.
///
/// # Panics
///
/// Panics if borrowing rules are violated (e.g., calling `with_mut` while
/// `with` is active). This indicates a bug in the test code.
pub struct MockState<T> {
    inner: core::cell::RefCell<T>,
}

impl<T> MockState<T> {
    /// Creates a new `MockState` wrapping the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: core::cell::RefCell::new(value),
        }
    }
}

impl<T> SharedState<T> for MockState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}
