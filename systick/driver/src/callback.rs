//! Tick callback slot and interrupt entry point
//!
//! Exactly one callback is installed at a time. It is written from thread
//! context and read from the SysTick exception, so the slot lives behind a
//! `critical_section::Mutex`: the interrupt handler either sees the old
//! handler or the new one, never a torn value.

use core::cell::Cell;
use core::fmt;
use critical_section::Mutex;

/// Handler run on every tick in interrupt mode
///
/// Runs in exception context: it must be short and must not block.
pub type TickCallback = fn();

/// Single-slot callback registration
pub struct CallbackSlot {
    handler: Mutex<Cell<Option<TickCallback>>>,
}

impl CallbackSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            handler: Mutex::new(Cell::new(None)),
        }
    }

    /// Replace the installed callback; `None` empties the slot
    pub fn set(&self, callback: Option<TickCallback>) {
        critical_section::with(|cs| self.handler.borrow(cs).set(callback));
    }

    /// Currently installed callback
    pub fn get(&self) -> Option<TickCallback> {
        critical_section::with(|cs| self.handler.borrow(cs).get())
    }

    /// Check if a callback is installed
    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }

    /// Run the installed callback, if any
    ///
    /// The handler is copied out under the lock and invoked after it is
    /// released. Returns `true` when a callback ran.
    pub fn dispatch(&self) -> bool {
        match self.get() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl Default for CallbackSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSlot")
            .field("installed", &self.is_set())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CallbackSlot {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CallbackSlot {{ installed: {} }}", self.is_set());
    }
}

/// Process-wide slot read by the SysTick exception
pub static SYSTICK_CALLBACK: CallbackSlot = CallbackSlot::new();

/// Install the callback run on every tick
///
/// Replaces any previous callback. The slot is independent of the timer
/// registers: [`SysTick::deinit`](crate::SysTick::deinit) leaves it intact.
pub fn set_callback(callback: Option<TickCallback>) {
    SYSTICK_CALLBACK.set(callback);
}

/// SysTick exception body
///
/// Bound to the exception vector by the `rt` feature; firmware that owns its
/// vector table calls it from its own `SysTick` handler.
pub fn interrupt_entry() {
    SYSTICK_CALLBACK.dispatch();
}
