#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

//! # SysTick Driver
//!
//! Driver for the 24-bit SysTick down-counter found in every ARMv7-M core.
//! The timer runs in one of two mutually exclusive modes:
//!
//! - **Interrupt mode** ([`SysTick::init_interrupt_mode`]): the counter
//!   reloads every period and raises the SysTick exception, whose handler
//!   ([`interrupt_entry`]) runs the callback installed with [`set_callback`].
//! - **Busy-wait mode** ([`SysTick::init_busy_wait_mode`]): the caller spins
//!   on the hardware count flag until one full period has elapsed. No
//!   interrupt routing is involved, which makes it usable during bring-up or
//!   with interrupts masked, at the cost of burning the CPU for the whole
//!   delay.
//!
//! The hardware registers are the only record of the timer state; the driver
//! keeps no shadow copy, so [`SysTick::stop`] and [`SysTick::start`] toggle
//! the enable bit in place and counting resumes from the current value.
//!
//! ```rust,no_run
//! use systick_driver::{set_callback, MockSysTick, SysTick};
//!
//! fn on_tick() {}
//!
//! let mut systick = SysTick::new(MockSysTick::new());
//! set_callback(Some(on_tick));
//! systick.init_interrupt_mode(10).ok();
//! ```

#[macro_use]
mod macros;

pub mod callback;
pub mod delay;
pub mod driver;
pub mod mock;

#[cfg(feature = "cortex-m")]
#[allow(unsafe_code)]
pub mod cortex;

pub use systick_core::*;
pub use callback::*;
pub use driver::*;
pub use mock::MockSysTick;

#[cfg(feature = "cortex-m")]
pub use cortex::CortexMPort;

#[cfg(test)]
mod tests;
