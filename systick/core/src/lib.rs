#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

//! # SysTick Core
//!
//! Hardware-independent building blocks for the Cortex-M SysTick driver:
//! a typed model of the control/status register, validated 24-bit reload
//! values, the millisecond-to-tick conversion, and the [`SysTickPort`] trait
//! through which the driver reaches the three timer registers.
//!
//! Nothing in this crate touches memory-mapped I/O, so every rule about the
//! timer (reload width, read-only count flag, clock-source selection) can be
//! exercised on the host.

use core::fmt;

pub mod config;
pub mod control;
pub mod port;
pub mod reload;

pub use config::*;
pub use control::*;
pub use port::*;
pub use reload::*;


/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the SysTick crates
pub type TickResult<T> = Result<T, TickError>;

/// Errors reported while configuring the SysTick timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    /// The requested duration does not fit the 24-bit reload register
    /// (this includes a zero duration)
    DurationOutOfRange {
        /// Duration that was requested, in milliseconds
        duration_ms: u16,
    },
    /// A raw reload value outside `Reload::MIN..=Reload::MAX`
    ReloadOutOfRange {
        /// Offending raw value
        raw: u32,
    },
    /// The core clock is too slow to produce whole ticks per millisecond
    InvalidClock {
        /// Clock frequency that was supplied, in hertz
        hz: u32,
    },
}

impl fmt::Display for TickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickError::DurationOutOfRange { duration_ms } => {
                write!(f, "Duration of {}ms out of reload range", duration_ms)
            }
            TickError::ReloadOutOfRange { raw } => {
                write!(f, "Reload value {:#x} out of 24-bit range", raw)
            }
            TickError::InvalidClock { hz } => write!(f, "Invalid core clock of {}Hz", hz),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TickError {}

#[cfg(feature = "defmt")]
impl defmt::Format for TickError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TickError::DurationOutOfRange { duration_ms } => {
                defmt::write!(fmt, "DurationOutOfRange({}ms)", duration_ms)
            }
            TickError::ReloadOutOfRange { raw } => {
                defmt::write!(fmt, "ReloadOutOfRange({=u32:#x})", raw)
            }
            TickError::InvalidClock { hz } => defmt::write!(fmt, "InvalidClock({}Hz)", hz),
        }
    }
}
