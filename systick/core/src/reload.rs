//! Reload value conversion and validation

use core::fmt;
use crate::{TickError, TickResult};

/// Value loaded into the 24-bit reload register (`RVR`)
///
/// The counter runs from this value down to zero, so one period lasts
/// `raw + 1` clock ticks. Construction guarantees `MIN <= raw <= MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Reload(u32);

impl Reload {
    /// Smallest reload the driver programs
    pub const MIN: Self = Self(1);

    /// Largest value the 24-bit register holds
    pub const MAX: Self = Self(0x00FF_FFFF);

    /// Validate a raw reload value
    pub const fn new(raw: u32) -> TickResult<Self> {
        if raw < Self::MIN.0 || raw > Self::MAX.0 {
            return Err(TickError::ReloadOutOfRange { raw });
        }
        Ok(Self(raw))
    }

    /// Convert a duration into the reload value for one period
    ///
    /// Computes `ticks_per_ms * duration_ms - 1`. A zero duration, and any
    /// duration whose reload falls outside the register width, is rejected.
    pub const fn from_millis(duration_ms: u16, ticks_per_ms: u32) -> TickResult<Self> {
        let ticks = ticks_per_ms as u64 * duration_ms as u64;
        if ticks < Self::MIN.0 as u64 + 1 || ticks > Self::MAX.0 as u64 + 1 {
            return Err(TickError::DurationOutOfRange { duration_ms });
        }
        Ok(Self((ticks - 1) as u32))
    }

    /// Reload value for a period of `ticks` clock ticks
    pub const fn from_period(ticks: u32) -> TickResult<Self> {
        match ticks.checked_sub(1) {
            Some(raw) => Self::new(raw),
            None => Err(TickError::ReloadOutOfRange { raw: ticks }),
        }
    }

    /// Raw register value
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Length of one countdown in clock ticks
    pub const fn period_ticks(self) -> u32 {
        self.0 + 1
    }
}

impl From<Reload> for u32 {
    fn from(reload: Reload) -> Self {
        reload.0
    }
}

impl TryFrom<u32> for Reload {
    type Error = TickError;

    fn try_from(raw: u32) -> TickResult<Self> {
        Self::new(raw)
    }
}

impl fmt::Display for Reload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reload:{}", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reload {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "reload:{}", self.0);
    }
}
