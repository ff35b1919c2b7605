//! Timer configuration

use crate::{ClockSource, Reload, TickError, TickResult};

/// Core clock ticks per millisecond on a 16 MHz part
pub const DEFAULT_TICKS_PER_MS: u32 = 16_000;

/// Clock parameters the driver converts durations with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysTickConfig {
    /// Timer clock ticks in one millisecond
    pub ticks_per_ms: u32,
    /// Clock feeding the counter
    pub clock_source: ClockSource,
}

impl SysTickConfig {
    /// 16 MHz core clock
    pub const DEFAULT: Self = Self::new(DEFAULT_TICKS_PER_MS, ClockSource::Core);

    pub const fn new(ticks_per_ms: u32, clock_source: ClockSource) -> Self {
        Self {
            ticks_per_ms,
            clock_source,
        }
    }

    /// Derive the configuration from the core clock frequency
    ///
    /// `ticks_per_ms` is `hz / 1000` rounded down: any fraction of a kHz is
    /// dropped, so a 1.5 kHz clock yields one tick per millisecond and
    /// durations come out proportionally short. Clocks below 1 kHz are
    /// rejected.
    pub const fn from_core_clock_hz(hz: u32) -> TickResult<Self> {
        if hz < 1_000 {
            return Err(TickError::InvalidClock { hz });
        }
        Ok(Self::new(hz / 1_000, ClockSource::Core))
    }

    /// Reload value for a duration under this configuration
    pub const fn reload_for(&self, duration_ms: u16) -> TickResult<Reload> {
        Reload::from_millis(duration_ms, self.ticks_per_ms)
    }

    /// Longest duration that still fits the reload register
    pub const fn max_duration_ms(&self) -> u16 {
        if self.ticks_per_ms == 0 {
            return 0;
        }
        let max = Reload::MAX.period_ticks() / self.ticks_per_ms;
        if max > u16::MAX as u32 {
            u16::MAX
        } else {
            max as u16
        }
    }
}

impl Default for SysTickConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SysTickConfig {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SysTickConfig {{ ticks_per_ms: {}, clock_source: {} }}",
            self.ticks_per_ms,
            self.clock_source
        );
    }
}
