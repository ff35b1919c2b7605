//! Control and status register model

use bitflags::bitflags;

bitflags! {
    /// Contents of the SysTick control and status register (`CSR`)
    ///
    /// `COUNTFLAG` is read-only: the hardware sets it when the counter
    /// reaches zero and clears it when the register is read.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ControlStatus: u32 {
        /// Counter enable
        const ENABLE = 1 << 0;
        /// Raise the SysTick exception when the counter reaches zero
        const TICKINT = 1 << 1;
        /// Clock source select (set = core clock)
        const CLKSOURCE = 1 << 2;
        /// Counter reached zero since the last read
        const COUNTFLAG = 1 << 16;
    }
}

impl ControlStatus {
    /// Bits software is allowed to change
    pub const WRITABLE: Self = Self::ENABLE.union(Self::TICKINT).union(Self::CLKSOURCE);

    /// Build a snapshot from a raw register value, keeping reserved bits
    pub const fn from_raw(raw: u32) -> Self {
        Self::from_bits_retain(raw)
    }

    /// Control word that enables the counter in the given mode
    pub const fn enabled_with(interrupt: bool, source: ClockSource) -> Self {
        let mut value = Self::ENABLE;
        if interrupt {
            value = value.union(Self::TICKINT);
        }
        if let ClockSource::Core = source {
            value = value.union(Self::CLKSOURCE);
        }
        value
    }

    /// Value suitable for writing back to the register
    ///
    /// Keeps only the `WRITABLE` bits; `COUNTFLAG` and reserved bits are
    /// written as zero.
    pub const fn for_write(self) -> Self {
        self.intersection(Self::WRITABLE)
    }

    /// Check if the counter is enabled
    pub const fn is_enabled(self) -> bool {
        self.contains(Self::ENABLE)
    }

    /// Check if the tick interrupt is enabled
    pub const fn interrupt_enabled(self) -> bool {
        self.contains(Self::TICKINT)
    }

    /// Check if the counter reached zero since the previous read
    pub const fn has_wrapped(self) -> bool {
        self.contains(Self::COUNTFLAG)
    }

    /// Selected clock source
    pub const fn clock_source(self) -> ClockSource {
        if self.contains(Self::CLKSOURCE) {
            ClockSource::Core
        } else {
            ClockSource::External
        }
    }

    /// Operating mode encoded in this snapshot
    pub const fn mode(self) -> TimerMode {
        if !self.is_enabled() {
            TimerMode::Disabled
        } else if self.interrupt_enabled() {
            TimerMode::Interrupt
        } else {
            TimerMode::Polling
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControlStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CSR({=u32:#x})", self.bits());
    }
}

/// SysTick clock source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockSource {
    /// Processor core clock
    #[default]
    Core,
    /// Implementation-defined reference clock
    External,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockSource {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ClockSource::Core => defmt::write!(fmt, "Core"),
            ClockSource::External => defmt::write!(fmt, "External"),
        }
    }
}

/// Operating mode of the timer as seen in the control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Counter stopped or never configured
    Disabled,
    /// Counting with the tick interrupt enabled
    Interrupt,
    /// Counting with the interrupt disabled; completion is polled
    Polling,
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TimerMode::Disabled => defmt::write!(fmt, "Disabled"),
            TimerMode::Interrupt => defmt::write!(fmt, "Interrupt"),
            TimerMode::Polling => defmt::write!(fmt, "Polling"),
        }
    }
}
