//! SysTick register port for Cortex-M targets

use cortex_m::peripheral::SYST;
use systick_core::{ControlStatus, Reload, SysTickPort};

/// Register port over the core `SYST` peripheral
///
/// Takes ownership of the peripheral singleton so nothing else in the
/// firmware can reprogram the timer behind the driver's back.
pub struct CortexMPort {
    syst: SYST,
}

impl CortexMPort {
    pub fn new(syst: SYST) -> Self {
        Self { syst }
    }

    /// Hand the peripheral back
    pub fn free(self) -> SYST {
        self.syst
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CortexMPort {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "CortexMPort");
    }
}

impl SysTickPort for CortexMPort {
    fn read_control(&mut self) -> ControlStatus {
        ControlStatus::from_raw(self.syst.csr.read())
    }

    fn write_control(&mut self, value: ControlStatus) {
        // SAFETY: COUNTFLAG is read-only; the remaining bits are plain
        // configuration owned by this port.
        unsafe { self.syst.csr.write(value.for_write().bits()) }
    }

    fn read_reload(&self) -> u32 {
        self.syst.rvr.read()
    }

    fn write_reload(&mut self, value: u32) {
        // SAFETY: bits 24..32 are reserved and kept zero.
        unsafe { self.syst.rvr.write(value & Reload::MAX.raw()) }
    }

    fn read_current(&self) -> u32 {
        self.syst.cvr.read()
    }

    fn write_current(&mut self, value: u32) {
        // SAFETY: any write clears the counter and COUNTFLAG.
        unsafe { self.syst.cvr.write(value) }
    }
}

/// SysTick exception vector
#[cfg(feature = "rt")]
#[doc(hidden)]
#[cortex_m_rt::exception]
fn SysTick() {
    crate::interrupt_entry();
}
