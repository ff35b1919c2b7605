//! Register access seam between the driver and the hardware

use crate::ControlStatus;

/// Access to the three SysTick registers
///
/// Implementations perform whole-register accesses only; width and byte
/// order are their concern. Reading the control register must have the
/// hardware side effect of clearing `COUNTFLAG`, and any write to the
/// current value register clears both the counter and `COUNTFLAG`.
pub trait SysTickPort {
    /// Read the control and status register (`CSR`)
    fn read_control(&mut self) -> ControlStatus;

    /// Write the control and status register
    fn write_control(&mut self, value: ControlStatus);

    /// Read the reload value register (`RVR`)
    fn read_reload(&self) -> u32;

    /// Write the reload value register; only the low 24 bits are kept
    fn write_reload(&mut self, value: u32);

    /// Read the current value register (`CVR`)
    fn read_current(&self) -> u32;

    /// Write the current value register, which clears it
    fn write_current(&mut self, value: u32);

    /// Read-modify-write of the control register
    ///
    /// `COUNTFLAG` is never written back. The sequence itself is not
    /// atomic; callers that race the tick interrupt must mask it.
    fn modify_control<F>(&mut self, f: F)
    where
        F: FnOnce(ControlStatus) -> ControlStatus,
    {
        let value = self.read_control();
        self.write_control(f(value).for_write());
    }
}

impl<P: SysTickPort> SysTickPort for &mut P {
    fn read_control(&mut self) -> ControlStatus {
        (**self).read_control()
    }

    fn write_control(&mut self, value: ControlStatus) {
        (**self).write_control(value)
    }

    fn read_reload(&self) -> u32 {
        (**self).read_reload()
    }

    fn write_reload(&mut self, value: u32) {
        (**self).write_reload(value)
    }

    fn read_current(&self) -> u32 {
        (**self).read_current()
    }

    fn write_current(&mut self, value: u32) {
        (**self).write_current(value)
    }
}
