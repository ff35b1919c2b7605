//! Simulated SysTick register file
//!
//! Behaves like the hardware block as far as the driver can observe:
//!
//! - writing the current value register clears it and `COUNTFLAG`
//! - an enabled counter sitting at zero loads the reload value on the next
//!   clock, then counts down one per clock
//! - reaching zero sets `COUNTFLAG` and, with `TICKINT` set, raises the
//!   exception (counted in [`MockSysTick::pending_interrupts`])
//! - reading the control register clears `COUNTFLAG`
//!
//! Simulated time only moves through [`MockSysTick::advance`], or on every
//! control read when built with [`MockSysTick::with_cycles_per_read`].

use systick_core::{ControlStatus, Reload, SysTickPort};

/// Host-side stand-in for the SysTick registers
#[derive(Debug, Clone, Default)]
pub struct MockSysTick {
    control: ControlStatus,
    reload: u32,
    current: u32,
    cycles_per_read: u32,
    control_reads: u32,
    pending_interrupts: u32,
}

impl MockSysTick {
    /// Registers in their documented reset state, with frozen time
    pub const fn new() -> Self {
        Self::from_registers(0, 0, 0)
    }

    /// Registers holding arbitrary contents, e.g. an unknown reset state
    pub const fn from_registers(control: u32, reload: u32, current: u32) -> Self {
        Self {
            control: ControlStatus::from_raw(control),
            reload: reload & Reload::MAX.raw(),
            current: current & Reload::MAX.raw(),
            cycles_per_read: 0,
            control_reads: 0,
            pending_interrupts: 0,
        }
    }

    /// Let `cycles` clock ticks elapse before every control register read
    pub fn with_cycles_per_read(mut self, cycles: u32) -> Self {
        self.cycles_per_read = cycles;
        self
    }

    /// Run the counter for `cycles` clock ticks
    pub fn advance(&mut self, mut cycles: u32) {
        while cycles > 0 && self.control.is_enabled() {
            if self.current == 0 {
                self.current = self.reload;
                cycles -= 1;
                if self.reload == 0 {
                    // A zero reload parks the counter without ever wrapping
                    break;
                }
                continue;
            }

            let step = cycles.min(self.current);
            self.current -= step;
            cycles -= step;

            if self.current == 0 {
                self.control |= ControlStatus::COUNTFLAG;
                if self.control.interrupt_enabled() {
                    self.pending_interrupts += 1;
                }
            }
        }
    }

    /// Control register contents without the read side effect
    pub fn peek_control(&self) -> ControlStatus {
        self.control
    }

    /// Number of control register reads so far
    pub fn control_reads(&self) -> u32 {
        self.control_reads
    }

    /// Exceptions raised and not yet taken
    pub fn pending_interrupts(&self) -> u32 {
        self.pending_interrupts
    }

    /// Take all raised exceptions, returning how many there were
    pub fn take_interrupts(&mut self) -> u32 {
        core::mem::take(&mut self.pending_interrupts)
    }
}

impl SysTickPort for MockSysTick {
    fn read_control(&mut self) -> ControlStatus {
        self.advance(self.cycles_per_read);
        self.control_reads += 1;
        let value = self.control;
        self.control.remove(ControlStatus::COUNTFLAG);
        value
    }

    fn write_control(&mut self, value: ControlStatus) {
        let flag = self.control & ControlStatus::COUNTFLAG;
        self.control = value.for_write() | flag;
    }

    fn read_reload(&self) -> u32 {
        self.reload
    }

    fn write_reload(&mut self, value: u32) {
        self.reload = value & Reload::MAX.raw();
    }

    fn read_current(&self) -> u32 {
        self.current
    }

    fn write_current(&mut self, _value: u32) {
        self.current = 0;
        self.control.remove(ControlStatus::COUNTFLAG);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MockSysTick {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "MockSysTick {{ control: {}, reload: {}, current: {}, pending: {} }}",
            self.control,
            self.reload,
            self.current,
            self.pending_interrupts
        );
    }
}
