//! SysTick timer driver

use core::hint::spin_loop;
use systick_core::{ControlStatus, Reload, SysTickConfig, SysTickPort, TickResult, TimerMode};

/// The SysTick timer driver
///
/// Owns the register port and the clock configuration used to turn
/// millisecond durations into reload values. Every operation goes straight
/// to the registers; nothing about the running configuration is cached.
#[derive(Debug)]
pub struct SysTick<P: SysTickPort> {
    port: P,
    config: SysTickConfig,
}

impl<P: SysTickPort> SysTick<P> {
    /// Create a driver for a 16 MHz core clock
    pub const fn new(port: P) -> Self {
        Self::with_config(port, SysTickConfig::DEFAULT)
    }

    /// Create a driver with an explicit clock configuration
    pub const fn with_config(port: P, config: SysTickConfig) -> Self {
        Self { port, config }
    }

    /// Clock configuration in use
    pub fn config(&self) -> &SysTickConfig {
        &self.config
    }

    /// Borrow the register port
    pub fn port(&self) -> &P {
        &self.port
    }

    /// Mutably borrow the register port
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Release the register port
    pub fn free(self) -> P {
        self.port
    }

    /// Start periodic ticking with the SysTick exception enabled
    ///
    /// Every `duration_ms` the hardware raises the exception and
    /// [`interrupt_entry`](crate::interrupt_entry) runs the installed
    /// callback. Any previous configuration is overwritten. On error the
    /// registers are left untouched.
    pub fn init_interrupt_mode(&mut self, duration_ms: u16) -> TickResult<Reload> {
        let reload = self.reload_for(duration_ms)?;
        self.program(reload, true);
        tick_trace!("systick: interrupt mode, {}ms ({})", duration_ms, reload);
        Ok(reload)
    }

    /// Block the calling thread for `duration_ms` by polling the count flag
    ///
    /// This spins for the whole duration; it neither sleeps nor yields and
    /// cannot be cancelled. The counter is left running with the interrupt
    /// disabled when the call returns. On error the registers are left
    /// untouched and the call returns immediately.
    pub fn init_busy_wait_mode(&mut self, duration_ms: u16) -> TickResult<Reload> {
        let reload = self.reload_for(duration_ms)?;
        tick_trace!("systick: busy-wait, {}ms ({})", duration_ms, reload);
        self.busy_wait(reload);
        Ok(reload)
    }

    /// Program `reload` in polling mode and spin until it counts down once
    pub(crate) fn busy_wait(&mut self, reload: Reload) {
        self.program(reload, false);
        // Each read clears COUNTFLAG, so a set flag means a fresh wrap
        while !self.port.read_control().has_wrapped() {
            spin_loop();
        }
    }

    /// Resume counting from the current value
    ///
    /// Only the enable bit changes. Calling this before any init starts the
    /// counter with whatever the registers hold at reset; that is the
    /// caller's responsibility.
    pub fn start(&mut self) {
        critical_section::with(|_| {
            self.port.modify_control(|control| control | ControlStatus::ENABLE)
        });
        tick_trace!("systick: start");
    }

    /// Halt the counter, keeping mode, reload and current value
    pub fn stop(&mut self) {
        critical_section::with(|_| {
            self.port.modify_control(|control| control - ControlStatus::ENABLE)
        });
        tick_trace!("systick: stop");
    }

    /// Disable the timer and erase its configuration
    ///
    /// The callback slot is not touched.
    pub fn deinit(&mut self) {
        self.port.write_control(ControlStatus::empty());
        self.port.write_reload(0);
        self.port.write_current(0);
        tick_trace!("systick: deinit");
    }

    /// Operating mode currently programmed in hardware
    ///
    /// Reading the control register consumes a pending count flag.
    pub fn mode(&mut self) -> TimerMode {
        self.port.read_control().mode()
    }

    fn reload_for(&self, duration_ms: u16) -> TickResult<Reload> {
        self.config.reload_for(duration_ms).map_err(|err| {
            tick_warn!("systick: rejected duration of {}ms", duration_ms);
            err
        })
    }

    fn program(&mut self, reload: Reload, interrupt: bool) {
        self.port.write_control(ControlStatus::empty());
        self.port.write_reload(reload.raw());
        self.port.write_current(0);
        self.port.write_control(ControlStatus::enabled_with(
            interrupt,
            self.config.clock_source,
        ));
    }
}

#[cfg(feature = "defmt")]
impl<P: SysTickPort + defmt::Format> defmt::Format for SysTick<P> {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "SysTick {{ port: {}, config: {} }}", self.port, self.config);
    }
}
