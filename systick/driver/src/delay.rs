//! Blocking delays for `embedded-hal`
//!
//! Built on the busy-wait path, so a delay reprograms the timer in polling
//! mode and overwrites any interrupt-mode configuration.

use embedded_hal::delay::DelayNs;
use systick_core::{Reload, SysTickPort};

use crate::SysTick;

impl<P: SysTickPort> SysTick<P> {
    /// Spin for at least `ticks` timer clock ticks
    ///
    /// Long delays are split into periods of at most `Reload::MAX + 1`
    /// ticks. A trailing period shorter than two ticks is rounded up to the
    /// shortest programmable one.
    pub fn delay_ticks(&mut self, mut ticks: u64) {
        let longest = Reload::MAX.period_ticks() as u64;
        while ticks > 0 {
            let chunk = ticks.min(longest) as u32;
            let reload = Reload::from_period(chunk).unwrap_or(Reload::MIN);
            self.busy_wait(reload);
            ticks -= chunk as u64;
        }
    }

    fn ticks_for(&self, amount: u32, units_per_ms: u64) -> u64 {
        (amount as u64 * self.config().ticks_per_ms as u64).div_ceil(units_per_ms)
    }
}

impl<P: SysTickPort> DelayNs for SysTick<P> {
    fn delay_ns(&mut self, ns: u32) {
        let ticks = self.ticks_for(ns, 1_000_000);
        self.delay_ticks(ticks);
    }

    fn delay_us(&mut self, us: u32) {
        let ticks = self.ticks_for(us, 1_000);
        self.delay_ticks(ticks);
    }

    fn delay_ms(&mut self, ms: u32) {
        let ticks = self.ticks_for(ms, 1);
        self.delay_ticks(ticks);
    }
}
