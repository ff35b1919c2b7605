//! SysTick demo for the TM4C123 LaunchPad (Cortex-M4F, 16 MHz PIOSC)
//!
//! Waits 500ms with the busy-wait path while interrupts are still unrouted,
//! then switches to 10ms interrupt ticks and counts them from the callback.
//! Every 100 ticks the timer is paused for about a millisecond of core
//! cycles and resumed, counting on from where it stopped.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::Peripherals;
use cortex_m_rt::entry;
use panic_halt as _;
use systick_driver::{set_callback, CortexMPort, SysTick};

static TICKS: AtomicU32 = AtomicU32::new(0);

fn on_tick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
}

#[entry]
fn main() -> ! {
    let Some(peripherals) = Peripherals::take() else {
        loop {
            cortex_m::asm::bkpt();
        }
    };
    let mut systick = SysTick::new(CortexMPort::new(peripherals.SYST));

    // Bootstrap delay: polled, no exception involved
    systick.init_busy_wait_mode(500).ok();

    set_callback(Some(on_tick));
    if systick.init_interrupt_mode(10).is_err() {
        systick.deinit();
    }

    let mut last_pause: u32 = 0;
    loop {
        cortex_m::asm::wfi();

        let ticks = TICKS.load(Ordering::Relaxed);
        if ticks.wrapping_sub(last_pause) >= 100 {
            last_pause = ticks;
            systick.stop();
            cortex_m::asm::delay(16_000);
            systick.start();
        }
    }
}
