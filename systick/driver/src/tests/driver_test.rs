//! Driver tests for systick-driver

use crate::{MockSysTick, SysTick};
use systick_core::{
    ClockSource, ControlStatus, SysTickConfig, SysTickPort, TickError, TimerMode,
};

const INTERRUPT_MODE: u32 = 0b111;
const POLLING_MODE: u32 = 0b101;

fn snapshot(systick: &SysTick<MockSysTick>) -> (ControlStatus, u32, u32) {
    let port = systick.port();
    (port.peek_control(), port.read_reload(), port.read_current())
}

#[test]
fn test_interrupt_mode_ten_ms() {
    let mut systick = SysTick::new(MockSysTick::new());
    let reload = systick.init_interrupt_mode(10).unwrap();
    assert_eq!(reload.raw(), 159_999);

    let (control, reload, current) = snapshot(&systick);
    assert_eq!(control.bits(), INTERRUPT_MODE);
    assert_eq!(reload, 159_999);
    assert_eq!(current, 0);
}

#[test]
fn test_interrupt_mode_programs_every_valid_duration() {
    let mut systick = SysTick::new(MockSysTick::new());
    for ms in 1..=1048u16 {
        systick.init_interrupt_mode(ms).unwrap();
        let (control, reload, current) = snapshot(&systick);
        assert_eq!(reload, 16_000 * ms as u32 - 1);
        assert_eq!(current, 0);
        assert!(control.is_enabled());
        assert!(control.interrupt_enabled());
        assert_eq!(control.clock_source(), ClockSource::Core);
    }
}

#[test]
fn test_invalid_duration_leaves_registers_untouched() {
    for ms in [0u16, 1049, 5000, u16::MAX] {
        let mut systick = SysTick::new(MockSysTick::from_registers(POLLING_MODE, 1234, 56));
        let before = snapshot(&systick);

        assert_eq!(
            systick.init_interrupt_mode(ms),
            Err(TickError::DurationOutOfRange { duration_ms: ms })
        );
        assert_eq!(snapshot(&systick), before);

        assert_eq!(
            systick.init_busy_wait_mode(ms),
            Err(TickError::DurationOutOfRange { duration_ms: ms })
        );
        assert_eq!(snapshot(&systick), before);
        assert_eq!(systick.port().control_reads(), 0);
    }
}

#[test]
fn test_busy_wait_one_ms() {
    let port = MockSysTick::new().with_cycles_per_read(1_000);
    let mut systick = SysTick::new(port);

    let reload = systick.init_busy_wait_mode(1).unwrap();
    assert_eq!(reload.raw(), 15_999);

    let port = systick.port();
    // 16 polls of 1000 cycles cover exactly one 16000-cycle period
    assert_eq!(port.control_reads(), 16);
    assert!(!port.peek_control().has_wrapped());
    assert_eq!(port.peek_control().bits(), POLLING_MODE);
    assert_eq!(port.read_reload(), 15_999);
    assert_eq!(port.pending_interrupts(), 0);
}

#[test]
fn test_busy_wait_with_coarse_polling() {
    let port = MockSysTick::new().with_cycles_per_read(100_000);
    let mut systick = SysTick::new(port);

    systick.init_busy_wait_mode(1048).unwrap();
    assert_eq!(systick.port().read_reload(), 16_767_999);
    assert_eq!(systick.port().control_reads(), 168);
}

#[test]
fn test_interrupt_mode_overwrites_busy_wait() {
    let port = MockSysTick::new().with_cycles_per_read(4_000);
    let mut systick = SysTick::new(port);

    systick.init_busy_wait_mode(1).unwrap();
    systick.init_interrupt_mode(10).unwrap();

    let (control, reload, current) = snapshot(&systick);
    assert_eq!(control.bits(), INTERRUPT_MODE);
    assert_eq!(reload, 159_999);
    assert_eq!(current, 0);
}

#[test]
fn test_init_is_idempotent() {
    let mut systick = SysTick::new(MockSysTick::new());
    systick.init_interrupt_mode(25).unwrap();
    let first = snapshot(&systick);
    systick.init_interrupt_mode(25).unwrap();
    assert_eq!(snapshot(&systick), first);
}

#[test]
fn test_interrupt_mode_raises_one_exception_per_period() {
    let mut systick = SysTick::new(MockSysTick::new());
    systick.init_interrupt_mode(1).unwrap();
    systick.port_mut().advance(16_000 * 3);
    assert_eq!(systick.port().pending_interrupts(), 3);
}

#[test]
fn test_stop_preserves_configuration() {
    let mut systick = SysTick::new(MockSysTick::new());
    systick.init_interrupt_mode(10).unwrap();
    systick.port_mut().advance(5_000);
    let (_, reload, current) = snapshot(&systick);
    assert_eq!(current, 159_999 - 4_999);

    systick.stop();
    let (control, stopped_reload, stopped_current) = snapshot(&systick);
    assert!(!control.is_enabled());
    assert!(control.interrupt_enabled());
    assert_eq!(control.clock_source(), ClockSource::Core);
    assert_eq!(stopped_reload, reload);
    assert_eq!(stopped_current, current);

    systick.port_mut().advance(10_000);
    assert_eq!(systick.port().read_current(), current);
}

#[test]
fn test_start_resumes_from_current_value() {
    let mut systick = SysTick::new(MockSysTick::new());
    systick.init_interrupt_mode(10).unwrap();
    systick.port_mut().advance(5_000);
    systick.stop();
    let stopped = snapshot(&systick);

    systick.start();
    let (control, reload, current) = snapshot(&systick);
    assert_eq!(control.bits(), INTERRUPT_MODE);
    assert_eq!(reload, stopped.1);
    assert_eq!(current, stopped.2);

    systick.port_mut().advance(1_000);
    assert_eq!(systick.port().read_current(), stopped.2 - 1_000);
}

#[test]
fn test_stop_when_stopped_or_uninitialised() {
    let mut systick = SysTick::new(MockSysTick::new());
    systick.stop();
    assert_eq!(snapshot(&systick), (ControlStatus::empty(), 0, 0));

    systick.init_interrupt_mode(5).unwrap();
    systick.stop();
    let once = snapshot(&systick);
    systick.stop();
    assert_eq!(snapshot(&systick), once);
}

#[test]
fn test_start_before_init_uses_reset_contents() {
    let port = MockSysTick::from_registers(ControlStatus::CLKSOURCE.bits(), 500, 20);
    let mut systick = SysTick::new(port);

    systick.start();
    let (control, reload, current) = snapshot(&systick);
    assert_eq!(control.bits(), POLLING_MODE);
    assert_eq!(reload, 500);
    assert_eq!(current, 20);
}

/// Port that remembers the last value written to the control register
struct RecordingPort {
    inner: MockSysTick,
    last_control_write: Option<ControlStatus>,
}

impl SysTickPort for RecordingPort {
    fn read_control(&mut self) -> ControlStatus {
        self.inner.read_control()
    }

    fn write_control(&mut self, value: ControlStatus) {
        self.last_control_write = Some(value);
        self.inner.write_control(value);
    }

    fn read_reload(&self) -> u32 {
        self.inner.read_reload()
    }

    fn write_reload(&mut self, value: u32) {
        self.inner.write_reload(value);
    }

    fn read_current(&self) -> u32 {
        self.inner.read_current()
    }

    fn write_current(&mut self, value: u32) {
        self.inner.write_current(value);
    }
}

#[test]
fn test_stop_does_not_write_countflag() {
    let port = RecordingPort {
        inner: MockSysTick::new(),
        last_control_write: None,
    };
    let mut systick = SysTick::new(port);
    systick.init_interrupt_mode(1).unwrap();
    systick.port_mut().inner.advance(16_000);
    assert!(systick.port().inner.peek_control().has_wrapped());

    systick.stop();
    let written = systick.port().last_control_write.unwrap();
    assert_eq!(written, ControlStatus::TICKINT | ControlStatus::CLKSOURCE);
    assert!(!written.has_wrapped());
    assert_eq!(
        systick.port().inner.peek_control(),
        ControlStatus::TICKINT | ControlStatus::CLKSOURCE
    );
}

#[test]
fn test_start_does_not_write_countflag() {
    let port = RecordingPort {
        inner: MockSysTick::new(),
        last_control_write: None,
    };
    let mut systick = SysTick::new(port);
    systick.init_interrupt_mode(1).unwrap();
    systick.port_mut().inner.advance(16_000);

    systick.start();
    let written = systick.port().last_control_write.unwrap();
    assert_eq!(written.bits(), INTERRUPT_MODE);
}

#[test]
fn test_deinit_zeroes_everything() {
    let mut systick = SysTick::new(MockSysTick::new());
    systick.init_interrupt_mode(100).unwrap();
    systick.port_mut().advance(777);

    systick.deinit();
    assert_eq!(snapshot(&systick), (ControlStatus::empty(), 0, 0));

    systick.deinit();
    assert_eq!(snapshot(&systick), (ControlStatus::empty(), 0, 0));
}

#[test]
fn test_deinit_from_unknown_state() {
    let port = MockSysTick::from_registers(0xFFFF_FFFF, 0xFFFF_FFFF, 0x1234);
    let mut systick = SysTick::new(port);
    systick.deinit();
    assert_eq!(snapshot(&systick), (ControlStatus::empty(), 0, 0));
}

#[test]
fn test_mode_follows_hardware() {
    let mut systick = SysTick::new(MockSysTick::new());
    assert_eq!(systick.mode(), TimerMode::Disabled);

    systick.init_interrupt_mode(1).unwrap();
    assert_eq!(systick.mode(), TimerMode::Interrupt);

    systick.stop();
    assert_eq!(systick.mode(), TimerMode::Disabled);

    systick.start();
    assert_eq!(systick.mode(), TimerMode::Interrupt);

    systick.deinit();
    assert_eq!(systick.mode(), TimerMode::Disabled);
}

#[test]
fn test_external_clock_source() {
    let config = SysTickConfig::new(4_000, ClockSource::External);
    let mut systick = SysTick::with_config(MockSysTick::new(), config);

    let reload = systick.init_interrupt_mode(10).unwrap();
    assert_eq!(reload.raw(), 39_999);
    assert_eq!(systick.port().peek_control().bits(), 0b011);
    assert_eq!(systick.config().max_duration_ms(), 4194);
}

#[test]
fn test_free_returns_port() {
    let mut systick = SysTick::new(MockSysTick::new());
    systick.init_interrupt_mode(3).unwrap();
    let port = systick.free();
    assert_eq!(port.read_reload(), 47_999);
}
