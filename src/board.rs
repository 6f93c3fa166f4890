//! HiFive1 Rev B (FE310-G002) resource table.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::blink::Board;
use crate::cpu::{self, Cpu, CpuInterrupts};
use crate::gpio::Gpio;
use crate::plic::{InterruptLine, Plic};
use crate::rtc::Rtc;

/// Platform-level interrupt controller.
pub const PLIC_BASE: usize = 0x0c00_0000;
/// Always-On block (RTC, watchdog, backup registers).
pub const AON_BASE: usize = 0x1000_0000;
/// GPIO instance 0.
pub const GPIO0_BASE: usize = 0x1001_2000;

static TAKEN: AtomicBool = AtomicBool::new(false);

/// The board's peripheral singletons.
///
/// Each fallible resource is handed out at most once; a second
/// acquisition resolves to `None`, the moral equivalent of the vendor
/// layer's null device handle.
pub struct HiFive1 {
    cpu: Option<Cpu>,
    intc: Option<CpuInterrupts>,
    rtc: Option<Rtc>,
    plic: Option<Plic>,
    gpio: Gpio,
}

impl HiFive1 {
    /// Take the board singletons. `None` once they are taken.
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(unsafe { Self::steal() })
        }
    }

    /// # Safety
    ///
    /// Creates handles that alias the memory-mapped peripherals of any
    /// previously taken instance.
    pub unsafe fn steal() -> Self {
        Self {
            cpu: Some(Cpu::new(cpu::current_hartid())),
            intc: Some(CpuInterrupts::steal()),
            rtc: Some(Rtc::from_ptr(AON_BASE as *mut ())),
            plic: Some(Plic::from_ptr(PLIC_BASE as *mut ())),
            gpio: Gpio::from_ptr(GPIO0_BASE as *mut ()),
        }
    }
}

impl Board for HiFive1 {
    fn cpu(&mut self) -> Option<Cpu> {
        self.cpu.take()
    }

    fn interrupt_controller(&mut self, _cpu: &mut Cpu) -> Option<CpuInterrupts> {
        self.intc.take()
    }

    fn gpio(&mut self) -> Gpio {
        self.gpio
    }

    fn rtc(&mut self) -> Option<Rtc> {
        self.rtc.take()
    }

    fn rtc_interrupt(&mut self, rtc: &Rtc) -> Option<InterruptLine> {
        Some(InterruptLine::new(self.plic.take()?, rtc.interrupt_id()))
    }
}
