//! Always-On real-time counter (RTC).
//!
//! A 48-bit counter clocked at 32768 Hz with a 4-bit scale divider and a
//! 32-bit compare register. The compare is evaluated against the *scaled*
//! counter (`count >> scale`); a match (`scaled count >= compare`) raises
//! PLIC source 2 on the FE310-G002. Register offsets are relative to the
//! AON block base.

use crate::reg::Reg;

/// RTC input clock, the AON low-frequency oscillator.
pub const INPUT_CLOCK_HZ: u32 = 32_768;

/// PLIC source of the RTC compare match.
const INTERRUPT_ID: u16 = 2;

const CFG_SCALE_MASK: u32 = 0xf;
const CFG_ENALWAYS: u32 = 1 << 12;

/// RTC driver over the AON register block.
#[derive(Debug)]
pub struct Rtc {
    ptr: *mut (),
}

unsafe impl Send for Rtc {}

impl Rtc {
    /// # Safety
    ///
    /// `ptr` must point at a register block with the FE310 AON layout.
    pub const unsafe fn from_ptr(ptr: *mut ()) -> Self {
        Self { ptr }
    }

    fn reg(&self, offset: usize) -> Reg<u32> {
        unsafe { Reg::from_ptr((self.ptr as *mut u8).add(offset) as *mut u32) }
    }

    fn cfg(&self) -> Reg<u32> {
        self.reg(0x40)
    }

    fn count_lo(&self) -> Reg<u32> {
        self.reg(0x48)
    }

    fn count_hi(&self) -> Reg<u32> {
        self.reg(0x4c)
    }

    fn cmp(&self) -> Reg<u32> {
        self.reg(0x60)
    }

    /// Start the counter.
    pub fn start(&mut self) {
        self.cfg().modify(|r| r | CFG_ENALWAYS);
    }

    /// Stop the counter. Must precede any reprogramming of the count,
    /// compare or rate.
    pub fn stop(&mut self) {
        self.cfg().modify(|r| r & !CFG_ENALWAYS);
    }

    /// Is the counter running?
    pub fn is_running(&self) -> bool {
        self.cfg().read() & CFG_ENALWAYS != 0
    }

    /// The raw 48-bit count.
    pub fn count(&self) -> u64 {
        // Re-read on a carry between the two halves.
        loop {
            let hi = self.count_hi().read();
            let lo = self.count_lo().read();
            if hi == self.count_hi().read() {
                return (u64::from(hi) << 32) | u64::from(lo);
            }
        }
    }

    /// Set the raw count. The high half is 16 bits wide.
    pub fn set_count(&mut self, count: u64) {
        self.count_hi().write(((count >> 32) & 0xffff) as u32);
        self.count_lo().write(count as u32);
    }

    /// The count as the compare logic sees it: `count >> scale`.
    pub fn scaled_count(&self) -> u32 {
        (self.count() >> self.scale()) as u32
    }

    /// Compare value; a match is `scaled_count() >= compare()`.
    pub fn compare(&self) -> u32 {
        self.cmp().read()
    }

    pub fn set_compare(&mut self, compare: u32) {
        self.cmp().write(compare);
    }

    /// Program the tick rate: picks the smallest scale whose effective
    /// rate does not exceed `hz`.
    pub fn set_rate(&mut self, hz: u32) {
        let mut scale = 0;
        while scale < CFG_SCALE_MASK && (INPUT_CLOCK_HZ >> scale) > hz {
            scale += 1;
        }
        self.cfg().modify(|r| (r & !CFG_SCALE_MASK) | scale);
    }

    /// Effective tick rate in Hz.
    pub fn rate(&self) -> u32 {
        INPUT_CLOCK_HZ >> self.scale()
    }

    /// Is a compare match pending?
    pub fn is_pending(&self) -> bool {
        self.scaled_count() >= self.compare()
    }

    /// PLIC source this RTC raises on a compare match.
    pub fn interrupt_id(&self) -> u16 {
        INTERRUPT_ID
    }

    fn scale(&self) -> u32 {
        self.cfg().read() & CFG_SCALE_MASK
    }
}
