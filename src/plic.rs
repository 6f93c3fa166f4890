//! Platform-Level Interrupt Controller.
//!
//! Hart 0 machine-mode view of the FE310 PLIC: source priorities, pending
//! and enable bit arrays, and the claim/complete register.

use crate::reg::Reg;

const PRIORITY_BASE: usize = 0x0000;
const PENDING_BASE: usize = 0x1000;
const ENABLE_BASE: usize = 0x2000;
const THRESHOLD: usize = 0x20_0000;
const CLAIM: usize = 0x20_0004;

/// PLIC handle.
#[derive(Clone, Copy, Debug)]
pub struct Plic {
    ptr: *mut (),
}

unsafe impl Send for Plic {}
unsafe impl Sync for Plic {}

impl Plic {
    /// # Safety
    ///
    /// `ptr` must point at a register region with the FE310 PLIC layout.
    pub const unsafe fn from_ptr(ptr: *mut ()) -> Self {
        Self { ptr }
    }

    fn reg(&self, offset: usize) -> Reg<u32> {
        unsafe { Reg::from_ptr((self.ptr as *mut u8).add(offset) as *mut u32) }
    }

    fn enable_word(&self, id: u16) -> Reg<u32> {
        self.reg(ENABLE_BASE + 4 * usize::from(id / 32))
    }

    fn pending_word(&self, id: u16) -> Reg<u32> {
        self.reg(PENDING_BASE + 4 * usize::from(id / 32))
    }

    /// Set the priority of one source (0 masks it entirely).
    pub fn set_priority(&self, id: u16, priority: u32) {
        self.reg(PRIORITY_BASE + 4 * usize::from(id)).write(priority);
    }

    pub fn priority(&self, id: u16) -> u32 {
        self.reg(PRIORITY_BASE + 4 * usize::from(id)).read()
    }

    /// Sources at or below the threshold never reach the hart.
    pub fn set_threshold(&self, threshold: u32) {
        self.reg(THRESHOLD).write(threshold);
    }

    pub fn enable(&self, id: u16) {
        self.enable_word(id).modify(|r| r | (1 << (id % 32)));
    }

    pub fn disable(&self, id: u16) {
        self.enable_word(id).modify(|r| r & !(1 << (id % 32)));
    }

    pub fn is_enabled(&self, id: u16) -> bool {
        self.enable_word(id).read() & (1 << (id % 32)) != 0
    }

    pub fn is_pending(&self, id: u16) -> bool {
        self.pending_word(id).read() & (1 << (id % 32)) != 0
    }

    /// Claim the highest-priority pending source, if any.
    pub fn claim(&self) -> Option<u16> {
        match self.reg(CLAIM).read() {
            0 => None,
            id => Some(id as u16),
        }
    }

    /// Signal completion of a claimed source.
    pub fn complete(&self, id: u16) {
        self.reg(CLAIM).write(u32::from(id));
    }
}

/// One PLIC interrupt source, bound to its controller.
#[derive(Debug)]
pub struct InterruptLine {
    plic: Plic,
    id: u16,
}

impl InterruptLine {
    pub fn new(plic: Plic, id: u16) -> Self {
        Self { plic, id }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    /// Route the source to the hart: lowest non-zero priority, threshold
    /// at zero so nothing is filtered.
    pub fn init(&mut self) {
        self.plic.set_priority(self.id, 1);
        self.plic.set_threshold(0);
    }

    pub fn enable(&mut self) {
        self.plic.enable(self.id);
    }

    pub fn disable(&mut self) {
        self.plic.disable(self.id);
    }

    pub fn is_enabled(&self) -> bool {
        self.plic.is_enabled(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock() -> Plic {
        let mem = vec![0u32; (CLAIM + 4) / 4].leak();
        unsafe { Plic::from_ptr(mem.as_mut_ptr() as *mut ()) }
    }

    #[test]
    fn enable_disable_single_source() {
        let plic = mock();

        plic.enable(2);
        assert!(plic.is_enabled(2));
        assert!(!plic.is_enabled(3));

        plic.disable(2);
        assert!(!plic.is_enabled(2));
    }

    #[test]
    fn enable_indexes_past_first_word() {
        let plic = mock();

        plic.enable(33);
        assert!(plic.is_enabled(33));
        assert_eq!(plic.reg(ENABLE_BASE + 4).read(), 1 << 1);
        assert_eq!(plic.reg(ENABLE_BASE).read(), 0);
    }

    #[test]
    fn pending_bits_index_like_enable_bits() {
        let plic = mock();

        plic.reg(PENDING_BASE).write(1 << 2);
        assert!(plic.is_pending(2));
        assert!(!plic.is_pending(33));
    }

    #[test]
    fn claim_zero_means_idle() {
        let plic = mock();
        assert_eq!(plic.claim(), None);

        plic.reg(CLAIM).write(2);
        assert_eq!(plic.claim(), Some(2));

        plic.complete(2);
        assert_eq!(plic.reg(CLAIM).read(), 2);
    }

    #[test]
    fn line_init_routes_source() {
        let plic = mock();
        let mut line = InterruptLine::new(plic, 2);

        line.init();
        assert_eq!(plic.priority(2), 1);
        assert_eq!(plic.reg(THRESHOLD).read(), 0);

        line.enable();
        assert!(line.is_enabled());
        line.disable();
        assert!(!line.is_enabled());
    }
}
