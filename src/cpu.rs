//! Hart handle and the hart-local interrupt enables.

/// Identifier of the executing hart. Reads `mhartid` on riscv targets;
/// host builds (tests) are always hart 0.
pub fn current_hartid() -> usize {
    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    {
        riscv::register::mhartid::read()
    }
    #[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
    {
        0
    }
}

/// Handle to one hart.
pub struct Cpu {
    hartid: usize,
}

impl Cpu {
    pub fn new(hartid: usize) -> Self {
        Self { hartid }
    }

    pub fn hartid(&self) -> usize {
        self.hartid
    }
}

/// The hart-local interrupt controller, i.e. the machine interrupt
/// enable CSRs. The trap vector itself is installed by the runtime.
pub struct CpuInterrupts {
    _private: (),
}

impl CpuInterrupts {
    /// # Safety
    ///
    /// The CSRs behind this handle are hart-global; at most one handle
    /// per hart may be live.
    pub const unsafe fn steal() -> Self {
        Self { _private: () }
    }

    /// Mask machine-level interrupts while sources are being wired up.
    pub fn init(&mut self) {
        #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
        riscv::interrupt::disable();
    }

    /// Unmask external interrupts and the machine global enable, the
    /// hart's aggregated "line 0".
    ///
    /// # Safety
    ///
    /// Every enabled source must have a handler registered before this
    /// is called.
    pub unsafe fn unmask() {
        #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
        {
            riscv::register::mie::set_mext();
            riscv::interrupt::enable();
        }
    }
}
