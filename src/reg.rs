//! Volatile access to memory-mapped registers.

/// A single memory-mapped register.
///
/// Copying the handle copies the pointer, not the register.
#[derive(Clone, Copy)]
pub struct Reg<T: Copy> {
    ptr: *mut T,
}

unsafe impl<T: Copy> Send for Reg<T> {}
unsafe impl<T: Copy> Sync for Reg<T> {}

impl<T: Copy> Reg<T> {
    /// # Safety
    ///
    /// `ptr` must be valid for volatile reads and writes of `T` for the
    /// lifetime of the handle.
    pub const unsafe fn from_ptr(ptr: *mut T) -> Self {
        Self { ptr }
    }

    #[inline]
    pub fn read(&self) -> T {
        unsafe { self.ptr.read_volatile() }
    }

    #[inline]
    pub fn write(&self, val: T) {
        #[cfg(test)]
        write_log::record(self.ptr as usize);
        unsafe { self.ptr.write_volatile(val) }
    }

    #[inline]
    pub fn modify(&self, f: impl FnOnce(T) -> T) {
        self.write(f(self.read()));
    }
}
