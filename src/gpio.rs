//! General Purpose Input/Output.
//!
//! Only the plain digital output path is implemented; that is all the
//! blinker drives. Register offsets follow the FE310-G002 GPIO instance.

use core::convert::Infallible;

use crate::reg::Reg;

/// GPIO register block handle.
#[derive(Clone, Copy, Debug)]
pub struct Gpio {
    ptr: *mut (),
}

unsafe impl Send for Gpio {}
unsafe impl Sync for Gpio {}

impl Gpio {
    /// # Safety
    ///
    /// `ptr` must point at a register block with the FE310 GPIO layout.
    pub const unsafe fn from_ptr(ptr: *mut ()) -> Self {
        Self { ptr }
    }

    fn reg(&self, offset: usize) -> Reg<u32> {
        unsafe { Reg::from_ptr((self.ptr as *mut u8).add(offset) as *mut u32) }
    }

    /// Input enable, one bit per pin.
    pub fn input_en(&self) -> Reg<u32> {
        self.reg(0x04)
    }

    /// Output enable, one bit per pin.
    pub fn output_en(&self) -> Reg<u32> {
        self.reg(0x08)
    }

    /// Output value, one bit per pin.
    pub fn output_val(&self) -> Reg<u32> {
        self.reg(0x0c)
    }

    /// Internal pull-up enable, one bit per pin.
    pub fn pue(&self) -> Reg<u32> {
        self.reg(0x10)
    }

    /// IO function enable (pin-mux), one bit per pin.
    pub fn iof_en(&self) -> Reg<u32> {
        self.reg(0x38)
    }
}

/// Digital output level.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Low
    Low,
    /// High
    High,
}

impl From<bool> for Level {
    fn from(val: bool) -> Self {
        match val {
            true => Self::High,
            false => Self::Low,
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> bool {
        match level {
            Level::Low => false,
            Level::High => true,
        }
    }
}

/// GPIO output driver for a single pin.
#[derive(Debug)]
pub struct Output {
    gpio: Gpio,
    mask: u32,
}

impl Output {
    /// Configure `pin` as a plain digital output. The block has 32 pins;
    /// the index wraps modulo 32.
    ///
    /// The write order is load-bearing: the pin floats until output-enable
    /// is set, and the LED's output path on this board additionally needs
    /// the IOF enable bit asserted per the pin-mux wiring.
    pub fn new(gpio: Gpio, pin: u8) -> Self {
        let mask = 1u32 << (pin % 32);
        critical_section::with(|_| {
            gpio.input_en().modify(|r| r & !mask);
            gpio.output_en().modify(|r| r | mask);
            gpio.pue().modify(|r| r & !mask);
            gpio.iof_en().modify(|r| r | mask);
        });
        Self { gpio, mask }
    }

    /// Set the output as high.
    #[inline]
    pub fn set_high(&mut self) {
        self.gpio.output_val().modify(|r| r | self.mask);
    }

    /// Set the output as low.
    #[inline]
    pub fn set_low(&mut self) {
        self.gpio.output_val().modify(|r| r & !self.mask);
    }

    /// Toggle the output value bit.
    #[inline]
    pub fn toggle(&mut self) {
        self.gpio.output_val().modify(|r| r ^ self.mask);
    }

    /// Is the output set high?
    #[inline]
    pub fn is_set_high(&self) -> bool {
        self.gpio.output_val().read() & self.mask != 0
    }

    /// Is the output set low?
    #[inline]
    pub fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }

    /// What level the output is set to.
    #[inline]
    pub fn get_output_level(&self) -> Level {
        self.is_set_high().into()
    }
}

// ====================
// Implement embedded-hal traits

impl embedded_hal::digital::ErrorType for Output {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for Output {
    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok((*self).set_high())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok((*self).set_low())
    }
}

impl embedded_hal::digital::StatefulOutputPin for Output {
    #[inline]
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok((*self).is_set_high())
    }

    #[inline]
    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok((*self).is_set_low())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0x44 bytes covers every register the driver touches.
    fn mock() -> Gpio {
        let mem = Box::leak(Box::new([0u32; 0x44 / 4]));
        unsafe { Gpio::from_ptr(mem.as_mut_ptr() as *mut ()) }
    }

    #[test]
    fn configure_writes_all_four_controls() {
        let gpio = mock();
        // Start from a state where the clears are observable.
        gpio.input_en().write(0xffff_ffff);
        gpio.pue().write(0xffff_ffff);

        let _led = Output::new(gpio, 22);

        assert_eq!(gpio.input_en().read(), !(1 << 22));
        assert_eq!(gpio.output_en().read(), 1 << 22);
        assert_eq!(gpio.pue().read(), !(1 << 22));
        assert_eq!(gpio.iof_en().read(), 1 << 22);
    }

    #[test]
    fn configure_leaves_other_pins_alone() {
        let gpio = mock();
        gpio.output_en().write(1 << 5);
        gpio.output_val().write(1 << 5);

        let _led = Output::new(gpio, 22);

        assert_eq!(gpio.output_en().read(), (1 << 5) | (1 << 22));
        assert_eq!(gpio.output_val().read(), 1 << 5);
    }

    #[test]
    fn toggle_flips_exactly_one_bit() {
        let gpio = mock();
        let mut led = Output::new(gpio, 22);

        assert!(led.is_set_low());
        led.toggle();
        assert!(led.is_set_high());
        assert_eq!(gpio.output_val().read(), 1 << 22);

        // Double toggle restores the prior state.
        led.toggle();
        assert!(led.is_set_low());
        assert_eq!(gpio.output_val().read(), 0);
    }

    #[test]
    fn pin_index_wraps_modulo_register_width() {
        let gpio = mock();
        let mut led = Output::new(gpio, 22 + 32);

        led.set_high();
        assert_eq!(gpio.output_val().read(), 1 << 22);
    }

    #[test]
    fn level_tracks_output_value() {
        let gpio = mock();
        let mut led = Output::new(gpio, 22);

        led.set_high();
        assert_eq!(led.get_output_level(), Level::High);
        led.set_low();
        assert_eq!(led.get_output_level(), Level::Low);
    }
}
