//! The blink program: boot sequence and compare-match service routine.
//!
//! [`boot`] brings the pin, the counter and the interrupt fabric into a
//! known armed state; [`Blinky::service`] handles one compare match and
//! re-arms the next one-second deadline. The state machine is
//! Stopped → Armed/Running → Servicing → Armed/Running, with no terminal
//! state.

use crate::cpu::{Cpu, CpuInterrupts};
use crate::gpio::{Gpio, Output};
use crate::plic::InterruptLine;
use crate::rtc::Rtc;

/// Tick rate the demo programs, in Hz. One blink period is one second,
/// i.e. this many ticks.
pub const RTC_RATE_HZ: u32 = 32_768;

/// The LED sits on GPIO pin 22.
pub const LED_PIN: u8 = 22;

/// Boot-time parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// RTC tick rate in Hz; also the blink period in ticks.
    pub rate: u32,
    /// Output pin driving the LED, in the GPIO block's 0..=31 range.
    pub pin: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rate: RTC_RATE_HZ,
            pin: LED_PIN,
        }
    }
}

/// Peripheral acquisition, in boot order. Every fallible step resolves
/// to `None` when the resource is unavailable.
pub trait Board {
    fn cpu(&mut self) -> Option<Cpu>;
    fn interrupt_controller(&mut self, cpu: &mut Cpu) -> Option<CpuInterrupts>;
    fn gpio(&mut self) -> Gpio;
    fn rtc(&mut self) -> Option<Rtc>;
    fn rtc_interrupt(&mut self, rtc: &Rtc) -> Option<InterruptLine>;
}

/// A boot-time resource that failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    Cpu,
    InterruptController,
    Rtc,
    RtcInterrupt,
}

impl BootError {
    /// Process exit status for a failed boot.
    pub const fn exit_code(self) -> u32 {
        1
    }
}

/// The armed blinker: everything the service routine needs to re-arm
/// itself, and nothing else.
#[derive(Debug)]
pub struct Blinky {
    led: Output,
    rtc: Rtc,
    line: InterruptLine,
    period: u32,
}

/// Bring the pin, the RTC and the interrupt fabric into a known state
/// and arm the first one-second deadline.
///
/// Each acquisition failure aborts immediately; no hardware beyond the
/// steps that already ran is touched. The returned [`Blinky`] is armed
/// but not counting: hand it to the interrupt dispatcher, unmask the
/// hart enable ([`CpuInterrupts::unmask`]) and call [`Blinky::start`].
pub fn boot<B: Board>(board: &mut B, config: Config) -> Result<Blinky, BootError> {
    let mut cpu = board.cpu().ok_or(BootError::Cpu)?;
    let mut intc = board
        .interrupt_controller(&mut cpu)
        .ok_or(BootError::InterruptController)?;
    intc.init();

    let led = Output::new(board.gpio(), config.pin);

    let mut rtc = board.rtc().ok_or(BootError::Rtc)?;
    // The counter must be stopped before its registers are reprogrammed.
    rtc.stop();

    let mut line = board.rtc_interrupt(&rtc).ok_or(BootError::RtcInterrupt)?;
    line.init();

    rtc.set_rate(config.rate);
    info!("RTC Count Rate [Hz]: {}", rtc.rate());

    let period = config.rate;
    rtc.set_count(0);
    rtc.set_compare(period);

    line.enable();

    Ok(Blinky {
        led,
        rtc,
        line,
        period,
    })
}

impl Blinky {
    /// Start the counter toward the armed deadline.
    pub fn start(&mut self) {
        self.rtc.start();
    }

    /// Service one compare match.
    ///
    /// The order is load-bearing: the counter stops and the source is
    /// masked before anything else, and the source is re-enabled only
    /// after the next deadline is programmed, so a second delivery can
    /// neither preempt the routine nor fire early.
    pub fn service(&mut self) {
        self.rtc.stop();
        self.line.disable();

        // Resolve the pending condition by nudging the compare just past
        // the live count; there is no write-to-clear flag register.
        let count = self.rtc.scaled_count();
        self.rtc.set_compare(count.wrapping_add(1));

        self.led.toggle();
        info!("Blink!");

        self.rtc.set_count(0);
        self.rtc.set_compare(self.period);
        self.line.enable();
        self.rtc.start();
    }

    /// PLIC source this blinker is registered on.
    pub fn interrupt_id(&self) -> u16 {
        self.line.id()
    }

    pub fn led(&self) -> &Output {
        &self.led
    }

    pub fn rtc(&self) -> &Rtc {
        &self.rtc
    }

    pub fn interrupt(&self) -> &InterruptLine {
        &self.line
    }
}
