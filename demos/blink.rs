//! RTC-interrupt LED blink on the HiFive1 Rev B.
//!
//! The green LED on GPIO 22 toggles once per second from the RTC
//! compare-match interrupt; the foreground parks in `wfi`.
//!
//! Build with:
//!
//! ```sh
//! cargo build --release --example blink --features rt,defmt \
//!     --target riscv32imac-unknown-none-elf
//! ```

#![no_main]
#![no_std]

use core::cell::RefCell;

use critical_section::Mutex;
use hifive1_blink::blink::{self, Blinky, Config};
use hifive1_blink::board::{self, HiFive1};
use hifive1_blink::cpu::CpuInterrupts;
use hifive1_blink::plic::Plic;
use {defmt_rtt as _, panic_halt as _};

/// Registered service object; the dispatcher owns it once boot hands
/// it over.
static BLINKY: Mutex<RefCell<Option<Blinky>>> = Mutex::new(RefCell::new(None));

#[riscv_rt::entry]
fn main() -> ! {
    let Some(mut board) = HiFive1::take() else {
        park();
    };

    match blink::boot(&mut board, Config::default()) {
        Ok(blinky) => {
            critical_section::with(|cs| BLINKY.borrow_ref_mut(cs).replace(blinky));

            // Registration done: unmask the hart enable, then start the
            // counter toward the first deadline.
            unsafe { CpuInterrupts::unmask() };
            critical_section::with(|cs| {
                if let Some(blinky) = BLINKY.borrow_ref_mut(cs).as_mut() {
                    blinky.start();
                }
            });

            // Nothing left for the foreground; compare matches do the rest.
            loop {
                riscv::asm::wfi();
            }
        }
        Err(err) => {
            defmt::error!("boot failed with status {}: {}", err.exit_code(), err);
            park()
        }
    }
}

#[export_name = "MachineExternal"]
fn machine_external() {
    let plic = unsafe { Plic::from_ptr(board::PLIC_BASE as *mut ()) };
    if let Some(id) = plic.claim() {
        critical_section::with(|cs| {
            if let Some(blinky) = BLINKY.borrow_ref_mut(cs).as_mut() {
                if id == blinky.interrupt_id() {
                    blinky.service();
                }
            }
        });
        plic.complete(id);
    }
}

/// Bare metal has no process to exit; hold the hart in low-power wait.
fn park() -> ! {
    loop {
        riscv::asm::wfi();
    }
}
