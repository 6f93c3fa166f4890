//! RTC-interrupt LED blink for the SiFive HiFive1 (FE310-G002).
//!
//! The crate is a minimal metal layer (the GPIO output path, the PLIC,
//! the AON real-time counter and the hart-local interrupt enables) plus
//! the blink program on top of it: [`blink::boot`] wires one pin and one
//! compare deadline, and [`blink::Blinky::service`] toggles the pin once
//! per second from the compare-match interrupt, forever.
//!
//! Peripheral handles are plain base pointers, so the program core also
//! runs against in-memory register maps on the host; see `tests/blink.rs`.
//! The `rt` feature pulls in `riscv-rt` for running on hardware; the demo
//! binary lives in `demos/blink.rs`.
#![cfg_attr(not(test), no_std)]

// This must go first so that the log shims are visible to the other modules.
mod fmt;

pub mod blink;
pub mod board;
pub mod cpu;
pub mod gpio;
pub mod plic;
pub mod reg;
pub mod rtc;

pub use blink::{boot, Blinky, Board, BootError, Config};
