//! Core traits and types for cycle-accurate emulation.
//!
//! A CPU talks to the rest of the machine only through [`Bus`]. Every
//! component exposes its state through [`Observable`] so it can be inspected
//! without disturbing emulation.

mod bus;
mod cpu;
mod observable;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
