//! NES CPU runner.
//!
//! Loads an iNES cartridge into a flat 64KB bus and drives a MOS 6502
//! against it, one CPU cycle per `clock()`. Picture, sound and mapper
//! hardware are not modelled.

mod config;
pub mod logger;
mod nes;

pub use config::{NesConfig, NesRegion};
pub use nes::Nes;
pub use nes_cartridge::CartridgeError;
