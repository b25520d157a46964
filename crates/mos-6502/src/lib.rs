//! Cycle-accounting MOS 6502 CPU emulator.
//!
//! Each `clock()` is one CPU cycle. An instruction's effects all land on the
//! cycle that fetches its opcode; the remaining cycles of the instruction are
//! idle countdown, so callers see hardware-exact timing without the CPU
//! modelling individual bus accesses.
//!
//! Decoding is table driven: [`INSTRUCTIONS`] maps every opcode byte to an
//! [`Operation`], an [`AddressingMode`] and a base cycle count.

mod addressing;
mod cpu;
mod disasm;
mod execute;
pub mod flags;
mod opcodes;
mod registers;

pub use addressing::AddressingMode;
pub use cpu::Mos6502;
pub use disasm::disassemble;
pub use flags::Status;
pub use opcodes::{INSTRUCTIONS, Instruction, Operation};
pub use registers::Registers;

/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ and BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// NMI vector.
pub const NMI_VECTOR: u16 = 0xFFFA;
