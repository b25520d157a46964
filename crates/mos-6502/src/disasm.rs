//! Table-driven disassembler for trace output.

use crate::{AddressingMode, INSTRUCTIONS, Operation};
use emu_core::Bus;

/// Disassemble the instruction at `pc`.
///
/// Returns the assembly text and the instruction length in bytes. Operand
/// bytes are read through the bus, so only use this on buses whose reads
/// have no side effects.
pub fn disassemble(bus: &mut impl Bus, pc: u16) -> (String, u16) {
    let opcode = bus.read(pc);
    let instruction = &INSTRUCTIONS[usize::from(opcode)];
    let lo = bus.read(pc.wrapping_add(1));
    let hi = bus.read(pc.wrapping_add(2));
    let word = u16::from_le_bytes([lo, hi]);
    let name = instruction.name;
    // BRK skips a padding byte after the opcode.
    if instruction.operation == Operation::Brk {
        return (format!("{name} #${lo:02X}"), 2);
    }
    let len = 1 + instruction.mode.operand_len();

    let text = match instruction.mode {
        AddressingMode::Implied => name.to_string(),
        AddressingMode::Immediate => format!("{name} #${lo:02X}"),
        AddressingMode::ZeroPage => format!("{name} ${lo:02X}"),
        AddressingMode::ZeroPageX => format!("{name} ${lo:02X},X"),
        AddressingMode::ZeroPageY => format!("{name} ${lo:02X},Y"),
        AddressingMode::Relative => {
            let target = pc
                .wrapping_add(2)
                .wrapping_add(i16::from(lo as i8) as u16);
            format!("{name} ${target:04X}")
        }
        AddressingMode::Absolute => format!("{name} ${word:04X}"),
        AddressingMode::AbsoluteX => format!("{name} ${word:04X},X"),
        AddressingMode::AbsoluteY => format!("{name} ${word:04X},Y"),
        AddressingMode::Indirect => format!("{name} (${word:04X})"),
        AddressingMode::IndexedIndirect => format!("{name} (${lo:02X},X)"),
        AddressingMode::IndirectIndexed => format!("{name} (${lo:02X}),Y"),
    };

    (text, len)
}
