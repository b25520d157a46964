//! The 256-entry opcode table.
//!
//! Each entry carries the mnemonic, the operation, the addressing mode and
//! the base cycle count. Unassigned opcodes decode to [`Operation::Xxx`] and
//! execute as a no-op with their base timing. The unofficial NOP family is
//! given its hardware addressing mode so the operand bytes are skipped.

use crate::AddressingMode;
use crate::AddressingMode::{
    Absolute as ABS, AbsoluteX as ABX, AbsoluteY as ABY, Immediate as IMM, Implied as IMP,
    IndexedIndirect as IZX, Indirect as IND, IndirectIndexed as IZY, Relative as REL,
    ZeroPage as ZP0, ZeroPageX as ZPX, ZeroPageY as ZPY,
};
use Operation as Op;

/// The behaviour an opcode performs once its operand address is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Unassigned opcode.
    Xxx,
}

/// One row of the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Three-letter mnemonic, `???` for unassigned opcodes.
    pub name: &'static str,
    pub operation: Operation,
    pub mode: AddressingMode,
    /// Base cycles before page-cross and branch penalties.
    pub cycles: u8,
}

const fn op(
    name: &'static str,
    operation: Operation,
    mode: AddressingMode,
    cycles: u8,
) -> Instruction {
    Instruction {
        name,
        operation,
        mode,
        cycles,
    }
}

/// Decode table indexed by opcode byte.
pub static INSTRUCTIONS: [Instruction; 256] = [
    // $00
    op("BRK", Op::Brk, IMP, 7),
    op("ORA", Op::Ora, IZX, 6),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZP0, 3),
    op("ORA", Op::Ora, ZP0, 3),
    op("ASL", Op::Asl, ZP0, 5),
    op("???", Op::Xxx, IMP, 5),
    op("PHP", Op::Php, IMP, 3),
    op("ORA", Op::Ora, IMM, 2),
    op("ASL", Op::Asl, IMP, 2),
    op("???", Op::Xxx, IMP, 2),
    op("NOP", Op::Nop, ABS, 4),
    op("ORA", Op::Ora, ABS, 4),
    op("ASL", Op::Asl, ABS, 6),
    op("???", Op::Xxx, IMP, 6),
    // $10
    op("BPL", Op::Bpl, REL, 2),
    op("ORA", Op::Ora, IZY, 5),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZPX, 4),
    op("ORA", Op::Ora, ZPX, 4),
    op("ASL", Op::Asl, ZPX, 6),
    op("???", Op::Xxx, IMP, 6),
    op("CLC", Op::Clc, IMP, 2),
    op("ORA", Op::Ora, ABY, 4),
    op("NOP", Op::Nop, IMP, 2),
    op("???", Op::Xxx, IMP, 7),
    op("NOP", Op::Nop, ABX, 4),
    op("ORA", Op::Ora, ABX, 4),
    op("ASL", Op::Asl, ABX, 7),
    op("???", Op::Xxx, IMP, 7),
    // $20
    op("JSR", Op::Jsr, ABS, 6),
    op("AND", Op::And, IZX, 6),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("BIT", Op::Bit, ZP0, 3),
    op("AND", Op::And, ZP0, 3),
    op("ROL", Op::Rol, ZP0, 5),
    op("???", Op::Xxx, IMP, 5),
    op("PLP", Op::Plp, IMP, 4),
    op("AND", Op::And, IMM, 2),
    op("ROL", Op::Rol, IMP, 2),
    op("???", Op::Xxx, IMP, 2),
    op("BIT", Op::Bit, ABS, 4),
    op("AND", Op::And, ABS, 4),
    op("ROL", Op::Rol, ABS, 6),
    op("???", Op::Xxx, IMP, 6),
    // $30
    op("BMI", Op::Bmi, REL, 2),
    op("AND", Op::And, IZY, 5),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZPX, 4),
    op("AND", Op::And, ZPX, 4),
    op("ROL", Op::Rol, ZPX, 6),
    op("???", Op::Xxx, IMP, 6),
    op("SEC", Op::Sec, IMP, 2),
    op("AND", Op::And, ABY, 4),
    op("NOP", Op::Nop, IMP, 2),
    op("???", Op::Xxx, IMP, 7),
    op("NOP", Op::Nop, ABX, 4),
    op("AND", Op::And, ABX, 4),
    op("ROL", Op::Rol, ABX, 7),
    op("???", Op::Xxx, IMP, 7),
    // $40
    op("RTI", Op::Rti, IMP, 6),
    op("EOR", Op::Eor, IZX, 6),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZP0, 3),
    op("EOR", Op::Eor, ZP0, 3),
    op("LSR", Op::Lsr, ZP0, 5),
    op("???", Op::Xxx, IMP, 5),
    op("PHA", Op::Pha, IMP, 3),
    op("EOR", Op::Eor, IMM, 2),
    op("LSR", Op::Lsr, IMP, 2),
    op("???", Op::Xxx, IMP, 2),
    op("JMP", Op::Jmp, ABS, 3),
    op("EOR", Op::Eor, ABS, 4),
    op("LSR", Op::Lsr, ABS, 6),
    op("???", Op::Xxx, IMP, 6),
    // $50
    op("BVC", Op::Bvc, REL, 2),
    op("EOR", Op::Eor, IZY, 5),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZPX, 4),
    op("EOR", Op::Eor, ZPX, 4),
    op("LSR", Op::Lsr, ZPX, 6),
    op("???", Op::Xxx, IMP, 6),
    op("CLI", Op::Cli, IMP, 2),
    op("EOR", Op::Eor, ABY, 4),
    op("NOP", Op::Nop, IMP, 2),
    op("???", Op::Xxx, IMP, 7),
    op("NOP", Op::Nop, ABX, 4),
    op("EOR", Op::Eor, ABX, 4),
    op("LSR", Op::Lsr, ABX, 7),
    op("???", Op::Xxx, IMP, 7),
    // $60
    op("RTS", Op::Rts, IMP, 6),
    op("ADC", Op::Adc, IZX, 6),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZP0, 3),
    op("ADC", Op::Adc, ZP0, 3),
    op("ROR", Op::Ror, ZP0, 5),
    op("???", Op::Xxx, IMP, 5),
    op("PLA", Op::Pla, IMP, 4),
    op("ADC", Op::Adc, IMM, 2),
    op("ROR", Op::Ror, IMP, 2),
    op("???", Op::Xxx, IMP, 2),
    op("JMP", Op::Jmp, IND, 5),
    op("ADC", Op::Adc, ABS, 4),
    op("ROR", Op::Ror, ABS, 6),
    op("???", Op::Xxx, IMP, 6),
    // $70
    op("BVS", Op::Bvs, REL, 2),
    op("ADC", Op::Adc, IZY, 5),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZPX, 4),
    op("ADC", Op::Adc, ZPX, 4),
    op("ROR", Op::Ror, ZPX, 6),
    op("???", Op::Xxx, IMP, 6),
    op("SEI", Op::Sei, IMP, 2),
    op("ADC", Op::Adc, ABY, 4),
    op("NOP", Op::Nop, IMP, 2),
    op("???", Op::Xxx, IMP, 7),
    op("NOP", Op::Nop, ABX, 4),
    op("ADC", Op::Adc, ABX, 4),
    op("ROR", Op::Ror, ABX, 7),
    op("???", Op::Xxx, IMP, 7),
    // $80
    op("NOP", Op::Nop, IMM, 2),
    op("STA", Op::Sta, IZX, 6),
    op("NOP", Op::Nop, IMM, 2),
    op("???", Op::Xxx, IMP, 6),
    op("STY", Op::Sty, ZP0, 3),
    op("STA", Op::Sta, ZP0, 3),
    op("STX", Op::Stx, ZP0, 3),
    op("???", Op::Xxx, IMP, 3),
    op("DEY", Op::Dey, IMP, 2),
    op("NOP", Op::Nop, IMM, 2),
    op("TXA", Op::Txa, IMP, 2),
    op("???", Op::Xxx, IMP, 2),
    op("STY", Op::Sty, ABS, 4),
    op("STA", Op::Sta, ABS, 4),
    op("STX", Op::Stx, ABS, 4),
    op("???", Op::Xxx, IMP, 4),
    // $90
    op("BCC", Op::Bcc, REL, 2),
    op("STA", Op::Sta, IZY, 6),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 6),
    op("STY", Op::Sty, ZPX, 4),
    op("STA", Op::Sta, ZPX, 4),
    op("STX", Op::Stx, ZPY, 4),
    op("???", Op::Xxx, IMP, 4),
    op("TYA", Op::Tya, IMP, 2),
    op("STA", Op::Sta, ABY, 5),
    op("TXS", Op::Txs, IMP, 2),
    op("???", Op::Xxx, IMP, 5),
    op("???", Op::Xxx, IMP, 5),
    op("STA", Op::Sta, ABX, 5),
    op("???", Op::Xxx, IMP, 5),
    op("???", Op::Xxx, IMP, 5),
    // $A0
    op("LDY", Op::Ldy, IMM, 2),
    op("LDA", Op::Lda, IZX, 6),
    op("LDX", Op::Ldx, IMM, 2),
    op("???", Op::Xxx, IMP, 6),
    op("LDY", Op::Ldy, ZP0, 3),
    op("LDA", Op::Lda, ZP0, 3),
    op("LDX", Op::Ldx, ZP0, 3),
    op("???", Op::Xxx, IMP, 3),
    op("TAY", Op::Tay, IMP, 2),
    op("LDA", Op::Lda, IMM, 2),
    op("TAX", Op::Tax, IMP, 2),
    op("???", Op::Xxx, IMP, 2),
    op("LDY", Op::Ldy, ABS, 4),
    op("LDA", Op::Lda, ABS, 4),
    op("LDX", Op::Ldx, ABS, 4),
    op("???", Op::Xxx, IMP, 4),
    // $B0
    op("BCS", Op::Bcs, REL, 2),
    op("LDA", Op::Lda, IZY, 5),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 5),
    op("LDY", Op::Ldy, ZPX, 4),
    op("LDA", Op::Lda, ZPX, 4),
    op("LDX", Op::Ldx, ZPY, 4),
    op("???", Op::Xxx, IMP, 4),
    op("CLV", Op::Clv, IMP, 2),
    op("LDA", Op::Lda, ABY, 4),
    op("TSX", Op::Tsx, IMP, 2),
    op("???", Op::Xxx, IMP, 4),
    op("LDY", Op::Ldy, ABX, 4),
    op("LDA", Op::Lda, ABX, 4),
    op("LDX", Op::Ldx, ABY, 4),
    op("???", Op::Xxx, IMP, 4),
    // $C0
    op("CPY", Op::Cpy, IMM, 2),
    op("CMP", Op::Cmp, IZX, 6),
    op("NOP", Op::Nop, IMM, 2),
    op("???", Op::Xxx, IMP, 8),
    op("CPY", Op::Cpy, ZP0, 3),
    op("CMP", Op::Cmp, ZP0, 3),
    op("DEC", Op::Dec, ZP0, 5),
    op("???", Op::Xxx, IMP, 5),
    op("INY", Op::Iny, IMP, 2),
    op("CMP", Op::Cmp, IMM, 2),
    op("DEX", Op::Dex, IMP, 2),
    op("???", Op::Xxx, IMP, 2),
    op("CPY", Op::Cpy, ABS, 4),
    op("CMP", Op::Cmp, ABS, 4),
    op("DEC", Op::Dec, ABS, 6),
    op("???", Op::Xxx, IMP, 6),
    // $D0
    op("BNE", Op::Bne, REL, 2),
    op("CMP", Op::Cmp, IZY, 5),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZPX, 4),
    op("CMP", Op::Cmp, ZPX, 4),
    op("DEC", Op::Dec, ZPX, 6),
    op("???", Op::Xxx, IMP, 6),
    op("CLD", Op::Cld, IMP, 2),
    op("CMP", Op::Cmp, ABY, 4),
    op("NOP", Op::Nop, IMP, 2),
    op("???", Op::Xxx, IMP, 7),
    op("NOP", Op::Nop, ABX, 4),
    op("CMP", Op::Cmp, ABX, 4),
    op("DEC", Op::Dec, ABX, 7),
    op("???", Op::Xxx, IMP, 7),
    // $E0
    op("CPX", Op::Cpx, IMM, 2),
    op("SBC", Op::Sbc, IZX, 6),
    op("NOP", Op::Nop, IMM, 2),
    op("???", Op::Xxx, IMP, 8),
    op("CPX", Op::Cpx, ZP0, 3),
    op("SBC", Op::Sbc, ZP0, 3),
    op("INC", Op::Inc, ZP0, 5),
    op("???", Op::Xxx, IMP, 5),
    op("INX", Op::Inx, IMP, 2),
    op("SBC", Op::Sbc, IMM, 2),
    op("NOP", Op::Nop, IMP, 2),
    op("SBC", Op::Sbc, IMM, 2),
    op("CPX", Op::Cpx, ABS, 4),
    op("SBC", Op::Sbc, ABS, 4),
    op("INC", Op::Inc, ABS, 6),
    op("???", Op::Xxx, IMP, 6),
    // $F0
    op("BEQ", Op::Beq, REL, 2),
    op("SBC", Op::Sbc, IZY, 5),
    op("???", Op::Xxx, IMP, 2),
    op("???", Op::Xxx, IMP, 8),
    op("NOP", Op::Nop, ZPX, 4),
    op("SBC", Op::Sbc, ZPX, 4),
    op("INC", Op::Inc, ZPX, 6),
    op("???", Op::Xxx, IMP, 6),
    op("SED", Op::Sed, IMP, 2),
    op("SBC", Op::Sbc, ABY, 4),
    op("NOP", Op::Nop, IMP, 2),
    op("???", Op::Xxx, IMP, 7),
    op("NOP", Op::Nop, ABX, 4),
    op("SBC", Op::Sbc, ABX, 4),
    op("INC", Op::Inc, ABX, 7),
    op("???", Op::Xxx, IMP, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_has_nonzero_cycles() {
        for (opcode, instr) in INSTRUCTIONS.iter().enumerate() {
            assert!(instr.cycles >= 2, "opcode ${opcode:02X} has {} cycles", instr.cycles);
        }
    }

    #[test]
    fn unassigned_opcodes_are_named_consistently() {
        for instr in &INSTRUCTIONS {
            assert_eq!(instr.operation == Operation::Xxx, instr.name == "???");
        }
    }

    #[test]
    fn official_opcode_count() {
        let official = INSTRUCTIONS
            .iter()
            .enumerate()
            .filter(|(_, i)| i.operation != Operation::Xxx && i.operation != Operation::Nop)
            .count();
        // 150 documented opcodes besides NOP, plus the $EB alias of SBC.
        assert_eq!(official, 151);
    }

    #[test]
    fn spot_check_common_entries() {
        assert_eq!(INSTRUCTIONS[0xA9], op("LDA", Op::Lda, IMM, 2));
        assert_eq!(INSTRUCTIONS[0x4C], op("JMP", Op::Jmp, ABS, 3));
        assert_eq!(INSTRUCTIONS[0x6C], op("JMP", Op::Jmp, IND, 5));
        assert_eq!(INSTRUCTIONS[0x20], op("JSR", Op::Jsr, ABS, 6));
        assert_eq!(INSTRUCTIONS[0x00], op("BRK", Op::Brk, IMP, 7));
        assert_eq!(INSTRUCTIONS[0x91], op("STA", Op::Sta, IZY, 6));
        assert_eq!(INSTRUCTIONS[0xBE], op("LDX", Op::Ldx, ABY, 4));
        assert_eq!(INSTRUCTIONS[0xEA], op("NOP", Op::Nop, IMP, 2));
    }

    #[test]
    fn unofficial_nops_skip_their_operands() {
        assert_eq!(INSTRUCTIONS[0x04].mode, ZP0);
        assert_eq!(INSTRUCTIONS[0x0C].mode, ABS);
        assert_eq!(INSTRUCTIONS[0x1C].mode, ABX);
        assert_eq!(INSTRUCTIONS[0x80].mode, IMM);
        assert_eq!(INSTRUCTIONS[0xF4].mode, ZPX);
        assert_eq!(INSTRUCTIONS[0x1A].mode, IMP);
    }
}
