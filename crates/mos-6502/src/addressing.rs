//! 6502 addressing modes.
//!
//! Twelve modes, with the accumulator form of the shifts folded into
//! Implied:
//! - Implied: No operand (e.g., CLC, RTS, ASL A)
//! - Immediate: #$nn (literal value)
//! - Zero Page: $nn (8-bit address in page zero)
//! - Zero Page,X: $nn,X (8-bit address + X, wraps in page zero)
//! - Zero Page,Y: $nn,Y (8-bit address + Y, wraps in page zero)
//! - Relative: Branch offset (-128 to +127)
//! - Absolute: $nnnn (16-bit address)
//! - Absolute,X: $nnnn,X (16-bit address + X, may cross page)
//! - Absolute,Y: $nnnn,Y (16-bit address + Y, may cross page)
//! - Indirect: ($nnnn) (JMP only, buggy page boundary behavior)
//! - Indexed Indirect: ($nn,X) (pointer in zero page indexed by X)
//! - Indirect Indexed: ($nn),Y (zero page pointer + Y)

use crate::Mos6502;
use emu_core::Bus;

/// How an instruction locates its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressingMode {
    #[default]
    Implied,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

impl AddressingMode {
    /// Operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Relative
            | Self::IndexedIndirect
            | Self::IndirectIndexed => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}

pub(crate) const fn page_crossed(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl Mos6502 {
    /// Fetch the next byte at PC and increment PC.
    pub(crate) fn fetch_byte(&mut self, bus: &mut impl Bus) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit word (little-endian) at PC.
    pub(crate) fn fetch_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.fetch_byte(bus);
        let high = self.fetch_byte(bus);
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word from memory (little-endian).
    pub(crate) fn read_word(bus: &mut impl Bus, addr: u16) -> u16 {
        let low = bus.read(addr);
        let high = bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word with the page boundary bug of indirect JMP.
    /// If addr is $xxFF, the high byte comes from $xx00.
    pub(crate) fn read_word_page_bug(bus: &mut impl Bus, addr: u16) -> u16 {
        let low = bus.read(addr);
        let high_addr = if addr & 0x00FF == 0x00FF {
            addr & 0xFF00
        } else {
            addr.wrapping_add(1)
        };
        let high = bus.read(high_addr);
        u16::from_le_bytes([low, high])
    }

    /// Read a pointer from zero page; the high byte wraps to $00.
    fn read_zero_page_word(bus: &mut impl Bus, ptr: u8) -> u16 {
        let low = bus.read(u16::from(ptr));
        let high = bus.read(u16::from(ptr.wrapping_add(1)));
        u16::from_le_bytes([low, high])
    }

    /// Resolve the operand location for `mode`, consuming operand bytes.
    ///
    /// Sets `addr_abs` (or `addr_rel` for branches, or `fetched` for
    /// implied). Returns true when an indexed mode crossed a page boundary
    /// and may owe an extra cycle.
    pub(crate) fn resolve(&mut self, bus: &mut impl Bus, mode: AddressingMode) -> bool {
        match mode {
            AddressingMode::Implied => {
                self.fetched = self.regs.a;
                false
            }
            AddressingMode::Immediate => {
                self.addr_abs = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                false
            }
            AddressingMode::ZeroPage => {
                self.addr_abs = u16::from(self.fetch_byte(bus));
                false
            }
            AddressingMode::ZeroPageX => {
                let base = self.fetch_byte(bus);
                self.addr_abs = u16::from(base.wrapping_add(self.regs.x));
                false
            }
            AddressingMode::ZeroPageY => {
                let base = self.fetch_byte(bus);
                self.addr_abs = u16::from(base.wrapping_add(self.regs.y));
                false
            }
            AddressingMode::Relative => {
                // Sign-extend so wrapping_add moves backwards for negatives
                let offset = self.fetch_byte(bus) as i8;
                self.addr_rel = i16::from(offset) as u16;
                false
            }
            AddressingMode::Absolute => {
                self.addr_abs = self.fetch_word(bus);
                false
            }
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(bus);
                self.addr_abs = base.wrapping_add(u16::from(self.regs.x));
                page_crossed(base, self.addr_abs)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(bus);
                self.addr_abs = base.wrapping_add(u16::from(self.regs.y));
                page_crossed(base, self.addr_abs)
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word(bus);
                self.addr_abs = Self::read_word_page_bug(bus, ptr);
                false
            }
            AddressingMode::IndexedIndirect => {
                let base = self.fetch_byte(bus);
                self.addr_abs = Self::read_zero_page_word(bus, base.wrapping_add(self.regs.x));
                false
            }
            AddressingMode::IndirectIndexed => {
                let ptr = self.fetch_byte(bus);
                let base = Self::read_zero_page_word(bus, ptr);
                self.addr_abs = base.wrapping_add(u16::from(self.regs.y));
                page_crossed(base, self.addr_abs)
            }
        }
    }
}
