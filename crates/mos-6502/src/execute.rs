//! Instruction execution.
//!
//! Every handler runs after the addressing mode has resolved its operand
//! location. A handler returns true when it is one of the read instructions
//! that pay a cycle for an indexed page cross; the clock engine only charges
//! that cycle when the addressing mode also reported a crossing.

use crate::addressing::page_crossed;
use crate::flags::{B, C, D, I, N, U, V, Z};
use crate::{AddressingMode, IRQ_VECTOR, Mos6502, Operation};
use emu_core::Bus;

impl Mos6502 {
    /// Operand for the current instruction: A in implied mode, otherwise
    /// the byte at the resolved address.
    pub(crate) fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        if self.mode != AddressingMode::Implied {
            self.fetched = bus.read(self.addr_abs);
        }
        self.fetched
    }

    /// Store a shift/rotate result back where the operand came from.
    fn write_back(&mut self, bus: &mut impl Bus, value: u8) {
        if self.mode == AddressingMode::Implied {
            self.regs.a = value;
        } else {
            bus.write(self.addr_abs, value);
        }
    }

    /// Push a byte onto the stack.
    pub(crate) fn push(&mut self, bus: &mut impl Bus, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    /// Pull a byte from the stack.
    pub(crate) fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    /// Push a 16-bit word onto the stack (high byte first).
    pub(crate) fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push(bus, high);
        self.push(bus, low);
    }

    /// Pull a 16-bit word from the stack (low byte first).
    fn pull_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.pull(bus);
        let high = self.pull(bus);
        u16::from_le_bytes([low, high])
    }

    /// Take a branch if condition is true: +1 cycle, +1 more across a page.
    fn branch_if(&mut self, condition: bool) {
        if condition {
            self.cycles += 1;
            let target = self.regs.pc.wrapping_add(self.addr_rel);
            if page_crossed(target, self.regs.pc) {
                self.cycles += 1;
            }
            self.regs.pc = target;
        }
    }

    /// Binary add with carry. SBC feeds the one's complement of its operand.
    ///
    /// V is set when the operand's sign differs from A's and the result's
    /// sign differs from A's.
    fn add_with_carry(&mut self, value: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(value) + u16::from(self.regs.p.bit(C));
        let result = sum as u8;

        self.regs.p.set_if(C, sum > 0xFF);
        self.regs.p.set_if(V, (a ^ value) & (a ^ result) & 0x80 != 0);
        self.regs.p.update_nz(result);
        self.regs.a = result;
    }

    fn compare(&mut self, register: u8, value: u8) {
        self.regs.p.set_if(C, register >= value);
        self.regs.p.update_nz(register.wrapping_sub(value));
    }

    /// Execute `operation` against the resolved operand.
    pub(crate) fn execute(&mut self, bus: &mut impl Bus, operation: Operation) -> bool {
        match operation {
            // Arithmetic and logic
            Operation::Adc => {
                let value = self.fetch(bus);
                self.add_with_carry(value);
                true
            }
            Operation::Sbc => {
                let value = self.fetch(bus);
                self.add_with_carry(value ^ 0xFF);
                true
            }
            Operation::And => {
                let value = self.fetch(bus);
                self.regs.a &= value;
                self.regs.p.update_nz(self.regs.a);
                true
            }
            Operation::Ora => {
                let value = self.fetch(bus);
                self.regs.a |= value;
                self.regs.p.update_nz(self.regs.a);
                true
            }
            Operation::Eor => {
                let value = self.fetch(bus);
                self.regs.a ^= value;
                self.regs.p.update_nz(self.regs.a);
                true
            }
            Operation::Bit => {
                let value = self.fetch(bus);
                self.regs.p.set_if(Z, self.regs.a & value == 0);
                self.regs.p.set_if(N, value & 0x80 != 0);
                self.regs.p.set_if(V, value & 0x40 != 0);
                false
            }
            Operation::Cmp => {
                let value = self.fetch(bus);
                self.compare(self.regs.a, value);
                true
            }
            Operation::Cpx => {
                let value = self.fetch(bus);
                self.compare(self.regs.x, value);
                false
            }
            Operation::Cpy => {
                let value = self.fetch(bus);
                self.compare(self.regs.y, value);
                false
            }

            // Shifts and rotates
            Operation::Asl => {
                let value = self.fetch(bus);
                let result = value << 1;
                self.regs.p.set_if(C, value & 0x80 != 0);
                self.regs.p.update_nz(result);
                self.write_back(bus, result);
                false
            }
            Operation::Lsr => {
                let value = self.fetch(bus);
                let result = value >> 1;
                self.regs.p.set_if(C, value & 0x01 != 0);
                self.regs.p.update_nz(result);
                self.write_back(bus, result);
                false
            }
            Operation::Rol => {
                let value = self.fetch(bus);
                let result = (value << 1) | self.regs.p.bit(C);
                self.regs.p.set_if(C, value & 0x80 != 0);
                self.regs.p.update_nz(result);
                self.write_back(bus, result);
                false
            }
            Operation::Ror => {
                let value = self.fetch(bus);
                let result = (value >> 1) | (self.regs.p.bit(C) << 7);
                self.regs.p.set_if(C, value & 0x01 != 0);
                self.regs.p.update_nz(result);
                self.write_back(bus, result);
                false
            }

            // Increments and decrements
            Operation::Inc => {
                let result = self.fetch(bus).wrapping_add(1);
                bus.write(self.addr_abs, result);
                self.regs.p.update_nz(result);
                false
            }
            Operation::Dec => {
                let result = self.fetch(bus).wrapping_sub(1);
                bus.write(self.addr_abs, result);
                self.regs.p.update_nz(result);
                false
            }
            Operation::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Operation::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
                false
            }
            Operation::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Operation::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
                false
            }

            // Loads and stores
            Operation::Lda => {
                self.regs.a = self.fetch(bus);
                self.regs.p.update_nz(self.regs.a);
                true
            }
            Operation::Ldx => {
                self.regs.x = self.fetch(bus);
                self.regs.p.update_nz(self.regs.x);
                true
            }
            Operation::Ldy => {
                self.regs.y = self.fetch(bus);
                self.regs.p.update_nz(self.regs.y);
                true
            }
            Operation::Sta => {
                bus.write(self.addr_abs, self.regs.a);
                false
            }
            Operation::Stx => {
                bus.write(self.addr_abs, self.regs.x);
                false
            }
            Operation::Sty => {
                bus.write(self.addr_abs, self.regs.y);
                false
            }

            // Transfers
            Operation::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Operation::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
                false
            }
            Operation::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
                false
            }
            Operation::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
                false
            }
            Operation::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
                false
            }
            Operation::Txs => {
                self.regs.s = self.regs.x;
                false
            }

            // Stack
            Operation::Pha => {
                self.push(bus, self.regs.a);
                false
            }
            Operation::Php => {
                self.push(bus, self.regs.p.to_byte_brk());
                false
            }
            Operation::Pla => {
                self.regs.a = self.pull(bus);
                self.regs.p.update_nz(self.regs.a);
                false
            }
            Operation::Plp => {
                self.regs.p.0 = self.pull(bus);
                self.regs.p.set(U);
                false
            }

            // Flag operations
            Operation::Clc => {
                self.regs.p.clear(C);
                false
            }
            Operation::Cld => {
                self.regs.p.clear(D);
                false
            }
            Operation::Cli => {
                self.regs.p.clear(I);
                false
            }
            Operation::Clv => {
                self.regs.p.clear(V);
                false
            }
            Operation::Sec => {
                self.regs.p.set(C);
                false
            }
            Operation::Sed => {
                self.regs.p.set(D);
                false
            }
            Operation::Sei => {
                self.regs.p.set(I);
                false
            }

            // Branches
            Operation::Bcc => {
                self.branch_if(!self.regs.p.is_set(C));
                false
            }
            Operation::Bcs => {
                self.branch_if(self.regs.p.is_set(C));
                false
            }
            Operation::Bne => {
                self.branch_if(!self.regs.p.is_set(Z));
                false
            }
            Operation::Beq => {
                self.branch_if(self.regs.p.is_set(Z));
                false
            }
            Operation::Bpl => {
                self.branch_if(!self.regs.p.is_set(N));
                false
            }
            Operation::Bmi => {
                self.branch_if(self.regs.p.is_set(N));
                false
            }
            Operation::Bvc => {
                self.branch_if(!self.regs.p.is_set(V));
                false
            }
            Operation::Bvs => {
                self.branch_if(self.regs.p.is_set(V));
                false
            }

            // Jumps and subroutines
            Operation::Jmp => {
                self.regs.pc = self.addr_abs;
                false
            }
            Operation::Jsr => {
                let ret = self.regs.pc.wrapping_sub(1);
                self.push_word(bus, ret);
                self.regs.pc = self.addr_abs;
                false
            }
            Operation::Rts => {
                self.regs.pc = self.pull_word(bus).wrapping_add(1);
                false
            }
            Operation::Brk => {
                // Skip the padding byte
                self.regs.pc = self.regs.pc.wrapping_add(1);
                self.regs.p.set(I);
                self.push_word(bus, self.regs.pc);
                self.regs.p.set(B);
                self.push(bus, self.regs.p.0);
                self.regs.p.clear(B);
                self.regs.pc = Self::read_word(bus, IRQ_VECTOR);
                false
            }
            Operation::Rti => {
                self.regs.p.0 = self.pull(bus);
                self.regs.p.clear(B);
                self.regs.p.clear(U);
                self.regs.pc = self.pull_word(bus);
                false
            }

            Operation::Nop => matches!(self.opcode, 0x1C | 0x3C | 0x5C | 0x7C | 0xDC | 0xFC),
            Operation::Xxx => false,
        }
    }
}
