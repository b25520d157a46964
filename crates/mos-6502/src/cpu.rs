//! The 6502 CPU and its clock engine.

use crate::flags::{B, C, D, I, N, U, V, Z};
use crate::{
    AddressingMode, INSTRUCTIONS, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, Registers, disassemble,
};
use emu_core::{Bus, Cpu, Observable, Value};

/// Cycles the CPU spends in its reset sequence.
const RESET_CYCLES: u8 = 8;

/// Cycles taken to service an IRQ.
const IRQ_CYCLES: u8 = 7;

/// Cycles taken to service an NMI.
const NMI_CYCLES: u8 = 8;

/// MOS 6502 CPU.
///
/// Drive it with [`clock`](Mos6502::clock) once per CPU cycle. Register and
/// memory effects of an instruction happen on the cycle that fetches its
/// opcode; the rest of the instruction's cycles count down idle.
#[derive(Debug, Clone, Default)]
pub struct Mos6502 {
    /// CPU registers.
    pub regs: Registers,
    /// Operand of the current instruction.
    pub(crate) fetched: u8,
    /// Resolved operand address.
    pub(crate) addr_abs: u16,
    /// Sign-extended branch offset.
    pub(crate) addr_rel: u16,
    pub(crate) opcode: u8,
    pub(crate) mode: AddressingMode,
    /// Cycles left before the next opcode fetch.
    pub(crate) cycles: u8,
    /// Cycles clocked since construction.
    total_cycles: u64,
}

impl Mos6502 {
    /// Create a CPU with all registers zeroed. Call [`reset`](Self::reset)
    /// before clocking it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the CPU by one clock cycle.
    pub fn clock(&mut self, bus: &mut impl Bus) {
        if self.cycles == 0 {
            if log::log_enabled!(log::Level::Trace) {
                let (text, _) = disassemble(bus, self.regs.pc);
                log::trace!(
                    "{:04X}  {text:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} S:{:02X} CYC:{}",
                    self.regs.pc,
                    self.regs.a,
                    self.regs.x,
                    self.regs.y,
                    self.regs.p.0,
                    self.regs.s,
                    self.total_cycles
                );
            }

            self.opcode = self.fetch_byte(bus);
            let instruction = &INSTRUCTIONS[usize::from(self.opcode)];

            self.fetched = 0;
            self.addr_abs = 0;
            self.addr_rel = 0;
            self.mode = instruction.mode;
            self.cycles = instruction.cycles;

            let page_crossed = self.resolve(bus, instruction.mode);
            let pays_penalty = self.execute(bus, instruction.operation);
            if page_crossed && pays_penalty {
                self.cycles += 1;
            }
        }

        self.cycles -= 1;
        self.total_cycles += 1;
    }

    /// Clock until the current instruction completes.
    ///
    /// Returns the number of cycles consumed. When called between
    /// instructions this executes exactly one instruction; after a reset or
    /// interrupt it drains that sequence first.
    pub fn step(&mut self, bus: &mut impl Bus) -> u32 {
        let mut elapsed = 0;
        loop {
            self.clock(bus);
            elapsed += 1;
            if self.cycles == 0 {
                return elapsed;
            }
        }
    }

    /// Reset the CPU: load PC from the reset vector and reinitialize state.
    pub fn reset(&mut self, bus: &mut impl Bus) {
        self.regs.pc = Self::read_word(bus, RESET_VECTOR);
        self.regs.a = 0;
        self.regs.x = 0;
        self.regs.y = 0;
        self.regs.s = 0xFD;
        self.regs.p.0 = U;

        self.fetched = 0;
        self.addr_abs = 0;
        self.addr_rel = 0;
        self.opcode = 0;
        self.mode = AddressingMode::Implied;
        self.cycles = RESET_CYCLES;

        bus.reset();
        log::debug!("reset: PC={:04X}", self.regs.pc);
    }

    /// Maskable interrupt. Ignored while I is set; returns whether it was
    /// taken.
    pub fn irq(&mut self, bus: &mut impl Bus) -> bool {
        if self.regs.p.is_set(I) {
            return false;
        }
        self.interrupt(bus, IRQ_VECTOR, IRQ_CYCLES);
        log::debug!("irq: PC={:04X}", self.regs.pc);
        true
    }

    /// Non-maskable interrupt.
    pub fn nmi(&mut self, bus: &mut impl Bus) {
        self.interrupt(bus, NMI_VECTOR, NMI_CYCLES);
        log::debug!("nmi: PC={:04X}", self.regs.pc);
    }

    fn interrupt(&mut self, bus: &mut impl Bus, vector: u16, cycles: u8) {
        self.push_word(bus, self.regs.pc);
        self.regs.p.clear(B);
        self.regs.p.set(U);
        self.regs.p.set(I);
        self.push(bus, self.regs.p.0);
        self.regs.pc = Self::read_word(bus, vector);
        self.cycles = cycles;
    }

    /// Set or clear a status flag.
    pub fn set_flag(&mut self, flag: u8, condition: bool) {
        self.regs.p.set_if(flag, condition);
    }

    /// A status flag as 0 or 1.
    #[must_use]
    pub const fn get_flag(&self, flag: u8) -> u8 {
        self.regs.p.bit(flag)
    }

    /// Cycles left in the current instruction.
    #[must_use]
    pub const fn cycles_remaining(&self) -> u8 {
        self.cycles
    }

    /// Total cycles clocked since construction.
    #[must_use]
    pub const fn total_cycles(&self) -> u64 {
        self.total_cycles
    }
}

impl Cpu for Mos6502 {
    type Registers = Registers;

    fn clock<B: Bus>(&mut self, bus: &mut B) {
        Mos6502::clock(self, bus);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_instruction_complete(&self) -> bool {
        self.cycles == 0
    }

    fn irq<B: Bus>(&mut self, bus: &mut B) -> bool {
        Mos6502::irq(self, bus)
    }

    fn nmi<B: Bus>(&mut self, bus: &mut B) {
        Mos6502::nmi(self, bus);
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        Mos6502::reset(self, bus);
    }
}

const QUERY_PATHS: &[&str] = &[
    "pc",
    "a",
    "x",
    "y",
    "s",
    "p",
    "flags.c",
    "flags.z",
    "flags.i",
    "flags.d",
    "flags.b",
    "flags.u",
    "flags.v",
    "flags.n",
    "opcode",
    "cycles",
    "total_cycles",
];

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        let p = self.regs.p;
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" => Some(self.regs.s.into()),
            "p" => Some(p.0.into()),
            "flags.c" => Some(p.is_set(C).into()),
            "flags.z" => Some(p.is_set(Z).into()),
            "flags.i" => Some(p.is_set(I).into()),
            "flags.d" => Some(p.is_set(D).into()),
            "flags.b" => Some(p.is_set(B).into()),
            "flags.u" => Some(p.is_set(U).into()),
            "flags.v" => Some(p.is_set(V).into()),
            "flags.n" => Some(p.is_set(N).into()),
            "opcode" => Some(self.opcode.into()),
            "cycles" => Some(self.cycles.into()),
            "total_cycles" => Some(self.total_cycles.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
