//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// CPUs execute instructions and access memory through a bus. The bus is
/// passed in, not owned, so the machine that drives the CPU can share it with
/// other components between calls.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Advance the CPU by one clock cycle.
    fn clock<B: Bus>(&mut self, bus: &mut B);

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// True when the current instruction has used up all of its cycles and
    /// the next `clock()` will fetch a new opcode.
    fn is_instruction_complete(&self) -> bool;

    /// Request a maskable interrupt. Returns true if it was taken.
    fn irq<B: Bus>(&mut self, bus: &mut B) -> bool;

    /// Raise a non-maskable interrupt.
    fn nmi<B: Bus>(&mut self, bus: &mut B);

    /// Reset the CPU to its power-up state.
    fn reset<B: Bus>(&mut self, bus: &mut B);
}
