//! CPU core trait.

use crate::Bus;

/// An instruction-stepped CPU core.
///
/// The bus is passed in, not owned, so the orchestrator can share it with
/// other components (video chip, audio chip, mapper) between steps.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Execute one instruction, or service one pending interrupt.
    ///
    /// Returns the number of CPU cycles consumed so that downstream
    /// components can be scheduled against CPU time.
    fn step<B: Bus>(&mut self, bus: &mut B) -> u32;

    /// Run the reset sequence, loading PC from the reset vector.
    fn reset<B: Bus>(&mut self, bus: &mut B);

    /// Latch a non-maskable interrupt edge.
    fn trigger_nmi(&mut self);

    /// Drive the level-sensitive interrupt request line.
    fn trigger_irq(&mut self, asserted: bool);

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU is halted.
    fn is_halted(&self) -> bool;
}
