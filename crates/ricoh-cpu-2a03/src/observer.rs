//! Execution hooks for debuggers and call-stack trackers.
//!
//! An [`Observer`] is borrowed for the duration of a single
//! [`Rp2A03::step_observed`](crate::Rp2A03::step_observed) or
//! [`Rp2A03::reset_observed`](crate::Rp2A03::reset_observed) call, the same
//! way the bus is. Every method defaults to doing nothing.

/// Receives CPU events as they happen.
pub trait Observer {
    /// The reset sequence has finished and PC holds the reset vector.
    fn on_reset(&mut self, _pc: u16) {}

    /// The opcode at `pc` is about to be fetched.
    fn on_instruction(&mut self, _pc: u16) {}

    /// An NMI or IRQ was serviced. `from` is the address of the instruction
    /// that was about to run, `to` the handler address.
    fn on_interrupt(&mut self, _from: u16, _to: u16, _nmi: bool) {}

    /// STP at `pc` has halted the CPU.
    fn on_halt(&mut self, _pc: u16) {}
}

/// The observer used by plain `step` and `reset`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoObserver;

impl Observer for NoObserver {}
