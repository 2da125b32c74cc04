//! Core traits and types for cycle-accurate emulation.
//!
//! Chips never own the machine around them. A CPU is handed a `Bus` for the
//! duration of a step and touches the outside world only through it.

mod bus;
mod cpu;
mod recording;

pub use bus::{Bus, SimpleBus};
pub use cpu::Cpu;
pub use recording::{AccessKind, BusCycle, RecordingBus};
