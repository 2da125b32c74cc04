//! Ricoh 2A03 CPU core: the NMOS 6502 as used in the NES.
//!
//! The 2A03 is a 6502 with the decimal-mode adder disconnected. The D flag
//! still toggles, and ADC/SBC ignore it.
//!
//! Execution is instruction-stepped but bus-exact: each `step()` performs
//! every read and write the real chip would, including the dummy reads of
//! indexed addressing and the double writes of read-modify-write
//! instructions. One bus access is one cycle, so the cycle count returned by
//! `step()` falls out of the access count.
//!
//! All 256 opcode slots are implemented, including the undocumented ones
//! (SLO, RLA, SRE, RRA, SAX, LAX, DCP, ISC, ANC, ALR, ARR, ANE, LXA, SBX,
//! LAS, SHA, SHX, SHY, TAS, STP and the NOP family).

mod addressing;
pub mod alu;
mod config;
mod cpu;
mod disasm;
mod execute;
pub mod flags;
mod observer;
pub mod opcodes;
mod registers;
pub mod trace;

pub use config::{CpuConfig, DEFAULT_UNSTABLE_MAGIC};
pub use cpu::{IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR, Rp2A03};
pub use disasm::{DisasmOp, Effective, disassemble};
pub use flags::Status;
pub use observer::{NoObserver, Observer};
pub use opcodes::{Access, Mnemonic, Mode, OPCODES, OpDef};
pub use registers::Registers;
pub use trace::Tracer;
