//! nestest-style execution trace.
//!
//! ```text
//! C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
//! ```
//!
//! The line describes the instruction about to run and the register state
//! before it, so it must be produced before calling `step`.

use std::io;

use emu_core::Bus;

use crate::Rp2A03;

/// Width of the disassembly column, register dump included after it.
const DISASM_WIDTH: usize = 48;

/// Format the trace line for the instruction at the CPU's PC.
#[must_use]
pub fn line(cpu: &Rp2A03, bus: &impl Bus) -> String {
    let op = cpu.disassemble(bus, cpu.regs.pc);
    let regs = &cpu.regs;
    format!(
        "{:<width$}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        op.to_string(),
        regs.a,
        regs.x,
        regs.y,
        regs.p.0,
        regs.s,
        cpu.cycles(),
        width = DISASM_WIDTH,
    )
}

/// Writes one trace line per instruction to any `io::Write` sink.
pub struct Tracer<W: io::Write> {
    out: W,
    lines: u64,
}

impl<W: io::Write> Tracer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Write the line for the next instruction. Call before `step`.
    pub fn trace(&mut self, cpu: &Rp2A03, bus: &impl Bus) -> io::Result<()> {
        writeln!(self.out, "{}", line(cpu, bus))?;
        self.lines += 1;
        Ok(())
    }

    /// Lines written so far.
    #[must_use]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}
