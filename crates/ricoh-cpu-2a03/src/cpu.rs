//! The 2A03 CPU engine: registers, interrupt lines and the step loop.

use emu_core::{Bus, Cpu};
use log::{Level, debug, log_enabled, trace};

use crate::disasm::{self, DisasmOp};
use crate::flags::I;
use crate::observer::{NoObserver, Observer};
use crate::{CpuConfig, Registers};

/// NMI handler address.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset handler address.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ and BRK handler address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Reset takes seven cycles; two of them are the vector reads.
const RESET_INTERNAL_CYCLES: u64 = 5;

/// The Ricoh 2A03 CPU.
///
/// Holds registers and interrupt state only. The bus is borrowed for each
/// [`step`](Self::step), so the orchestrator keeps ownership of memory and
/// devices.
#[derive(Debug, Clone)]
pub struct Rp2A03 {
    /// Register file. Public so harnesses can seed state directly.
    pub regs: Registers,
    pub(crate) halted: bool,
    /// NMI edge latch, cleared when serviced.
    pub(crate) nmi_pending: bool,
    /// Level of the IRQ line. Servicing does not clear it.
    pub(crate) irq_line: bool,
    /// Cycles since creation. Every bus access is one cycle.
    pub(crate) cycles: u64,
    pub(crate) config: CpuConfig,
}

impl Default for Rp2A03 {
    fn default() -> Self {
        Self::new()
    }
}

impl Rp2A03 {
    /// Create a CPU in power-up state with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    #[must_use]
    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            regs: Registers::new(),
            halted: false,
            nmi_pending: false,
            irq_line: false,
            cycles: 0,
            config,
        }
    }

    /// Run the reset sequence.
    ///
    /// S drops by three (the chip runs three pushes with writes suppressed),
    /// I is set and PC is loaded from `$FFFC/$FFFD`. Halt state and pending
    /// interrupts are cleared.
    pub fn reset<B: Bus>(&mut self, bus: &mut B) {
        self.reset_observed(bus, &mut NoObserver);
    }

    /// [`reset`](Self::reset), reporting to `observer`.
    pub fn reset_observed<B: Bus, O: Observer + ?Sized>(
        &mut self,
        bus: &mut B,
        observer: &mut O,
    ) {
        self.regs.s = self.regs.s.wrapping_sub(3);
        self.regs.p.set(I);
        self.halted = false;
        self.nmi_pending = false;
        self.irq_line = false;
        self.cycles += RESET_INTERNAL_CYCLES;
        self.regs.pc = self.read_word(bus, RESET_VECTOR);
        debug!("reset: PC=${:04X}", self.regs.pc);
        observer.on_reset(self.regs.pc);
    }

    /// Execute one instruction, or service one pending interrupt.
    ///
    /// Returns the cycles consumed, which equals the number of bus accesses
    /// performed. A halted CPU does nothing and returns 0.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.step_observed(bus, &mut NoObserver)
    }

    /// [`step`](Self::step), reporting to `observer`.
    pub fn step_observed<B: Bus, O: Observer + ?Sized>(
        &mut self,
        bus: &mut B,
        observer: &mut O,
    ) -> u32 {
        if self.halted {
            return 0;
        }

        let start = self.cycles;
        if self.nmi_pending {
            self.nmi_pending = false;
            self.interrupt(bus, NMI_VECTOR, observer);
        } else if self.irq_line && !self.regs.p.interrupt_disable() {
            self.interrupt(bus, IRQ_VECTOR, observer);
        } else {
            if log_enabled!(Level::Trace) {
                trace!("{}", crate::trace::line(self, &*bus));
            }
            let pc = self.regs.pc;
            observer.on_instruction(pc);
            let opcode = self.fetch(bus);
            self.execute(bus, opcode);
            if self.halted {
                observer.on_halt(pc);
            }
        }
        (self.cycles - start) as u32
    }

    /// Step until at least `budget` cycles have run or the CPU halts.
    ///
    /// Instructions are never split, so the result can exceed `budget` by
    /// up to one instruction's worth of cycles. Returns the cycles run.
    pub fn run<B: Bus>(&mut self, bus: &mut B, budget: u64) -> u64 {
        let start = self.cycles;
        let until = start.saturating_add(budget);
        while self.cycles < until && !self.halted {
            self.step(bus);
        }
        self.cycles - start
    }

    /// Hardware interrupt sequence shared by NMI and IRQ: two dummy reads of
    /// PC, push PC and P (B clear), set I, load PC from `vector`.
    fn interrupt<O: Observer + ?Sized>(
        &mut self,
        bus: &mut impl Bus,
        vector: u16,
        observer: &mut O,
    ) {
        let nmi = vector == NMI_VECTOR;
        let from = self.regs.pc;
        self.dummy_read_pc(bus);
        self.dummy_read_pc(bus);
        self.push_word(bus, self.regs.pc);
        self.push(bus, self.regs.p.to_push(false));
        self.regs.p.set(I);
        self.regs.pc = self.read_word(bus, vector);
        debug!(
            "{}: ${from:04X} -> ${:04X}",
            if nmi { "NMI" } else { "IRQ" },
            self.regs.pc
        );
        observer.on_interrupt(from, self.regs.pc, nmi);
    }

    /// Latch an NMI edge. Taken before the next instruction.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drive the IRQ line. While asserted and I is clear, an IRQ is taken
    /// before each instruction.
    pub fn trigger_irq(&mut self, asserted: bool) {
        self.irq_line = asserted;
    }

    /// Decode the instruction at `pc` without side effects, annotating the
    /// effective address and value of memory operands using the current
    /// index registers.
    #[must_use]
    pub fn disassemble(&self, bus: &impl Bus, pc: u16) -> DisasmOp {
        disasm::decode(bus, pc, Some(&self.regs))
    }

    /// Total cycles since creation.
    #[must_use]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    #[must_use]
    pub fn registers(&self) -> Registers {
        self.regs
    }

    #[must_use]
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// True after STP until the next reset.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[must_use]
    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    #[must_use]
    pub fn irq_asserted(&self) -> bool {
        self.irq_line
    }

    #[must_use]
    pub fn config(&self) -> CpuConfig {
        self.config
    }
}

impl Cpu for Rp2A03 {
    type Registers = Registers;

    fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        Rp2A03::step(self, bus)
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        Rp2A03::reset(self, bus);
    }

    fn trigger_nmi(&mut self) {
        Rp2A03::trigger_nmi(self);
    }

    fn trigger_irq(&mut self, asserted: bool) {
        Rp2A03::trigger_irq(self, asserted);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.halted
    }
}
