//! Bus access primitives and addressing-mode resolution.
//!
//! Every helper here goes through [`Rp2A03::read`] or [`Rp2A03::write`],
//! which count one cycle per access. The resolver performs the same reads the
//! chip does while forming an address:
//!
//! - Zero Page,X / Zero Page,Y: a dummy read of the unindexed address
//! - Absolute,X / Absolute,Y / (Indirect),Y: a dummy read of the address with
//!   the high byte not yet fixed, on page cross for reads and always for
//!   stores and read-modify-write
//! - (Indirect,X): a dummy read of the pointer before indexing
//! - Implied / Accumulator: a dummy read of the byte after the opcode

use emu_core::Bus;

use crate::Rp2A03;
use crate::opcodes::Mode;

/// When an indexed mode does its dummy read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Indexing {
    /// Only when the index carries into the high byte (read instructions).
    OnPageCross,
    /// Unconditionally (stores and read-modify-write).
    Always,
}

/// A resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// Implied or accumulator: nothing beyond the registers.
    Register,
    /// Immediate byte, already fetched.
    Immediate(u8),
    /// Effective address.
    Address(u16),
}

impl Rp2A03 {
    /// One counted bus read.
    pub(crate) fn read(&mut self, bus: &mut impl Bus, addr: u16) -> u8 {
        self.cycles += 1;
        bus.read(addr)
    }

    /// One counted bus write.
    pub(crate) fn write(&mut self, bus: &mut impl Bus, addr: u16, value: u8) {
        self.cycles += 1;
        bus.write(addr, value);
    }

    /// Fetch the next byte at PC and increment PC.
    pub(crate) fn fetch(&mut self, bus: &mut impl Bus) -> u8 {
        let value = self.read(bus, self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit word (little-endian) at PC.
    pub(crate) fn fetch_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.fetch(bus);
        let high = self.fetch(bus);
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word, low byte first.
    pub(crate) fn read_word(&mut self, bus: &mut impl Bus, addr: u16) -> u16 {
        let low = self.read(bus, addr);
        let high = self.read(bus, addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word whose high byte does not carry into the next page.
    ///
    /// Used for `JMP ($xxFF)`, which takes its high byte from `$xx00`, and
    /// for zero-page pointers, which wrap at `$FF`.
    pub(crate) fn read_word_page_wrap(&mut self, bus: &mut impl Bus, addr: u16) -> u16 {
        let low = self.read(bus, addr);
        let high_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
        let high = self.read(bus, high_addr);
        u16::from_le_bytes([low, high])
    }

    /// Read the byte at PC without consuming it.
    pub(crate) fn dummy_read_pc(&mut self, bus: &mut impl Bus) {
        self.read(bus, self.regs.pc);
    }

    /// Push a byte onto the stack.
    pub(crate) fn push(&mut self, bus: &mut impl Bus, value: u8) {
        let addr = self.regs.push();
        self.write(bus, addr, value);
    }

    /// Pull a byte from the stack.
    pub(crate) fn pull(&mut self, bus: &mut impl Bus) -> u8 {
        let addr = self.regs.pull();
        self.read(bus, addr)
    }

    /// Push a 16-bit word onto the stack (high byte first).
    pub(crate) fn push_word(&mut self, bus: &mut impl Bus, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push(bus, high);
        self.push(bus, low);
    }

    /// Pull a 16-bit word from the stack (low byte first).
    pub(crate) fn pull_word(&mut self, bus: &mut impl Bus) -> u16 {
        let low = self.pull(bus);
        let high = self.pull(bus);
        u16::from_le_bytes([low, high])
    }

    /// Read the current top of stack without moving S.
    pub(crate) fn dummy_read_stack(&mut self, bus: &mut impl Bus) {
        let addr = self.regs.stack_addr();
        self.read(bus, addr);
    }

    // =========================================================================
    // Addressing mode helpers
    // =========================================================================

    /// Resolve the operand of `mode`, advancing PC past the operand bytes.
    pub(crate) fn resolve(
        &mut self,
        bus: &mut impl Bus,
        mode: Mode,
        indexing: Indexing,
    ) -> Operand {
        match mode {
            Mode::Implied | Mode::Accumulator => {
                self.dummy_read_pc(bus);
                Operand::Register
            }
            Mode::Immediate => Operand::Immediate(self.fetch(bus)),
            Mode::ZeroPage => Operand::Address(u16::from(self.fetch(bus))),
            Mode::ZeroPageX => Operand::Address(self.addr_zero_page_indexed(bus, self.regs.x)),
            Mode::ZeroPageY => Operand::Address(self.addr_zero_page_indexed(bus, self.regs.y)),
            Mode::Absolute => Operand::Address(self.fetch_word(bus)),
            Mode::AbsoluteX | Mode::AbsoluteY | Mode::IndirectY => {
                let (base, index) = self.indexed_base(bus, mode);
                Operand::Address(self.add_index(bus, base, index, indexing))
            }
            Mode::Indirect => {
                let ptr = self.fetch_word(bus);
                Operand::Address(self.read_word_page_wrap(bus, ptr))
            }
            Mode::IndirectX => Operand::Address(self.addr_indexed_indirect(bus)),
            Mode::Relative => Operand::Address(self.addr_relative(bus)),
        }
    }

    /// Relative: branch target, PC + signed offset after the operand.
    pub(crate) fn addr_relative(&mut self, bus: &mut impl Bus) -> u16 {
        let offset = self.fetch(bus) as i8;
        self.regs.pc.wrapping_add(offset as u16)
    }

    /// Zero Page,X / Zero Page,Y: $nn,X (wraps within zero page)
    fn addr_zero_page_indexed(&mut self, bus: &mut impl Bus, index: u8) -> u16 {
        let base = self.fetch(bus);
        // Dummy read while the index is added
        self.read(bus, u16::from(base));
        u16::from(base.wrapping_add(index))
    }

    /// Indexed Indirect: ($nn,X)
    /// The pointer is at zero page address (operand + X), wrapping within ZP.
    fn addr_indexed_indirect(&mut self, bus: &mut impl Bus) -> u16 {
        let base = self.fetch(bus);
        self.read(bus, u16::from(base));
        let ptr = base.wrapping_add(self.regs.x);
        self.read_word_page_wrap(bus, u16::from(ptr))
    }

    /// Fetch the unindexed base address of Absolute,X, Absolute,Y or
    /// (Indirect),Y together with the index register to add.
    pub(crate) fn indexed_base(&mut self, bus: &mut impl Bus, mode: Mode) -> (u16, u8) {
        match mode {
            Mode::AbsoluteX => (self.fetch_word(bus), self.regs.x),
            Mode::IndirectY => {
                let ptr = self.fetch(bus);
                (self.read_word_page_wrap(bus, u16::from(ptr)), self.regs.y)
            }
            _ => (self.fetch_word(bus), self.regs.y),
        }
    }

    /// Add an index to a base address, doing the dummy read at the address
    /// whose high byte has not been fixed up yet.
    pub(crate) fn add_index(
        &mut self,
        bus: &mut impl Bus,
        base: u16,
        index: u8,
        indexing: Indexing,
    ) -> u16 {
        let addr = base.wrapping_add(u16::from(index));
        let page_crossed = (base & 0xFF00) != (addr & 0xFF00);
        if page_crossed || indexing == Indexing::Always {
            let partial = (base & 0xFF00) | (addr & 0x00FF);
            self.read(bus, partial);
        }
        addr
    }
}
