//! Instruction dispatch.
//!
//! One exhaustive match over the mnemonic of the decoded [`OpDef`]. The
//! addressing mode comes from the table, so each arm only states what the
//! instruction does with its operand; the access shape (dummy reads, the
//! double write of read-modify-write) lives in the shared helpers below.

use emu_core::Bus;
use log::debug;

use crate::Rp2A03;
use crate::addressing::{Indexing, Operand};
use crate::alu;
use crate::cpu::IRQ_VECTOR;
use crate::flags::{C, D, I, Status, V};
use crate::opcodes::{Mnemonic, Mode, OPCODES};

impl Rp2A03 {
    /// Execute the instruction whose opcode byte has just been fetched.
    pub(crate) fn execute(&mut self, bus: &mut impl Bus, opcode: u8) {
        #[allow(clippy::enum_glob_use)]
        use Mnemonic::*;

        let op = OPCODES[usize::from(opcode)];
        let mode = op.mode;

        match op.mnemonic {
            // =================================================================
            // Loads
            // =================================================================
            Lda => {
                let value = self.read_operand(bus, mode);
                self.load_a(value);
            }
            Ldx => {
                let value = self.read_operand(bus, mode);
                self.load_x(value);
            }
            Ldy => {
                let value = self.read_operand(bus, mode);
                self.regs.y = value;
                self.regs.p.set_nz(value);
            }
            Lax => {
                let value = self.read_operand(bus, mode);
                self.regs.a = value;
                self.load_x(value);
            }
            Las => {
                let value = self.read_operand(bus, mode) & self.regs.s;
                self.regs.s = value;
                self.regs.a = value;
                self.load_x(value);
            }
            Lxa => {
                let value = self.read_operand(bus, mode);
                let result = (self.regs.a | self.config.unstable_magic) & value;
                self.regs.a = result;
                self.load_x(result);
            }

            // =================================================================
            // Stores
            // =================================================================
            Sta => self.store(bus, mode, self.regs.a),
            Stx => self.store(bus, mode, self.regs.x),
            Sty => self.store(bus, mode, self.regs.y),
            Sax => self.store(bus, mode, self.regs.a & self.regs.x),
            Sha => self.store_and_high(bus, mode, self.regs.a & self.regs.x),
            Shx => self.store_and_high(bus, mode, self.regs.x),
            Shy => self.store_and_high(bus, mode, self.regs.y),
            Tas => {
                self.regs.s = self.regs.a & self.regs.x;
                self.store_and_high(bus, mode, self.regs.s);
            }

            // =================================================================
            // Register transfers and increments
            // =================================================================
            Tax => {
                self.dummy_read_pc(bus);
                self.load_x(self.regs.a);
            }
            Tay => {
                self.dummy_read_pc(bus);
                self.regs.y = self.regs.a;
                self.regs.p.set_nz(self.regs.y);
            }
            Txa => {
                self.dummy_read_pc(bus);
                self.load_a(self.regs.x);
            }
            Tya => {
                self.dummy_read_pc(bus);
                self.load_a(self.regs.y);
            }
            Tsx => {
                self.dummy_read_pc(bus);
                self.load_x(self.regs.s);
            }
            Txs => {
                self.dummy_read_pc(bus);
                self.regs.s = self.regs.x;
            }
            Inx => {
                self.dummy_read_pc(bus);
                self.regs.x = alu::inc(&mut self.regs.p, self.regs.x);
            }
            Iny => {
                self.dummy_read_pc(bus);
                self.regs.y = alu::inc(&mut self.regs.p, self.regs.y);
            }
            Dex => {
                self.dummy_read_pc(bus);
                self.regs.x = alu::dec(&mut self.regs.p, self.regs.x);
            }
            Dey => {
                self.dummy_read_pc(bus);
                self.regs.y = alu::dec(&mut self.regs.p, self.regs.y);
            }

            // =================================================================
            // Flags
            // =================================================================
            Clc => self.set_flag(bus, C, false),
            Sec => self.set_flag(bus, C, true),
            Cli => self.set_flag(bus, I, false),
            Sei => self.set_flag(bus, I, true),
            Cld => self.set_flag(bus, D, false),
            Sed => self.set_flag(bus, D, true),
            Clv => self.set_flag(bus, V, false),

            // =================================================================
            // Arithmetic and logic
            // =================================================================
            Adc => {
                let value = self.read_operand(bus, mode);
                self.regs.a = alu::adc(&mut self.regs.p, self.regs.a, value);
            }
            Sbc => {
                let value = self.read_operand(bus, mode);
                self.regs.a = alu::sbc(&mut self.regs.p, self.regs.a, value);
            }
            And => {
                let value = self.read_operand(bus, mode);
                self.load_a(self.regs.a & value);
            }
            Ora => {
                let value = self.read_operand(bus, mode);
                self.load_a(self.regs.a | value);
            }
            Eor => {
                let value = self.read_operand(bus, mode);
                self.load_a(self.regs.a ^ value);
            }
            Cmp => {
                let value = self.read_operand(bus, mode);
                alu::compare(&mut self.regs.p, self.regs.a, value);
            }
            Cpx => {
                let value = self.read_operand(bus, mode);
                alu::compare(&mut self.regs.p, self.regs.x, value);
            }
            Cpy => {
                let value = self.read_operand(bus, mode);
                alu::compare(&mut self.regs.p, self.regs.y, value);
            }
            Bit => {
                let value = self.read_operand(bus, mode);
                alu::bit(&mut self.regs.p, self.regs.a, value);
            }
            Anc => {
                let value = self.read_operand(bus, mode);
                self.regs.a = alu::anc(&mut self.regs.p, self.regs.a, value);
            }
            Alr => {
                let value = self.read_operand(bus, mode);
                self.regs.a = alu::alr(&mut self.regs.p, self.regs.a, value);
            }
            Arr => {
                let value = self.read_operand(bus, mode);
                self.regs.a = alu::arr(&mut self.regs.p, self.regs.a, value);
            }
            Sbx => {
                let value = self.read_operand(bus, mode);
                self.regs.x = alu::sbx(&mut self.regs.p, self.regs.a, self.regs.x, value);
            }
            Ane => {
                let value = self.read_operand(bus, mode);
                self.load_a((self.regs.a | self.config.unstable_magic) & self.regs.x & value);
            }

            // =================================================================
            // Read-modify-write
            // =================================================================
            Asl => {
                self.modify(bus, mode, alu::asl);
            }
            Lsr => {
                self.modify(bus, mode, alu::lsr);
            }
            Rol => {
                self.modify(bus, mode, alu::rol);
            }
            Ror => {
                self.modify(bus, mode, alu::ror);
            }
            Inc => {
                self.modify(bus, mode, alu::inc);
            }
            Dec => {
                self.modify(bus, mode, alu::dec);
            }
            Slo => {
                let value = self.modify(bus, mode, alu::asl);
                self.load_a(self.regs.a | value);
            }
            Rla => {
                let value = self.modify(bus, mode, alu::rol);
                self.load_a(self.regs.a & value);
            }
            Sre => {
                let value = self.modify(bus, mode, alu::lsr);
                self.load_a(self.regs.a ^ value);
            }
            Rra => {
                let value = self.modify(bus, mode, alu::ror);
                self.regs.a = alu::adc(&mut self.regs.p, self.regs.a, value);
            }
            Dcp => {
                let value = self.modify(bus, mode, alu::dec);
                alu::compare(&mut self.regs.p, self.regs.a, value);
            }
            Isc => {
                let value = self.modify(bus, mode, alu::inc);
                self.regs.a = alu::sbc(&mut self.regs.p, self.regs.a, value);
            }

            // =================================================================
            // Branches
            // =================================================================
            Bcc => self.branch(bus, !self.regs.p.carry()),
            Bcs => self.branch(bus, self.regs.p.carry()),
            Bne => self.branch(bus, !self.regs.p.zero()),
            Beq => self.branch(bus, self.regs.p.zero()),
            Bpl => self.branch(bus, !self.regs.p.negative()),
            Bmi => self.branch(bus, self.regs.p.negative()),
            Bvc => self.branch(bus, !self.regs.p.overflow()),
            Bvs => self.branch(bus, self.regs.p.overflow()),

            // =================================================================
            // Jumps and subroutines
            // =================================================================
            Jmp => {
                self.regs.pc = if mode == Mode::Indirect {
                    let ptr = self.fetch_word(bus);
                    self.read_word_page_wrap(bus, ptr)
                } else {
                    self.fetch_word(bus)
                };
            }
            Jsr => {
                let low = self.fetch(bus);
                self.dummy_read_stack(bus);
                // PC points at the high operand byte: the return address - 1
                self.push_word(bus, self.regs.pc);
                let high = self.read(bus, self.regs.pc);
                self.regs.pc = u16::from_le_bytes([low, high]);
            }
            Rts => {
                self.dummy_read_pc(bus);
                self.dummy_read_stack(bus);
                self.regs.pc = self.pull_word(bus);
                self.fetch(bus);
            }
            Brk => {
                // Padding byte
                self.fetch(bus);
                self.push_word(bus, self.regs.pc);
                self.push(bus, self.regs.p.to_push(true));
                self.regs.p.set(I);
                self.regs.pc = self.read_word(bus, IRQ_VECTOR);
            }
            Rti => {
                self.dummy_read_pc(bus);
                self.dummy_read_stack(bus);
                let p = self.pull(bus);
                self.regs.p.pull(p);
                self.regs.pc = self.pull_word(bus);
            }

            // =================================================================
            // Stack
            // =================================================================
            Pha => {
                self.dummy_read_pc(bus);
                self.push(bus, self.regs.a);
            }
            Php => {
                self.dummy_read_pc(bus);
                self.push(bus, self.regs.p.to_push(true));
            }
            Pla => {
                self.dummy_read_pc(bus);
                self.dummy_read_stack(bus);
                let value = self.pull(bus);
                self.load_a(value);
            }
            Plp => {
                self.dummy_read_pc(bus);
                self.dummy_read_stack(bus);
                let value = self.pull(bus);
                self.regs.p.pull(value);
            }

            // =================================================================
            // NOP and STP
            // =================================================================
            Nop => {
                // The operand forms read their operand and throw it away.
                self.read_operand(bus, mode);
            }
            Stp => {
                self.dummy_read_pc(bus);
                self.halted = true;
                debug!(
                    "STP ${opcode:02X} at ${:04X}: halted",
                    self.regs.pc.wrapping_sub(1)
                );
            }
        }
    }

    fn load_a(&mut self, value: u8) {
        self.regs.a = value;
        self.regs.p.set_nz(value);
    }

    fn load_x(&mut self, value: u8) {
        self.regs.x = value;
        self.regs.p.set_nz(value);
    }

    fn set_flag(&mut self, bus: &mut impl Bus, flag: u8, value: bool) {
        self.dummy_read_pc(bus);
        self.regs.p.set_if(flag, value);
    }

    /// Resolve the operand and read it once. Indexed modes only pay the
    /// dummy read when they cross a page.
    fn read_operand(&mut self, bus: &mut impl Bus, mode: Mode) -> u8 {
        match self.resolve(bus, mode, Indexing::OnPageCross) {
            Operand::Register => self.regs.a,
            Operand::Immediate(value) => value,
            Operand::Address(addr) => self.read(bus, addr),
        }
    }

    /// Read-modify-write on A or on memory.
    ///
    /// The memory form writes the unmodified byte back before the result,
    /// and both writes reach the bus.
    fn modify(
        &mut self,
        bus: &mut impl Bus,
        mode: Mode,
        op: impl FnOnce(&mut Status, u8) -> u8,
    ) -> u8 {
        match self.resolve(bus, mode, Indexing::Always) {
            Operand::Address(addr) => {
                let old = self.read(bus, addr);
                self.write(bus, addr, old);
                let new = op(&mut self.regs.p, old);
                self.write(bus, addr, new);
                new
            }
            Operand::Register | Operand::Immediate(_) => {
                self.regs.a = op(&mut self.regs.p, self.regs.a);
                self.regs.a
            }
        }
    }

    fn store(&mut self, bus: &mut impl Bus, mode: Mode, value: u8) {
        if let Operand::Address(addr) = self.resolve(bus, mode, Indexing::Always) {
            self.write(bus, addr, value);
        }
    }

    /// SHA/SHX/SHY/TAS: store `value & (H + 1)`, where H is the high byte of
    /// the unindexed base. When indexing crosses a page, the stored byte
    /// also replaces the high byte of the target address.
    fn store_and_high(&mut self, bus: &mut impl Bus, mode: Mode, value: u8) {
        let (base, index) = self.indexed_base(bus, mode);
        let addr = self.add_index(bus, base, index, Indexing::Always);
        let value = value & ((base >> 8) as u8).wrapping_add(1);
        let addr = if (base ^ addr) & 0xFF00 == 0 {
            addr
        } else {
            (u16::from(value) << 8) | (addr & 0x00FF)
        };
        self.write(bus, addr, value);
    }

    /// Conditional branch. Not taken: 2 cycles. Taken: a dummy read at the
    /// next opcode, plus a dummy read at the address with the unfixed high
    /// byte when the target is on another page.
    fn branch(&mut self, bus: &mut impl Bus, taken: bool) {
        let target = self.addr_relative(bus);
        if !taken {
            return;
        }
        self.dummy_read_pc(bus);
        let pc = self.regs.pc;
        if (pc ^ target) & 0xFF00 != 0 {
            self.read(bus, (pc & 0xFF00) | (target & 0x00FF));
        }
        self.regs.pc = target;
    }
}
