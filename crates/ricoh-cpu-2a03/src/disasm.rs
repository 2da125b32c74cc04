//! Side-effect-free disassembler.
//!
//! Decodes through [`Bus::peek`] only, so it is safe to run against live
//! hardware registers between steps.

use std::fmt;

use emu_core::Bus;

use crate::Registers;
use crate::opcodes::{Access, Mnemonic, Mode, OPCODES};

/// Effective address of a memory operand and the byte currently there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effective {
    pub address: u16,
    pub value: u8,
}

/// One decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisasmOp {
    /// Address of the opcode byte.
    pub pc: u16,
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    /// Undocumented opcode.
    pub illegal: bool,
    raw: [u8; 3],
    len: u8,
    /// Operand in assembler syntax, e.g. `$1234,X` or `($12),Y`.
    pub operand_text: String,
    /// Address of the following instruction (not the branch target).
    pub next_pc: u16,
    /// Only filled in by [`Rp2A03::disassemble`](crate::Rp2A03::disassemble).
    pub effective: Option<Effective>,
}

impl DisasmOp {
    /// The instruction bytes, opcode first.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.raw[..usize::from(self.len)]
    }
}

impl fmt::Display for DisasmOp {
    /// nestest layout: `C000  4C F5 C5  JMP $C5F5`, with undocumented
    /// opcodes marked by a `*` in front of the mnemonic.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = self
            .bytes()
            .iter()
            .map(|byte| format!("{byte:02X}"))
            .collect::<Vec<_>>()
            .join(" ");
        let marker = if self.illegal { '*' } else { ' ' };

        write!(f, "{:04X}  {hex:<8} {marker}{}", self.pc, self.mnemonic)?;
        if !self.operand_text.is_empty() {
            write!(f, " {}", self.operand_text)?;
        }
        if let Some(effective) = self.effective {
            match self.mode {
                Mode::ZeroPage | Mode::Absolute => write!(f, " = {:02X}", effective.value)?,
                Mode::Indirect => write!(f, " = {:04X}", effective.address)?,
                _ => write!(f, " @ {:04X} = {:02X}", effective.address, effective.value)?,
            }
        }
        Ok(())
    }
}

/// Decode the instruction at `pc` without any bus side effect.
///
/// No register state is involved, so `effective` is always `None`.
#[must_use]
pub fn disassemble(bus: &impl Bus, pc: u16) -> DisasmOp {
    decode(bus, pc, None)
}

pub(crate) fn decode(bus: &impl Bus, pc: u16, regs: Option<&Registers>) -> DisasmOp {
    let opcode = bus.peek(pc);
    let def = OPCODES[usize::from(opcode)];
    let len = def.mode.len();

    let mut raw = [opcode, 0, 0];
    for i in 1..len {
        raw[usize::from(i)] = bus.peek(pc.wrapping_add(u16::from(i)));
    }
    let next_pc = pc.wrapping_add(u16::from(len));
    let byte = raw[1];
    let word = u16::from_le_bytes([raw[1], raw[2]]);

    let operand_text = match def.mode {
        Mode::Implied => String::new(),
        Mode::Accumulator => "A".to_string(),
        Mode::Immediate => format!("#${byte:02X}"),
        Mode::ZeroPage => format!("${byte:02X}"),
        Mode::ZeroPageX => format!("${byte:02X},X"),
        Mode::ZeroPageY => format!("${byte:02X},Y"),
        Mode::Absolute => format!("${word:04X}"),
        Mode::AbsoluteX => format!("${word:04X},X"),
        Mode::AbsoluteY => format!("${word:04X},Y"),
        Mode::Indirect => format!("(${word:04X})"),
        Mode::IndirectX => format!("(${byte:02X},X)"),
        Mode::IndirectY => format!("(${byte:02X}),Y"),
        Mode::Relative => {
            let target = next_pc.wrapping_add(byte as i8 as u16);
            format!("${target:04X}")
        }
    };

    let effective =
        regs.and_then(|regs| effective_address(bus, def.mode, def.access(), byte, word, regs));

    DisasmOp {
        pc,
        mnemonic: def.mnemonic,
        mode: def.mode,
        illegal: def.illegal,
        raw,
        len,
        operand_text,
        next_pc,
        effective: effective.map(|address| Effective {
            address,
            value: bus.peek(address),
        }),
    }
}

/// Memory operand address as the CPU would form it with the given registers.
fn effective_address(
    bus: &impl Bus,
    mode: Mode,
    access: Access,
    byte: u8,
    word: u16,
    regs: &Registers,
) -> Option<u16> {
    let zero_page_word = |ptr: u8| {
        u16::from_le_bytes([bus.peek(u16::from(ptr)), bus.peek(u16::from(ptr.wrapping_add(1)))])
    };

    match mode {
        Mode::Indirect => {
            let high = (word & 0xFF00) | (word.wrapping_add(1) & 0x00FF);
            Some(u16::from_le_bytes([bus.peek(word), bus.peek(high)]))
        }
        // JMP/JSR absolute and branches name their target already.
        _ if access == Access::Control => None,
        Mode::ZeroPage => Some(u16::from(byte)),
        Mode::ZeroPageX => Some(u16::from(byte.wrapping_add(regs.x))),
        Mode::ZeroPageY => Some(u16::from(byte.wrapping_add(regs.y))),
        Mode::Absolute => Some(word),
        Mode::AbsoluteX => Some(word.wrapping_add(u16::from(regs.x))),
        Mode::AbsoluteY => Some(word.wrapping_add(u16::from(regs.y))),
        Mode::IndirectX => Some(zero_page_word(byte.wrapping_add(regs.x))),
        Mode::IndirectY => Some(zero_page_word(byte).wrapping_add(u16::from(regs.y))),
        Mode::Implied | Mode::Accumulator | Mode::Immediate | Mode::Relative => None,
    }
}
