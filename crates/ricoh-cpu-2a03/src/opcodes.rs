//! Opcode table.
//!
//! One entry per opcode byte: the mnemonic and the addressing mode. The
//! operand discipline (read, write, read-modify-write...) follows from the
//! pair, see [`OpDef::access`]. The executor and the disassembler both work
//! from this table.

use std::fmt;

// The table and the access classifier read like an assembler listing.
#[allow(clippy::enum_glob_use)]
use Mnemonic::*;
#[allow(clippy::enum_glob_use)]
use Mode::*;

/// Instruction mnemonics, documented and undocumented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,

    // Undocumented.
    Alr,
    Anc,
    Ane,
    Arr,
    Dcp,
    Isc,
    Las,
    Lax,
    Lxa,
    Rla,
    Rra,
    Sax,
    Sbx,
    Sha,
    Shx,
    Shy,
    Slo,
    Sre,
    Stp,
    Tas,
}

impl Mnemonic {
    /// Upper-case assembler name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Alr => "ALR",
            Self::Anc => "ANC",
            Self::Ane => "ANE",
            Self::Arr => "ARR",
            Self::Dcp => "DCP",
            Self::Isc => "ISC",
            Self::Las => "LAS",
            Self::Lax => "LAX",
            Self::Lxa => "LXA",
            Self::Rla => "RLA",
            Self::Rra => "RRA",
            Self::Sax => "SAX",
            Self::Sbx => "SBX",
            Self::Sha => "SHA",
            Self::Shx => "SHX",
            Self::Shy => "SHY",
            Self::Slo => "SLO",
            Self::Sre => "SRE",
            Self::Stp => "STP",
            Self::Tas => "TAS",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// No operand.
    Implied,
    /// Operates on A.
    Accumulator,
    /// `#$nn`
    Immediate,
    /// `$nn`
    ZeroPage,
    /// `$nn,X`, wraps within page zero.
    ZeroPageX,
    /// `$nn,Y`, wraps within page zero.
    ZeroPageY,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X`
    AbsoluteX,
    /// `$nnnn,Y`
    AbsoluteY,
    /// `($nnnn)`, JMP only, with the page-wrap bug.
    Indirect,
    /// `($nn,X)`
    IndirectX,
    /// `($nn),Y`
    IndirectY,
    /// Signed 8-bit branch displacement.
    Relative,
}

impl Mode {
    /// Instruction length in bytes, opcode included.
    #[must_use]
    pub const fn len(self) -> u8 {
        match self {
            Self::Implied | Self::Accumulator => 1,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndirectX
            | Self::IndirectY
            | Self::Relative => 2,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 3,
        }
    }
}

/// How an instruction uses its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Registers only; one dummy read of the next byte.
    Implied,
    /// Operand read once. Indexed modes add a dummy read only on page cross.
    Read,
    /// Operand written. Indexed modes always do the dummy read.
    Write,
    /// Read, write the original back, write the result. Indexed modes
    /// always do the dummy read.
    ReadModifyWrite,
    /// Flow control and stack instructions with their own bus sequence.
    Control,
}

/// One opcode table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpDef {
    pub mnemonic: Mnemonic,
    pub mode: Mode,
    /// Undocumented opcode (including the NOP and SBC duplicates).
    pub illegal: bool,
}

impl OpDef {
    /// Operand discipline of this entry.
    #[must_use]
    pub const fn access(self) -> Access {
        match self.mnemonic {
            Adc | And | Bit | Cmp | Cpx | Cpy | Eor | Lda | Ldx | Ldy | Ora | Sbc | Alr | Anc
            | Ane | Arr | Las | Lax | Lxa | Sbx => Access::Read,
            Nop => match self.mode {
                Mode::Implied => Access::Implied,
                _ => Access::Read,
            },
            Asl | Lsr | Rol | Ror | Dec | Inc | Dcp | Isc | Rla | Rra | Slo | Sre => {
                Access::ReadModifyWrite
            }
            Sta | Stx | Sty | Sax | Sha | Shx | Shy | Tas => Access::Write,
            Clc | Cld | Cli | Clv | Sec | Sed | Sei | Dex | Dey | Inx | Iny | Tax | Tay | Tsx
            | Txa | Txs | Tya => Access::Implied,
            Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs | Brk | Jmp | Jsr | Pha | Php | Pla
            | Plp | Rti | Rts | Stp => Access::Control,
        }
    }
}

const fn op(mnemonic: Mnemonic, mode: Mode) -> OpDef {
    OpDef {
        mnemonic,
        mode,
        illegal: false,
    }
}

const fn undoc(mnemonic: Mnemonic, mode: Mode) -> OpDef {
    OpDef {
        mnemonic,
        mode,
        illegal: true,
    }
}

/// The 256-entry opcode table, indexed by opcode byte.
pub static OPCODES: [OpDef; 256] = [
    /* 00 */ op(Brk, Implied),
    /* 01 */ op(Ora, IndirectX),
    /* 02 */ undoc(Stp, Implied),
    /* 03 */ undoc(Slo, IndirectX),
    /* 04 */ undoc(Nop, ZeroPage),
    /* 05 */ op(Ora, ZeroPage),
    /* 06 */ op(Asl, ZeroPage),
    /* 07 */ undoc(Slo, ZeroPage),
    /* 08 */ op(Php, Implied),
    /* 09 */ op(Ora, Immediate),
    /* 0A */ op(Asl, Accumulator),
    /* 0B */ undoc(Anc, Immediate),
    /* 0C */ undoc(Nop, Absolute),
    /* 0D */ op(Ora, Absolute),
    /* 0E */ op(Asl, Absolute),
    /* 0F */ undoc(Slo, Absolute),
    /* 10 */ op(Bpl, Relative),
    /* 11 */ op(Ora, IndirectY),
    /* 12 */ undoc(Stp, Implied),
    /* 13 */ undoc(Slo, IndirectY),
    /* 14 */ undoc(Nop, ZeroPageX),
    /* 15 */ op(Ora, ZeroPageX),
    /* 16 */ op(Asl, ZeroPageX),
    /* 17 */ undoc(Slo, ZeroPageX),
    /* 18 */ op(Clc, Implied),
    /* 19 */ op(Ora, AbsoluteY),
    /* 1A */ undoc(Nop, Implied),
    /* 1B */ undoc(Slo, AbsoluteY),
    /* 1C */ undoc(Nop, AbsoluteX),
    /* 1D */ op(Ora, AbsoluteX),
    /* 1E */ op(Asl, AbsoluteX),
    /* 1F */ undoc(Slo, AbsoluteX),
    /* 20 */ op(Jsr, Absolute),
    /* 21 */ op(And, IndirectX),
    /* 22 */ undoc(Stp, Implied),
    /* 23 */ undoc(Rla, IndirectX),
    /* 24 */ op(Bit, ZeroPage),
    /* 25 */ op(And, ZeroPage),
    /* 26 */ op(Rol, ZeroPage),
    /* 27 */ undoc(Rla, ZeroPage),
    /* 28 */ op(Plp, Implied),
    /* 29 */ op(And, Immediate),
    /* 2A */ op(Rol, Accumulator),
    /* 2B */ undoc(Anc, Immediate),
    /* 2C */ op(Bit, Absolute),
    /* 2D */ op(And, Absolute),
    /* 2E */ op(Rol, Absolute),
    /* 2F */ undoc(Rla, Absolute),
    /* 30 */ op(Bmi, Relative),
    /* 31 */ op(And, IndirectY),
    /* 32 */ undoc(Stp, Implied),
    /* 33 */ undoc(Rla, IndirectY),
    /* 34 */ undoc(Nop, ZeroPageX),
    /* 35 */ op(And, ZeroPageX),
    /* 36 */ op(Rol, ZeroPageX),
    /* 37 */ undoc(Rla, ZeroPageX),
    /* 38 */ op(Sec, Implied),
    /* 39 */ op(And, AbsoluteY),
    /* 3A */ undoc(Nop, Implied),
    /* 3B */ undoc(Rla, AbsoluteY),
    /* 3C */ undoc(Nop, AbsoluteX),
    /* 3D */ op(And, AbsoluteX),
    /* 3E */ op(Rol, AbsoluteX),
    /* 3F */ undoc(Rla, AbsoluteX),
    /* 40 */ op(Rti, Implied),
    /* 41 */ op(Eor, IndirectX),
    /* 42 */ undoc(Stp, Implied),
    /* 43 */ undoc(Sre, IndirectX),
    /* 44 */ undoc(Nop, ZeroPage),
    /* 45 */ op(Eor, ZeroPage),
    /* 46 */ op(Lsr, ZeroPage),
    /* 47 */ undoc(Sre, ZeroPage),
    /* 48 */ op(Pha, Implied),
    /* 49 */ op(Eor, Immediate),
    /* 4A */ op(Lsr, Accumulator),
    /* 4B */ undoc(Alr, Immediate),
    /* 4C */ op(Jmp, Absolute),
    /* 4D */ op(Eor, Absolute),
    /* 4E */ op(Lsr, Absolute),
    /* 4F */ undoc(Sre, Absolute),
    /* 50 */ op(Bvc, Relative),
    /* 51 */ op(Eor, IndirectY),
    /* 52 */ undoc(Stp, Implied),
    /* 53 */ undoc(Sre, IndirectY),
    /* 54 */ undoc(Nop, ZeroPageX),
    /* 55 */ op(Eor, ZeroPageX),
    /* 56 */ op(Lsr, ZeroPageX),
    /* 57 */ undoc(Sre, ZeroPageX),
    /* 58 */ op(Cli, Implied),
    /* 59 */ op(Eor, AbsoluteY),
    /* 5A */ undoc(Nop, Implied),
    /* 5B */ undoc(Sre, AbsoluteY),
    /* 5C */ undoc(Nop, AbsoluteX),
    /* 5D */ op(Eor, AbsoluteX),
    /* 5E */ op(Lsr, AbsoluteX),
    /* 5F */ undoc(Sre, AbsoluteX),
    /* 60 */ op(Rts, Implied),
    /* 61 */ op(Adc, IndirectX),
    /* 62 */ undoc(Stp, Implied),
    /* 63 */ undoc(Rra, IndirectX),
    /* 64 */ undoc(Nop, ZeroPage),
    /* 65 */ op(Adc, ZeroPage),
    /* 66 */ op(Ror, ZeroPage),
    /* 67 */ undoc(Rra, ZeroPage),
    /* 68 */ op(Pla, Implied),
    /* 69 */ op(Adc, Immediate),
    /* 6A */ op(Ror, Accumulator),
    /* 6B */ undoc(Arr, Immediate),
    /* 6C */ op(Jmp, Indirect),
    /* 6D */ op(Adc, Absolute),
    /* 6E */ op(Ror, Absolute),
    /* 6F */ undoc(Rra, Absolute),
    /* 70 */ op(Bvs, Relative),
    /* 71 */ op(Adc, IndirectY),
    /* 72 */ undoc(Stp, Implied),
    /* 73 */ undoc(Rra, IndirectY),
    /* 74 */ undoc(Nop, ZeroPageX),
    /* 75 */ op(Adc, ZeroPageX),
    /* 76 */ op(Ror, ZeroPageX),
    /* 77 */ undoc(Rra, ZeroPageX),
    /* 78 */ op(Sei, Implied),
    /* 79 */ op(Adc, AbsoluteY),
    /* 7A */ undoc(Nop, Implied),
    /* 7B */ undoc(Rra, AbsoluteY),
    /* 7C */ undoc(Nop, AbsoluteX),
    /* 7D */ op(Adc, AbsoluteX),
    /* 7E */ op(Ror, AbsoluteX),
    /* 7F */ undoc(Rra, AbsoluteX),
    /* 80 */ undoc(Nop, Immediate),
    /* 81 */ op(Sta, IndirectX),
    /* 82 */ undoc(Nop, Immediate),
    /* 83 */ undoc(Sax, IndirectX),
    /* 84 */ op(Sty, ZeroPage),
    /* 85 */ op(Sta, ZeroPage),
    /* 86 */ op(Stx, ZeroPage),
    /* 87 */ undoc(Sax, ZeroPage),
    /* 88 */ op(Dey, Implied),
    /* 89 */ undoc(Nop, Immediate),
    /* 8A */ op(Txa, Implied),
    /* 8B */ undoc(Ane, Immediate),
    /* 8C */ op(Sty, Absolute),
    /* 8D */ op(Sta, Absolute),
    /* 8E */ op(Stx, Absolute),
    /* 8F */ undoc(Sax, Absolute),
    /* 90 */ op(Bcc, Relative),
    /* 91 */ op(Sta, IndirectY),
    /* 92 */ undoc(Stp, Implied),
    /* 93 */ undoc(Sha, IndirectY),
    /* 94 */ op(Sty, ZeroPageX),
    /* 95 */ op(Sta, ZeroPageX),
    /* 96 */ op(Stx, ZeroPageY),
    /* 97 */ undoc(Sax, ZeroPageY),
    /* 98 */ op(Tya, Implied),
    /* 99 */ op(Sta, AbsoluteY),
    /* 9A */ op(Txs, Implied),
    /* 9B */ undoc(Tas, AbsoluteY),
    /* 9C */ undoc(Shy, AbsoluteX),
    /* 9D */ op(Sta, AbsoluteX),
    /* 9E */ undoc(Shx, AbsoluteY),
    /* 9F */ undoc(Sha, AbsoluteY),
    /* A0 */ op(Ldy, Immediate),
    /* A1 */ op(Lda, IndirectX),
    /* A2 */ op(Ldx, Immediate),
    /* A3 */ undoc(Lax, IndirectX),
    /* A4 */ op(Ldy, ZeroPage),
    /* A5 */ op(Lda, ZeroPage),
    /* A6 */ op(Ldx, ZeroPage),
    /* A7 */ undoc(Lax, ZeroPage),
    /* A8 */ op(Tay, Implied),
    /* A9 */ op(Lda, Immediate),
    /* AA */ op(Tax, Implied),
    /* AB */ undoc(Lxa, Immediate),
    /* AC */ op(Ldy, Absolute),
    /* AD */ op(Lda, Absolute),
    /* AE */ op(Ldx, Absolute),
    /* AF */ undoc(Lax, Absolute),
    /* B0 */ op(Bcs, Relative),
    /* B1 */ op(Lda, IndirectY),
    /* B2 */ undoc(Stp, Implied),
    /* B3 */ undoc(Lax, IndirectY),
    /* B4 */ op(Ldy, ZeroPageX),
    /* B5 */ op(Lda, ZeroPageX),
    /* B6 */ op(Ldx, ZeroPageY),
    /* B7 */ undoc(Lax, ZeroPageY),
    /* B8 */ op(Clv, Implied),
    /* B9 */ op(Lda, AbsoluteY),
    /* BA */ op(Tsx, Implied),
    /* BB */ undoc(Las, AbsoluteY),
    /* BC */ op(Ldy, AbsoluteX),
    /* BD */ op(Lda, AbsoluteX),
    /* BE */ op(Ldx, AbsoluteY),
    /* BF */ undoc(Lax, AbsoluteY),
    /* C0 */ op(Cpy, Immediate),
    /* C1 */ op(Cmp, IndirectX),
    /* C2 */ undoc(Nop, Immediate),
    /* C3 */ undoc(Dcp, IndirectX),
    /* C4 */ op(Cpy, ZeroPage),
    /* C5 */ op(Cmp, ZeroPage),
    /* C6 */ op(Dec, ZeroPage),
    /* C7 */ undoc(Dcp, ZeroPage),
    /* C8 */ op(Iny, Implied),
    /* C9 */ op(Cmp, Immediate),
    /* CA */ op(Dex, Implied),
    /* CB */ undoc(Sbx, Immediate),
    /* CC */ op(Cpy, Absolute),
    /* CD */ op(Cmp, Absolute),
    /* CE */ op(Dec, Absolute),
    /* CF */ undoc(Dcp, Absolute),
    /* D0 */ op(Bne, Relative),
    /* D1 */ op(Cmp, IndirectY),
    /* D2 */ undoc(Stp, Implied),
    /* D3 */ undoc(Dcp, IndirectY),
    /* D4 */ undoc(Nop, ZeroPageX),
    /* D5 */ op(Cmp, ZeroPageX),
    /* D6 */ op(Dec, ZeroPageX),
    /* D7 */ undoc(Dcp, ZeroPageX),
    /* D8 */ op(Cld, Implied),
    /* D9 */ op(Cmp, AbsoluteY),
    /* DA */ undoc(Nop, Implied),
    /* DB */ undoc(Dcp, AbsoluteY),
    /* DC */ undoc(Nop, AbsoluteX),
    /* DD */ op(Cmp, AbsoluteX),
    /* DE */ op(Dec, AbsoluteX),
    /* DF */ undoc(Dcp, AbsoluteX),
    /* E0 */ op(Cpx, Immediate),
    /* E1 */ op(Sbc, IndirectX),
    /* E2 */ undoc(Nop, Immediate),
    /* E3 */ undoc(Isc, IndirectX),
    /* E4 */ op(Cpx, ZeroPage),
    /* E5 */ op(Sbc, ZeroPage),
    /* E6 */ op(Inc, ZeroPage),
    /* E7 */ undoc(Isc, ZeroPage),
    /* E8 */ op(Inx, Implied),
    /* E9 */ op(Sbc, Immediate),
    /* EA */ op(Nop, Implied),
    /* EB */ undoc(Sbc, Immediate),
    /* EC */ op(Cpx, Absolute),
    /* ED */ op(Sbc, Absolute),
    /* EE */ op(Inc, Absolute),
    /* EF */ undoc(Isc, Absolute),
    /* F0 */ op(Beq, Relative),
    /* F1 */ op(Sbc, IndirectY),
    /* F2 */ undoc(Stp, Implied),
    /* F3 */ undoc(Isc, IndirectY),
    /* F4 */ undoc(Nop, ZeroPageX),
    /* F5 */ op(Sbc, ZeroPageX),
    /* F6 */ op(Inc, ZeroPageX),
    /* F7 */ undoc(Isc, ZeroPageX),
    /* F8 */ op(Sed, Implied),
    /* F9 */ op(Sbc, AbsoluteY),
    /* FA */ undoc(Nop, Implied),
    /* FB */ undoc(Isc, AbsoluteY),
    /* FC */ undoc(Nop, AbsoluteX),
    /* FD */ op(Sbc, AbsoluteX),
    /* FE */ op(Inc, AbsoluteX),
    /* FF */ undoc(Isc, AbsoluteX),
];
