//! nestest.nes in automation mode, checked against the reference log.
//!
//! Starts at `$C000` with 7 cycles already counted and compares PC, A, X,
//! Y, P, SP and the cycle count before every instruction. The PPU columns
//! of the log are ignored.
//!
//! Test data lives in `test-data/nestest.nes` and `test-data/nestest.log` at
//! the workspace root.

use emu_core::Bus;
use ricoh_cpu_2a03::{Rp2A03, trace};
use std::fs;
use std::path::Path;

const INES_HEADER_LEN: usize = 16;
const PRG_BANK_LEN: usize = 0x4000;

/// NROM-128/256 machine: 2 KiB mirrored RAM, PRG at $8000-$FFFF, open bus
/// reads as $FF everywhere else.
struct NromBus {
    ram: [u8; 0x800],
    prg: Vec<u8>,
}

impl NromBus {
    fn from_ines(rom: &[u8]) -> Self {
        assert_eq!(&rom[..4], b"NES\x1A", "not an iNES file");
        let banks = usize::from(rom[4]);
        let trainer = if rom[6] & 0x04 != 0 { 512 } else { 0 };
        let start = INES_HEADER_LEN + trainer;
        Self {
            ram: [0; 0x800],
            prg: rom[start..start + banks * PRG_BANK_LEN].to_vec(),
        }
    }
}

impl Bus for NromBus {
    fn read(&mut self, address: u16) -> u8 {
        self.peek(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        if address < 0x2000 {
            self.ram[usize::from(address) & 0x7FF] = value;
        }
    }

    fn peek(&self, address: u16) -> u8 {
        match address {
            0x0000..=0x1FFF => self.ram[usize::from(address) & 0x7FF],
            0x8000..=0xFFFF => self.prg[(usize::from(address) - 0x8000) % self.prg.len()],
            _ => 0xFF,
        }
    }
}

/// Registers and cycle count parsed from one log line.
#[derive(Debug, PartialEq, Eq)]
struct LogState {
    pc: u16,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    sp: u8,
    cyc: u64,
}

impl LogState {
    fn parse(line: &str) -> Self {
        let field = |prefix: &str| {
            line.split_whitespace()
                .find_map(|token| token.strip_prefix(prefix))
                .unwrap_or_else(|| panic!("no {prefix} in {line:?}"))
        };
        let hex8 = |prefix: &str| u8::from_str_radix(field(prefix), 16).unwrap();

        Self {
            pc: u16::from_str_radix(&line[..4], 16).unwrap(),
            a: hex8("A:"),
            x: hex8("X:"),
            y: hex8("Y:"),
            p: hex8("P:"),
            sp: hex8("SP:"),
            cyc: field("CYC:").parse().unwrap(),
        }
    }

    fn of(cpu: &Rp2A03) -> Self {
        Self {
            pc: cpu.regs.pc,
            a: cpu.regs.a,
            x: cpu.regs.x,
            y: cpu.regs.y,
            p: cpu.regs.p.0,
            sp: cpu.regs.s,
            cyc: cpu.cycles(),
        }
    }
}

#[test]
#[ignore = "requires test-data/nestest.nes and nestest.log"]
fn nestest_matches_reference_log() {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-data");
    let (Ok(rom), Ok(log)) = (
        fs::read(data_dir.join("nestest.nes")),
        fs::read_to_string(data_dir.join("nestest.log")),
    ) else {
        eprintln!("nestest data not found in {}", data_dir.display());
        return;
    };

    let mut bus = NromBus::from_ines(&rom);
    let mut cpu = Rp2A03::new();
    cpu.reset(&mut bus);
    // Automation mode entry point; the reset vector leads to the
    // interactive menu.
    cpu.regs.pc = 0xC000;

    for (number, line) in log.lines().enumerate() {
        let want = LogState::parse(line);
        let got = LogState::of(&cpu);
        assert_eq!(
            got,
            want,
            "line {}:\n  want {line}\n  got  {}",
            number + 1,
            trace::line(&cpu, &bus)
        );
        cpu.step(&mut bus);
    }

    assert_eq!(bus.peek(0x0002), 0x00, "official opcode failure code");
    assert_eq!(bus.peek(0x0003), 0x00, "unofficial opcode failure code");
}
