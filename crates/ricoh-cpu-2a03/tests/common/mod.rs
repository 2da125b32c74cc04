//! Shared helpers for the CPU integration tests.

#![allow(dead_code)]

use emu_core::{BusCycle, RecordingBus, SimpleBus};
use ricoh_cpu_2a03::{Rp2A03, Status};

/// Build a bus from a memory dump.
///
/// One line per run of bytes, `ADDR: bb bb bb ...`, all hex. Blank lines
/// and lines starting with `#` are skipped.
pub fn bus_from_dump(dump: &str) -> SimpleBus {
    let mut bus = SimpleBus::new();
    for line in dump.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (addr, bytes) = line
            .split_once(':')
            .unwrap_or_else(|| panic!("malformed dump line: {line}"));
        let addr = u16::from_str_radix(addr.trim(), 16)
            .unwrap_or_else(|e| panic!("bad address in {line:?}: {e}"));
        let bytes: Vec<u8> = bytes
            .split_whitespace()
            .map(|byte| {
                u8::from_str_radix(byte, 16)
                    .unwrap_or_else(|e| panic!("bad byte {byte:?} in {line:?}: {e}"))
            })
            .collect();
        bus.load(addr, &bytes);
    }
    bus
}

/// A CPU in post-reset state (S=$FD, P=$24) with PC at `pc`, without
/// running the reset sequence.
pub fn cpu_at(pc: u16) -> Rp2A03 {
    let mut cpu = Rp2A03::new();
    cpu.regs.pc = pc;
    cpu.regs.s = 0xFD;
    cpu.regs.p = Status(0x24);
    cpu
}

/// Load `dump`, start at `pc` and return the CPU with a recording bus.
pub fn setup(dump: &str, pc: u16) -> (Rp2A03, RecordingBus<SimpleBus>) {
    (cpu_at(pc), RecordingBus::new(bus_from_dump(dump)))
}

/// Run one step and return the bus cycles it produced.
pub fn step_recorded(cpu: &mut Rp2A03, bus: &mut RecordingBus<SimpleBus>) -> Vec<BusCycle> {
    bus.clear();
    let cycles = cpu.step(bus);
    assert_eq!(
        cycles as usize,
        bus.cycles().len(),
        "step() must report one cycle per bus access"
    );
    bus.cycles().to_vec()
}

pub const fn r(address: u16, value: u8) -> BusCycle {
    BusCycle::read(address, value)
}

pub const fn w(address: u16, value: u8) -> BusCycle {
    BusCycle::write(address, value)
}
