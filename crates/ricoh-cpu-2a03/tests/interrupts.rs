//! NMI, IRQ, BRK and reset sequencing.

mod common;

use common::{r, setup, step_recorded, w};
use emu_core::{Bus, Cpu, RecordingBus, SimpleBus};
use ricoh_cpu_2a03::{Observer, Registers, Rp2A03, Status, flags};

/// Vectors: NMI -> $9000, RESET -> $8000, IRQ/BRK -> $A000.
const VECTORS: &str = "fffa: 00 90 00 80 00 a0";

fn setup_with_vectors(program: &str, pc: u16) -> (Rp2A03, RecordingBus<SimpleBus>) {
    setup(&format!("{VECTORS}\n{program}"), pc)
}

#[test]
fn nmi_after_instruction_takes_seven_cycles() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: a9 01 ea", 0x8000);

    step_recorded(&mut cpu, &mut bus);
    cpu.trigger_nmi();
    let cycles = step_recorded(&mut cpu, &mut bus);

    assert_eq!(
        cycles,
        [
            r(0x8002, 0xEA),
            r(0x8002, 0xEA),
            w(0x01FD, 0x80),
            w(0x01FC, 0x02),
            w(0x01FB, 0x24),
            r(0xFFFA, 0x00),
            r(0xFFFB, 0x90),
        ]
    );
    assert_eq!(cpu.regs.pc, 0x9000);
    assert!(cpu.regs.p.interrupt_disable());
    assert!(!cpu.nmi_pending());
}

#[test]
fn nmi_ignores_interrupt_disable() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea", 0x8000);
    cpu.regs.p.set(flags::I);

    cpu.trigger_nmi();
    cpu.step(&mut bus);

    assert_eq!(cpu.regs.pc, 0x9000);
}

#[test]
fn nmi_is_an_edge_serviced_once() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea\n9000: ea", 0x8000);

    cpu.trigger_nmi();
    cpu.trigger_nmi();
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x9000);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x9001);
}

#[test]
fn nmi_wins_over_irq() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea", 0x8000);
    cpu.regs.p = Status(flags::U);

    cpu.trigger_irq(true);
    cpu.trigger_nmi();
    cpu.step(&mut bus);

    assert_eq!(cpu.regs.pc, 0x9000);
    assert!(cpu.irq_asserted());
}

#[test]
fn irq_pushes_break_clear() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea", 0x8000);
    cpu.regs.p = Status(flags::U | flags::C);

    cpu.trigger_irq(true);
    let cycles = step_recorded(&mut cpu, &mut bus);

    assert_eq!(cycles.len(), 7);
    assert_eq!(cycles[4], w(0x01FB, flags::U | flags::C));
    assert_eq!(cpu.regs.pc, 0xA000);
}

#[test]
fn irq_masked_by_interrupt_disable() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea", 0x8000);
    cpu.regs.p.set(flags::I);

    cpu.trigger_irq(true);
    let cycles = cpu.step(&mut bus);

    assert_eq!(cycles, 2);
    assert_eq!(cpu.regs.pc, 0x8001);
}

#[test]
fn irq_is_level_triggered() {
    // Handler is a bare RTI, so while the line stays asserted the CPU keeps
    // re-entering it.
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea\na000: 40", 0x8000);
    cpu.regs.p = Status(flags::U);
    cpu.trigger_irq(true);

    assert_eq!(cpu.step(&mut bus), 7);
    assert_eq!(cpu.regs.pc, 0xA000);

    assert_eq!(cpu.step(&mut bus), 6);
    assert_eq!(cpu.regs.pc, 0x8000);
    assert!(!cpu.regs.p.interrupt_disable());

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0xA000, "line still asserted");

    cpu.trigger_irq(false);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x8001);
}

#[test]
fn cli_lets_pending_irq_in_before_next_instruction() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: 58 ea", 0x8000);
    cpu.trigger_irq(true);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x8001);

    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0xA000);
    assert_eq!(bus.peek(0x01FC), 0x01);
}

#[test]
fn brk_pushes_pc_plus_two_and_break_set() {
    let (mut cpu, mut bus) = setup_with_vectors("1000: 00 ea", 0x1000);
    cpu.regs.p = Status(0x24);

    let cycles = step_recorded(&mut cpu, &mut bus);

    assert_eq!(
        cycles,
        [
            r(0x1000, 0x00),
            r(0x1001, 0xEA),
            w(0x01FD, 0x10),
            w(0x01FC, 0x02),
            w(0x01FB, 0x34),
            r(0xFFFE, 0x00),
            r(0xFFFF, 0xA0),
        ]
    );
    assert_eq!(cpu.regs.pc, 0xA000);
    assert!(cpu.regs.p.interrupt_disable());
    assert!(!cpu.regs.p.is_set(flags::B));
}

#[test]
fn rti_after_brk_skips_padding_byte() {
    let (mut cpu, mut bus) = setup_with_vectors("1000: 00 ea ea\na000: 40", 0x1000);
    cpu.regs.p = Status(flags::U | flags::C);

    cpu.step(&mut bus);
    let cycles = step_recorded(&mut cpu, &mut bus);

    assert_eq!(
        cycles,
        [
            r(0xA000, 0x40),
            r(0xA001, 0x00),
            r(0x01FA, 0x00),
            r(0x01FB, 0x31),
            r(0x01FC, 0x02),
            r(0x01FD, 0x10),
        ]
    );
    assert_eq!(cpu.regs.pc, 0x1002);
    assert_eq!(cpu.regs.p.0, flags::U | flags::C);
    assert_eq!(cpu.regs.s, 0xFD);
}

#[test]
fn reset_reads_vector_and_counts_seven_cycles() {
    let mut bus = RecordingBus::new(SimpleBus::new());
    bus.inner_mut().load(0xFFFC, &[0x34, 0x12]);
    let mut cpu = Rp2A03::new();

    cpu.reset(&mut bus);

    assert_eq!(bus.cycles(), [r(0xFFFC, 0x34), r(0xFFFD, 0x12)]);
    assert_eq!(cpu.cycles(), 7);
    assert_eq!(
        cpu.registers(),
        Registers {
            a: 0,
            x: 0,
            y: 0,
            s: 0xFD,
            pc: 0x1234,
            p: Status(0x24),
        }
    );
}

#[test]
fn reset_clears_pending_interrupts() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea", 0x1000);
    cpu.trigger_nmi();
    cpu.trigger_irq(true);

    cpu.reset(&mut bus);
    cpu.step(&mut bus);

    assert_eq!(cpu.regs.pc, 0x8001);
}

#[derive(Debug, PartialEq, Eq)]
enum Event {
    Reset(u16),
    Instruction(u16),
    Interrupt { from: u16, to: u16, nmi: bool },
    Halt(u16),
}

#[derive(Default)]
struct EventLog(Vec<Event>);

impl Observer for EventLog {
    fn on_reset(&mut self, pc: u16) {
        self.0.push(Event::Reset(pc));
    }

    fn on_instruction(&mut self, pc: u16) {
        self.0.push(Event::Instruction(pc));
    }

    fn on_interrupt(&mut self, from: u16, to: u16, nmi: bool) {
        self.0.push(Event::Interrupt { from, to, nmi });
    }

    fn on_halt(&mut self, pc: u16) {
        self.0.push(Event::Halt(pc));
    }
}

#[test]
fn observer_sees_nmi_source_and_handler() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: a9 01 ea", 0x8000);
    let mut log = EventLog::default();

    cpu.step_observed(&mut bus, &mut log);
    cpu.trigger_nmi();
    cpu.step_observed(&mut bus, &mut log);

    assert_eq!(
        log.0,
        [
            Event::Instruction(0x8000),
            Event::Interrupt {
                from: 0x8002,
                to: 0x9000,
                nmi: true
            },
        ]
    );
}

#[test]
fn observer_sees_irq_source_and_handler() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea ea", 0x8000);
    cpu.regs.p = Status(flags::U);
    let mut log = EventLog::default();

    cpu.step_observed(&mut bus, &mut log);
    cpu.trigger_irq(true);
    cpu.step_observed(&mut bus, &mut log);

    assert_eq!(
        log.0,
        [
            Event::Instruction(0x8000),
            Event::Interrupt {
                from: 0x8001,
                to: 0xA000,
                nmi: false
            },
        ]
    );
}

#[test]
fn observer_sees_reset_and_halt() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea 02", 0x0000);
    let mut log = EventLog::default();

    cpu.reset_observed(&mut bus, &mut log);
    cpu.step_observed(&mut bus, &mut log);
    cpu.step_observed(&mut bus, &mut log);
    assert_eq!(cpu.step_observed(&mut bus, &mut log), 0);

    assert_eq!(
        log.0,
        [
            Event::Reset(0x8000),
            Event::Instruction(0x8000),
            Event::Instruction(0x8001),
            Event::Halt(0x8001),
        ]
    );
}

#[test]
fn observer_works_as_trait_object() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: ea", 0x8000);
    let mut log = EventLog::default();
    let observer: &mut dyn Observer = &mut log;

    cpu.step_observed(&mut bus, observer);

    assert_eq!(log.0, [Event::Instruction(0x8000)]);
}

/// Drive any CPU through the trait only.
fn run<C: Cpu>(cpu: &mut C, bus: &mut impl Bus, steps: usize) -> u32 {
    (0..steps).map(|_| cpu.step(&mut *bus)).sum()
}

#[test]
fn usable_through_cpu_trait() {
    let (mut cpu, mut bus) = setup_with_vectors("8000: a9 01 ea 02", 0x0000);

    Cpu::reset(&mut cpu, &mut bus);
    assert_eq!(Cpu::pc(&cpu), 0x8000);

    let cycles = run(&mut cpu, &mut bus, 3);
    assert_eq!(cycles, 2 + 2 + 2);
    assert!(Cpu::is_halted(&cpu));
    assert_eq!(Cpu::registers(&cpu).a, 0x01);

    Cpu::trigger_nmi(&mut cpu);
    assert_eq!(run(&mut cpu, &mut bus, 1), 0);
}
