//! Unit tests for 6502 instruction behavior.

use emu_core::{Bus, Cpu, SimpleBus};
use mos_6502::{Mos6502, Status, flags};

/// Run one complete instruction and return the cycles it took.
fn run_instruction(cpu: &mut Mos6502, bus: &mut SimpleBus) -> u32 {
    let cycles = cpu.step(bus);
    assert!(cpu.is_instruction_complete());
    cycles
}

/// Load a program at $0200 and put the CPU in its post-reset state there.
fn setup_program(bus: &mut SimpleBus, cpu: &mut Mos6502, program: &[u8]) {
    setup_program_at(bus, cpu, 0x0200, program);
}

fn setup_program_at(bus: &mut SimpleBus, cpu: &mut Mos6502, origin: u16, program: &[u8]) {
    bus.load(origin, program);
    cpu.regs.pc = origin;
    cpu.regs.s = 0xFD;
    cpu.regs.p = Status::new();
}

#[test]
fn test_reset_sequence() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.load(0xFFFC, &[0x00, 0x80]);

    cpu.reset(&mut bus);

    assert_eq!(cpu.regs.s, 0xFD);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.regs.p.0, flags::U, "only U set after reset");
    assert_eq!(cpu.cycles_remaining(), 8);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 8);
    assert_eq!(cpu.pc(), 0x8000, "reset cycles execute nothing");
}

#[test]
fn test_lda_immediate_zero() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x00]);
    cpu.regs.a = 0x55;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.p.is_set(flags::Z));
    assert!(!cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_jmp_absolute() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0x4C, 0x00, 0x80]);
    cpu.regs.p.0 = flags::U | flags::C | flags::V;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.regs.p.0, flags::U | flags::C | flags::V, "flags unchanged");
}

#[test]
fn test_jmp_indirect_page_wrap_bug() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0x6C, 0xFF, 0x30]);
    bus.write(0x30FF, 0x80);
    bus.write(0x3000, 0x50);
    bus.write(0x3100, 0x40);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.pc(), 0x5080, "high byte comes from $3000, not $3100");
}

#[test]
fn test_jsr_rts() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program_at(&mut bus, &mut cpu, 0x0600, &[0x20, 0x34, 0x12]);
    bus.write(0x1234, 0x60); // RTS

    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(bus.peek(0x01FD), 0x06, "high byte pushed first");
    assert_eq!(bus.peek(0x01FC), 0x02, "low byte of return address - 1");
    assert_eq!(cpu.regs.s, 0xFB);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);
    assert_eq!(cpu.pc(), 0x0603);
    assert_eq!(cpu.regs.s, 0xFD);
}

#[test]
fn test_stack_pha_pla() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xA9, 0x42, // LDA #$42
        0xA2, 0xFF, // LDX #$FF
        0x9A, // TXS
        0x48, // PHA
        0xA9, 0x00, // LDA #$00
        0x68, // PLA
    ];
    setup_program(&mut bus, &mut cpu, &program);

    for _ in 0..5 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert!(cpu.regs.p.is_set(flags::Z), "LDA #$00 sets Z");

    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.regs.a, 0x42, "PLA should restore A");
    assert!(!cpu.regs.p.is_set(flags::Z), "PLA recomputes Z");
    assert!(!cpu.regs.p.is_set(flags::N));
    assert_eq!(cpu.regs.s, 0xFF, "SP should be back to $FF after PLA");
}

#[test]
fn test_pla_sets_negative() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$80; PHA; LDA #$01; PLA
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x80, 0x48, 0xA9, 0x01, 0x68]);

    for _ in 0..4 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_stack_php_plp() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0x38, // SEC
        0x08, // PHP
        0x18, // CLC
        0x28, // PLP
    ];
    setup_program(&mut bus, &mut cpu, &program);

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert_eq!(
        bus.peek(0x01FD),
        flags::U | flags::B | flags::C,
        "PHP pushes B and U"
    );
    assert!(!cpu.regs.p.is_set(flags::B), "PHP leaves live P alone");

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    assert!(cpu.regs.p.is_set(flags::C), "PLP should restore carry flag");
    assert_eq!(cpu.regs.s, 0xFD);
}

#[test]
fn test_plp_forces_unused_bit() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$00; PHA; PLP
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x00, 0x48, 0x28]);

    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.p.0, flags::U);
}

#[test]
fn test_stack_pointer_wraps() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$99; PHA
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x99, 0x48]);
    cpu.regs.s = 0x00;

    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(bus.peek(0x0100), 0x99);
    assert_eq!(cpu.regs.s, 0xFF);
}

#[test]
fn test_brk_stack_layout() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // Set up BRK vector to point to $0300
    bus.write(0xFFFE, 0x00);
    bus.write(0xFFFF, 0x03);

    let program = [
        0xA2, 0xFF, // LDX #$FF    @ $0200
        0x9A, // TXS         @ $0202
        0x58, // CLI         @ $0203
        0x00, // BRK         @ $0204
        0xEA, // padding     @ $0205 (skipped)
    ];
    setup_program(&mut bus, &mut cpu, &program);

    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(run_instruction(&mut cpu, &mut bus), 7);

    assert_eq!(cpu.pc(), 0x0300, "PC should be at BRK vector target");
    assert_eq!(cpu.regs.s, 0xFC, "three pushes from $FF");
    assert!(cpu.regs.p.is_set(flags::I), "I flag should be set after BRK");
    assert!(!cpu.regs.p.is_set(flags::B), "B is only set in the pushed copy");

    assert_eq!(bus.peek(0x01FF), 0x02, "return address high");
    assert_eq!(bus.peek(0x01FE), 0x06, "return address skips padding byte");
    assert_eq!(
        bus.peek(0x01FD),
        flags::N | flags::U | flags::B | flags::I,
        "pushed P has B set"
    );
}

#[test]
fn test_brk_rti_round_trip() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.load(0xFFFE, &[0x00, 0x03]);
    bus.write(0x0300, 0x40); // RTI

    setup_program(&mut bus, &mut cpu, &[0x00, 0xEA, 0xA9, 0x01]);

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);

    assert_eq!(cpu.pc(), 0x0202, "RTI returns past the padding byte");
    assert_eq!(cpu.regs.s, 0xFD);
    assert!(!cpu.regs.p.is_set(flags::B), "RTI clears B");
    assert!(!cpu.regs.p.is_set(flags::U), "RTI clears U");
    assert!(cpu.regs.p.is_set(flags::I), "pushed P carried I");
}

#[test]
fn test_adc_all_operands() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    for a in 0..=255u8 {
        for operand in 0..=255u8 {
            for carry in [false, true] {
                setup_program(&mut bus, &mut cpu, &[0x69, operand]);
                cpu.regs.a = a;
                cpu.set_flag(flags::C, carry);

                assert_eq!(run_instruction(&mut cpu, &mut bus), 2);

                let sum = u16::from(a) + u16::from(operand) + u16::from(carry);
                let result = sum as u8;
                let overflow = (a ^ operand) & (a ^ result) & 0x80 != 0;
                assert_eq!(cpu.regs.a, result, "{a:02X}+{operand:02X}+{carry}");
                assert_eq!(cpu.regs.p.is_set(flags::C), sum > 0xFF);
                assert_eq!(cpu.regs.p.is_set(flags::V), overflow);
                assert_eq!(cpu.regs.p.is_set(flags::Z), result == 0);
                assert_eq!(cpu.regs.p.is_set(flags::N), result & 0x80 != 0);
            }
        }
    }
}

#[test]
fn test_adc_overflow_flag() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // CLC; LDA #$00; ADC #$80: operand and result both differ in sign from A
    setup_program(&mut bus, &mut cpu, &[0x18, 0xA9, 0x00, 0x69, 0x80]);
    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0x80);
    assert!(cpu.regs.p.is_set(flags::V));
    assert!(cpu.regs.p.is_set(flags::N));
    assert!(!cpu.regs.p.is_set(flags::C));

    // CLC; LDA #$50; ADC #$50: operand shares A's sign, V stays clear
    setup_program(&mut bus, &mut cpu, &[0x18, 0xA9, 0x50, 0x69, 0x50]);
    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0xA0);
    assert!(!cpu.regs.p.is_set(flags::V));
    assert!(cpu.regs.p.is_set(flags::N));
    assert!(!cpu.regs.p.is_set(flags::C));
}

#[test]
fn test_sbc_borrow_and_overflow() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // SEC; LDA #$05; SBC #$03
    setup_program(&mut bus, &mut cpu, &[0x38, 0xA9, 0x05, 0xE9, 0x03]);
    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0x02);
    assert!(cpu.regs.p.is_set(flags::C), "no borrow");
    assert!(!cpu.regs.p.is_set(flags::V));

    // SEC; LDA #$50; SBC #$70  (adds $8F, result $E0)
    setup_program(&mut bus, &mut cpu, &[0x38, 0xA9, 0x50, 0xE9, 0x70]);
    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0xE0);
    assert!(!cpu.regs.p.is_set(flags::C), "borrow");
    assert!(cpu.regs.p.is_set(flags::V));

    // SEC; LDA #$50; SBC #$B0  (adds $4F, same sign as A)
    setup_program(&mut bus, &mut cpu, &[0x38, 0xA9, 0x50, 0xE9, 0xB0]);
    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0xA0);
    assert!(!cpu.regs.p.is_set(flags::C), "borrow");
    assert!(!cpu.regs.p.is_set(flags::V));
}

#[test]
fn test_sbc_matches_adc_of_complement() {
    let mut sbc_bus = SimpleBus::new();
    let mut adc_bus = SimpleBus::new();
    let mut sbc = Mos6502::new();
    let mut adc = Mos6502::new();

    for a in (0..=255u8).step_by(7) {
        for operand in 0..=255u8 {
            for carry in [false, true] {
                setup_program(&mut sbc_bus, &mut sbc, &[0xE9, operand]);
                setup_program(&mut adc_bus, &mut adc, &[0x69, operand ^ 0xFF]);
                for cpu in [&mut sbc, &mut adc] {
                    cpu.regs.a = a;
                    cpu.set_flag(flags::C, carry);
                }
                run_instruction(&mut sbc, &mut sbc_bus);
                run_instruction(&mut adc, &mut adc_bus);
                assert_eq!(sbc.regs, adc.regs);
            }
        }
    }
}

#[test]
fn test_sbc_alias_eb() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // SEC; LDA #$10; SBC #$01 via $EB
    setup_program(&mut bus, &mut cpu, &[0x38, 0xA9, 0x10, 0xEB, 0x01]);

    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x0F);
    assert_eq!(cpu.pc(), 0x0205);
}

#[test]
fn test_compare_flags() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$40; CMP #$40; CMP #$41; CMP #$3F
    setup_program(
        &mut bus,
        &mut cpu,
        &[0xA9, 0x40, 0xC9, 0x40, 0xC9, 0x41, 0xC9, 0x3F],
    );
    run_instruction(&mut cpu, &mut bus);

    run_instruction(&mut cpu, &mut bus);
    assert!(cpu.regs.p.is_set(flags::Z));
    assert!(cpu.regs.p.is_set(flags::C));

    run_instruction(&mut cpu, &mut bus);
    assert!(!cpu.regs.p.is_set(flags::Z));
    assert!(!cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::N), "$40 - $41 = $FF");

    run_instruction(&mut cpu, &mut bus);
    assert!(cpu.regs.p.is_set(flags::C));
    assert!(!cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_cpx_cpy() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDX #$10; CPX #$20; LDY #$80; CPY #$80
    setup_program(
        &mut bus,
        &mut cpu,
        &[0xA2, 0x10, 0xE0, 0x20, 0xA0, 0x80, 0xC0, 0x80],
    );

    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert!(!cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::N), "$10 - $20 = $F0");

    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert!(cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::Z));
}

#[test]
fn test_shifts_accumulator() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$81; ASL A
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x81, 0x0A]);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.regs.a, 0x02);
    assert!(cpu.regs.p.is_set(flags::C), "bit 7 shifted out");

    // LDA #$01; LSR A
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x01, 0x4A]);
    run_instruction(&mut cpu, &mut bus);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.regs.p.is_set(flags::C), "bit 0 shifted out");
    assert!(cpu.regs.p.is_set(flags::Z));

    // SEC; LDA #$80; ROL A
    setup_program(&mut bus, &mut cpu, &[0x38, 0xA9, 0x80, 0x2A]);
    for _ in 0..3 {
        run_instruction(&mut cpu, &mut bus);
    }
    assert_eq!(cpu.regs.a, 0x01, "carry rotates into bit 0");
    assert!(cpu.regs.p.is_set(flags::C));
}

#[test]
fn test_ror_memory() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // SEC; ROR $10
    setup_program(&mut bus, &mut cpu, &[0x38, 0x66, 0x10]);
    bus.write(0x0010, 0x01);
    cpu.regs.a = 0x33;

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(bus.peek(0x0010), 0x80);
    assert_eq!(cpu.regs.a, 0x33, "memory form leaves A alone");
    assert!(cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_bit_takes_nv_from_operand() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDA #$01; BIT $10
    setup_program(&mut bus, &mut cpu, &[0xA9, 0x01, 0x24, 0x10]);
    bus.write(0x0010, 0xC0);

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert!(cpu.regs.p.is_set(flags::Z));
    assert!(cpu.regs.p.is_set(flags::N));
    assert!(cpu.regs.p.is_set(flags::V));
    assert_eq!(cpu.regs.a, 0x01);
}

#[test]
fn test_inc_dec_wrap() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // INC $10; DEX
    setup_program(&mut bus, &mut cpu, &[0xE6, 0x10, 0xCA]);
    bus.write(0x0010, 0xFF);

    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(bus.peek(0x0010), 0x00);
    assert!(cpu.regs.p.is_set(flags::Z));

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.x, 0xFF);
    assert!(cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_txs_leaves_flags() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    // LDX #$00; TXS; LDX #$01; TSX
    setup_program(&mut bus, &mut cpu, &[0xA2, 0x00, 0x9A, 0xA2, 0x01, 0xBA]);

    run_instruction(&mut cpu, &mut bus);
    assert!(cpu.regs.p.is_set(flags::Z));
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.s, 0x00);
    run_instruction(&mut cpu, &mut bus);
    assert!(!cpu.regs.p.is_set(flags::Z));
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.regs.x, 0x00);
    assert!(cpu.regs.p.is_set(flags::Z), "TSX updates Z");
}

#[test]
fn test_branch_timing() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // Not taken: Z set, BNE
    setup_program(&mut bus, &mut cpu, &[0xD0, 0x10]);
    cpu.regs.p.set(flags::Z);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.pc(), 0x0202);

    // Taken, same page
    setup_program(&mut bus, &mut cpu, &[0xD0, 0x10]);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.pc(), 0x0212);

    // Taken, crossing into the next page
    setup_program_at(&mut bus, &mut cpu, 0x02FD, &[0xD0, 0x05]);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.pc(), 0x0304);

    // Taken backwards across a page
    setup_program_at(&mut bus, &mut cpu, 0x0300, &[0xD0, 0xF0]);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.pc(), 0x02F2);
}

#[test]
fn test_bvc_tests_overflow() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    setup_program(&mut bus, &mut cpu, &[0x50, 0x10]);
    cpu.regs.p.set(flags::V);
    cpu.regs.p.set(flags::Z);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.pc(), 0x0202, "V set: not taken");

    setup_program(&mut bus, &mut cpu, &[0x50, 0x10]);
    cpu.regs.p.set(flags::Z);
    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.pc(), 0x0212, "V clear: taken regardless of Z");
}

#[test]
fn test_countdown_loop_cycles() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    let program = [
        0xA2, 0x0A, // LDX #$0A
        0xCA, // DEX
        0xD0, 0xFD, // BNE -3
    ];
    setup_program(&mut bus, &mut cpu, &program);

    let mut cycles = 0;
    while cpu.pc() != 0x0205 {
        cycles += run_instruction(&mut cpu, &mut bus);
    }

    assert_eq!(cpu.regs.x, 0);
    // LDX + 10 DEX + 9 taken branches + 1 fall-through
    assert_eq!(cycles, 2 + 10 * 2 + 9 * 3 + 2);
    assert_eq!(cpu.total_cycles(), u64::from(cycles));
}

#[test]
fn test_page_cross_penalty_on_reads() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // LDA $12F0,X without crossing
    setup_program(&mut bus, &mut cpu, &[0xBD, 0xF0, 0x12]);
    cpu.regs.x = 0x01;
    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);

    // LDA $12FF,X crossing into $1300
    setup_program(&mut bus, &mut cpu, &[0xBD, 0xFF, 0x12]);
    bus.write(0x1300, 0x77);
    cpu.regs.x = 0x01;
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.regs.a, 0x77);

    // LDA ($40),Y crossing
    setup_program(&mut bus, &mut cpu, &[0xB1, 0x40]);
    bus.load(0x0040, &[0xFF, 0x20]);
    cpu.regs.y = 0x02;
    assert_eq!(run_instruction(&mut cpu, &mut bus), 6);

    // ORA $20FF,Y crossing
    setup_program(&mut bus, &mut cpu, &[0x19, 0xFF, 0x20]);
    cpu.regs.y = 0x01;
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
}

#[test]
fn test_no_penalty_on_writes_and_rmw() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // STA $12FF,X: fixed 5 cycles
    setup_program(&mut bus, &mut cpu, &[0x9D, 0xFF, 0x12]);
    cpu.regs.x = 0x01;
    cpu.regs.a = 0xAB;
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(bus.peek(0x1300), 0xAB);

    // ASL $12FF,X: fixed 7 cycles
    setup_program(&mut bus, &mut cpu, &[0x1E, 0xFF, 0x12]);
    cpu.regs.x = 0x01;
    assert_eq!(run_instruction(&mut cpu, &mut bus), 7);
    assert_eq!(bus.peek(0x1300), 0x56);
}

#[test]
fn test_illegal_opcode_is_nop() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    setup_program(&mut bus, &mut cpu, &[0x02]);
    let before = cpu.regs;

    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.pc(), 0x0201);
    assert_eq!(cpu.regs.a, before.a);
    assert_eq!(cpu.regs.p, before.p);
}

#[test]
fn test_illegal_nop_operand_lengths() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();

    // NOP $10 (zero page)
    setup_program(&mut bus, &mut cpu, &[0x04, 0x10]);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 3);
    assert_eq!(cpu.pc(), 0x0202);

    // NOP #$10
    setup_program(&mut bus, &mut cpu, &[0x80, 0x10]);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 2);
    assert_eq!(cpu.pc(), 0x0202);

    // NOP $1234
    setup_program(&mut bus, &mut cpu, &[0x0C, 0x34, 0x12]);
    assert_eq!(run_instruction(&mut cpu, &mut bus), 4);
    assert_eq!(cpu.pc(), 0x0203);

    // NOP $12FF,X pays the page-cross cycle
    setup_program(&mut bus, &mut cpu, &[0x1C, 0xFF, 0x12]);
    cpu.regs.x = 0x01;
    assert_eq!(run_instruction(&mut cpu, &mut bus), 5);
    assert_eq!(cpu.pc(), 0x0203);
}

#[test]
fn test_irq_then_rti_resumes() {
    let mut bus = SimpleBus::new();
    let mut cpu = Mos6502::new();
    bus.load(0xFFFE, &[0x00, 0x03]);
    bus.write(0x0300, 0x40); // RTI
    setup_program(&mut bus, &mut cpu, &[0xEA, 0xEA]);

    run_instruction(&mut cpu, &mut bus);
    assert!(cpu.irq(&mut bus));
    assert_eq!(run_instruction(&mut cpu, &mut bus), 7, "interrupt sequence");
    assert_eq!(cpu.pc(), 0x0300);

    run_instruction(&mut cpu, &mut bus);
    assert_eq!(cpu.pc(), 0x0201);
    assert_eq!(cpu.regs.s, 0xFD);
}
