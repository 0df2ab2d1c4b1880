//! Handlers that redirect control flow or touch flags directly: branches,
//! jumps, subroutine call/return, the interrupt-adjacent opcodes (`BRK`,
//! `RTI`, `WAI`), and the flag set/clear instructions.

use super::{Cpu, StatusFlag};
use crate::constants::InterruptVector;
use crate::opcodes::Mode;

/// Shared by every conditional branch: always consumes the displacement
/// byte, only moves `pc` and charges the extra cycle(s) when `taken`.
fn branch(cpu: &mut Cpu, taken: bool) {
    let offset = cpu.branch_displacement();
    if taken {
        let from = cpu.pc;
        let to = from.wrapping_add(offset as u16);
        cpu.incur_branch_penalty(from, to);
        cpu.pc = to;
    }
}

pub fn bpl(cpu: &mut Cpu, _mode: Mode) {
    let taken = !cpu.get_flag(StatusFlag::Negative);
    branch(cpu, taken);
}

pub fn bmi(cpu: &mut Cpu, _mode: Mode) {
    let taken = cpu.get_flag(StatusFlag::Negative);
    branch(cpu, taken);
}

pub fn bvc(cpu: &mut Cpu, _mode: Mode) {
    let taken = !cpu.get_flag(StatusFlag::Overflow);
    branch(cpu, taken);
}

pub fn bvs(cpu: &mut Cpu, _mode: Mode) {
    let taken = cpu.get_flag(StatusFlag::Overflow);
    branch(cpu, taken);
}

pub fn bcc(cpu: &mut Cpu, _mode: Mode) {
    let taken = !cpu.get_flag(StatusFlag::Carry);
    branch(cpu, taken);
}

pub fn bcs(cpu: &mut Cpu, _mode: Mode) {
    let taken = cpu.get_flag(StatusFlag::Carry);
    branch(cpu, taken);
}

pub fn bne(cpu: &mut Cpu, _mode: Mode) {
    let taken = !cpu.get_flag(StatusFlag::Zero);
    branch(cpu, taken);
}

pub fn beq(cpu: &mut Cpu, _mode: Mode) {
    let taken = cpu.get_flag(StatusFlag::Zero);
    branch(cpu, taken);
}

/// Unconditional relative branch. Shares the same extra-cycle accounting
/// as the conditional branches since it's always "taken".
pub fn bra(cpu: &mut Cpu, _mode: Mode) {
    branch(cpu, true);
}

pub fn jmp(cpu: &mut Cpu, mode: Mode) {
    cpu.pc = cpu.get_operand_address(mode);
}

pub fn jsr(cpu: &mut Cpu, mode: Mode) {
    let target = cpu.get_operand_address(mode);
    let return_addr = cpu.pc.wrapping_sub(1);
    cpu.push_u16(return_addr);
    cpu.pc = target;
}

pub fn rts(cpu: &mut Cpu, _mode: Mode) {
    let return_addr = cpu.pop_u16();
    cpu.pc = return_addr.wrapping_add(1);
}

pub fn rti(cpu: &mut Cpu, _mode: Mode) {
    let p = cpu.pop_u8();
    cpu.p = p | StatusFlag::Unused as u8;
    cpu.pc = cpu.pop_u16();
}

/// Software interrupt. 65C02-specific: also clears `Decimal`, which NMOS
/// 6502's `BRK` leaves alone.
pub fn brk(cpu: &mut Cpu, _mode: Mode) {
    let return_addr = cpu.pc.wrapping_add(1);
    cpu.push_u16(return_addr);
    cpu.set_flag(StatusFlag::Break, true);
    cpu.push_u8(cpu.p | StatusFlag::Unused as u8);
    cpu.set_flag(StatusFlag::InterruptDisable, true);
    cpu.set_flag(StatusFlag::Decimal, false);
    cpu.pc = cpu.memory.read_word(InterruptVector::IrqOrBrk.address());
}

pub fn clc(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_flag(StatusFlag::Carry, false);
}

pub fn sec(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_flag(StatusFlag::Carry, true);
}

pub fn cld(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_flag(StatusFlag::Decimal, false);
}

pub fn sed(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_flag(StatusFlag::Decimal, true);
}

pub fn cli(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_flag(StatusFlag::InterruptDisable, false);
}

pub fn sei(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_flag(StatusFlag::InterruptDisable, true);
}

pub fn clv(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_flag(StatusFlag::Overflow, false);
}

pub fn nop(_cpu: &mut Cpu, _mode: Mode) {}

/// Parks the core until the next interrupt. `step` special-cases `waiting`
/// so this doesn't need to block anything itself.
pub fn wai(cpu: &mut Cpu, _mode: Mode) {
    cpu.waiting = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory;

    fn cpu_with(program: &[u8]) -> Cpu {
        let mut image = [0u8; memory::SIZE];
        image[..program.len()].copy_from_slice(program);
        Cpu::new(Some(image), Some(0x0000))
    }

    #[test]
    fn beq_not_taken_costs_base_cycles_only() {
        let mut cpu = cpu_with(&[0xF0, 0x10]); // BEQ +16
        cpu.set_flag(StatusFlag::Zero, false);
        let cycles = cpu.step();
        assert_eq!(cycles, 2);
        assert_eq!(cpu.pc, 2);
    }

    #[test]
    fn beq_taken_same_page_costs_one_extra_cycle() {
        let mut cpu = cpu_with(&[0xF0, 0x10]); // BEQ +16
        cpu.set_flag(StatusFlag::Zero, true);
        let cycles = cpu.step();
        assert_eq!(cycles, 3);
        assert_eq!(cpu.pc, 0x0012);
    }

    #[test]
    fn beq_taken_crossing_page_costs_two_extra_cycles() {
        let mut image = [0u8; memory::SIZE];
        image[0x00F0] = 0xF0; // BEQ
        image[0x00F1] = 0x20; // +32, target 0x0112 crosses from page 0
        let mut cpu = Cpu::new(Some(image), Some(0x00F0));
        cpu.set_flag(StatusFlag::Zero, true);
        let cycles = cpu.step();
        assert_eq!(cycles, 4);
        assert_eq!(cpu.pc, 0x0112);
    }

    #[test]
    fn bra_is_always_taken() {
        let mut cpu = cpu_with(&[0x80, 0x05]); // BRA +5
        let cycles = cpu.step();
        assert_eq!(cpu.pc, 0x0007);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn negative_displacement_branches_backward() {
        let mut cpu = cpu_with(&[0x00, 0x00, 0xF0, 0xFC]); // (pad pad) BEQ -4
        cpu.pc = 0x0002;
        cpu.set_flag(StatusFlag::Zero, true);
        cpu.step();
        assert_eq!(cpu.pc, 0x0000);
    }

    #[test]
    fn jsr_then_rts_round_trips_pc() {
        let mut cpu = cpu_with(&[0x20, 0x05, 0x00, 0xEA, 0xEA, 0x60]); // JSR $0005; NOP; NOP; RTS
        cpu.step(); // JSR
        assert_eq!(cpu.pc, 0x0005);
        cpu.step(); // RTS
        assert_eq!(cpu.pc, 0x0003);
    }

    #[test]
    fn brk_pushes_return_and_clears_decimal() {
        let mut image = [0u8; memory::SIZE];
        image[0x0000] = 0x00; // BRK
        image[0xFFFE] = 0x00;
        image[0xFFFF] = 0x90;
        let mut cpu = Cpu::new(Some(image), Some(0x0000));
        cpu.set_flag(StatusFlag::Decimal, true);
        cpu.step();
        assert_eq!(cpu.pc, 0x9000);
        assert!(!cpu.get_flag(StatusFlag::Decimal));
        assert!(cpu.get_flag(StatusFlag::InterruptDisable));
        let pushed_p = cpu.pop_u8();
        assert_eq!(pushed_p & (StatusFlag::Break as u8 | StatusFlag::Unused as u8), 0x30);
        assert_eq!(cpu.pop_u16(), 0x0002);
    }

    #[test]
    fn rti_restores_pc_and_status_without_break() {
        let mut cpu = cpu_with(&[0x40]); // RTI
        cpu.push_u16(0x1234);
        cpu.push_u8(0x00);
        cpu.step();
        assert_eq!(cpu.pc, 0x1234);
        assert_eq!(cpu.p & StatusFlag::Break as u8, 0);
        assert_eq!(cpu.p & StatusFlag::Unused as u8, StatusFlag::Unused as u8);
    }

    #[test]
    fn wai_parks_the_core_until_cleared() {
        let mut cpu = cpu_with(&[0xCB, 0xEA]); // WAI; NOP
        cpu.step();
        assert!(cpu.waiting);
        let cycles = cpu.step();
        assert_eq!(cycles, 1);
        assert_eq!(cpu.pc, 1); // still parked at the NOP, didn't fetch it
    }
}
