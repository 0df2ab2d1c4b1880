//! Handlers that move bytes around without computing anything new: loads,
//! stores, register transfers, and the stack push/pull opcodes.

use super::{Cpu, StatusFlag};
use crate::opcodes::Mode;

pub fn lda(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.a = operand;
    cpu.update_nz(cpu.a);
}

pub fn sta(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.get_operand_address(mode);
    cpu.memory.write(address, cpu.a);
}

pub fn ldx(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.x = operand;
    cpu.update_nz(cpu.x);
}

pub fn stx(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.get_operand_address(mode);
    cpu.memory.write(address, cpu.x);
}

pub fn ldy(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.y = operand;
    cpu.update_nz(cpu.y);
}

pub fn sty(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.get_operand_address(mode);
    cpu.memory.write(address, cpu.y);
}

/// Store zero. Unlike `STA`/`STX`/`STY` it never reads the register it's
/// named after at all.
pub fn stz(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.get_operand_address(mode);
    cpu.memory.write(address, 0);
}

pub fn tax(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.a;
    cpu.update_nz(cpu.x);
}

pub fn txa(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.x;
    cpu.update_nz(cpu.a);
}

pub fn tay(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.a;
    cpu.update_nz(cpu.y);
}

pub fn tya(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.y;
    cpu.update_nz(cpu.a);
}

pub fn tsx(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.sp;
    cpu.update_nz(cpu.x);
}

/// `TXS` is the one transfer that leaves the flags alone: the stack
/// pointer isn't a value a program inspects the sign or zero-ness of.
pub fn txs(cpu: &mut Cpu, _mode: Mode) {
    cpu.sp = cpu.x;
}

pub fn pla(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.pop_u8();
    cpu.update_nz(cpu.a);
}

pub fn pha(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_u8(cpu.a);
}

/// The two status bits with no flag meaning of their own (`Break`,
/// `Unused`) always read back as set after a `PLP`.
pub fn plp(cpu: &mut Cpu, _mode: Mode) {
    let value = cpu.pop_u8();
    cpu.p = value | StatusFlag::Break as u8 | StatusFlag::Unused as u8;
}

pub fn php(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_u8(cpu.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8);
}

pub fn plx(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.pop_u8();
    cpu.update_nz(cpu.x);
}

pub fn phx(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_u8(cpu.x);
}

pub fn ply(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.pop_u8();
    cpu.update_nz(cpu.y);
}

pub fn phy(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_u8(cpu.y);
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
    fn stz_writes_zero_regardless_of_accumulator() {
        let mut cpu = cpu_with(&[0x64, 0x10]); // STZ $10
        cpu.a = 0xFF;
        cpu.memory.write(0x10, 0xAB);
        cpu.step();
        assert_eq!(cpu.memory.read(0x10), 0x00);
    }

    #[test]
    fn txs_does_not_touch_status_flags() {
        let mut cpu = cpu_with(&[0x9A]); // TXS
        cpu.x = 0x00;
        cpu.set_flag(StatusFlag::Zero, false);
        cpu.step();
        assert_eq!(cpu.sp, 0x00);
        assert!(!cpu.get_flag(StatusFlag::Zero));
    }

    #[test]
    fn plp_forces_break_and_unused_bits_set() {
        let mut cpu = cpu_with(&[0x28]); // PLP
        cpu.push_u8(0x00);
        cpu.step();
        assert_eq!(cpu.p & (StatusFlag::Break as u8 | StatusFlag::Unused as u8), 0x30);
    }

    #[test]
    fn pha_then_pla_round_trips_accumulator() {
        let mut cpu = cpu_with(&[0x48, 0xA9, 0x00, 0x68]); // PHA; LDA #0; PLA
        cpu.a = 0x55;
        cpu.step();
        cpu.step();
        assert_eq!(cpu.a, 0x00);
        cpu.step();
        assert_eq!(cpu.a, 0x55);
        assert!(!cpu.get_flag(StatusFlag::Zero));
    }
}
