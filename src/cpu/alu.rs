//! Handlers for opcodes whose job is to compute something: the logical and
//! arithmetic group, shifts and rotates, compares, increments, and the
//! 65C02 bit-test instructions (`BIT`, `TSB`, `TRB`, `RMBn`/`SMBn`).

use super::decimal;
use super::{Cpu, StatusFlag};
use crate::opcodes::Mode;

pub fn ora(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.a |= operand;
    cpu.update_nz(cpu.a);
}

pub fn and(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.a &= operand;
    cpu.update_nz(cpu.a);
}

pub fn eor(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.a ^= operand;
    cpu.update_nz(cpu.a);
}

pub fn adc(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    let carry_in = cpu.get_flag(StatusFlag::Carry);
    let r = if cpu.get_flag(StatusFlag::Decimal) {
        decimal::adc_decimal(cpu.a, operand, carry_in)
    } else {
        decimal::adc_binary(cpu.a, operand, carry_in)
    };
    apply_alu_result(cpu, r);
}

pub fn sbc(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    let carry_in = cpu.get_flag(StatusFlag::Carry);
    let r = if cpu.get_flag(StatusFlag::Decimal) {
        decimal::sbc_decimal(cpu.a, operand, carry_in)
    } else {
        decimal::sbc_binary(cpu.a, operand, carry_in)
    };
    apply_alu_result(cpu, r);
}

fn apply_alu_result(cpu: &mut Cpu, r: decimal::AluResult) {
    cpu.set_flag(StatusFlag::Carry, r.carry);
    cpu.set_flag(StatusFlag::Overflow, r.overflow);
    cpu.set_flag(StatusFlag::Zero, r.zero);
    cpu.set_flag(StatusFlag::Negative, r.negative);
    cpu.a = r.result;
}

fn compare(cpu: &mut Cpu, register: u8, operand: u8) {
    cpu.set_flag(StatusFlag::Carry, register >= operand);
    cpu.set_flag(StatusFlag::Zero, register == operand);
    let diff = register.wrapping_sub(operand);
    cpu.set_flag(StatusFlag::Negative, diff & 0x80 != 0);
}

pub fn cmp(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    let a = cpu.a;
    compare(cpu, a, operand);
}

pub fn cpx(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    let x = cpu.x;
    compare(cpu, x, operand);
}

pub fn cpy(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    let y = cpu.y;
    compare(cpu, y, operand);
}

pub fn dec(cpu: &mut Cpu, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = operand.wrapping_sub(1);
    cpu.update_nz(result);
    cpu.write_back(address, result);
}

pub fn inc(cpu: &mut Cpu, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let result = operand.wrapping_add(1);
    cpu.update_nz(result);
    cpu.write_back(address, result);
}

pub fn dex(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_nz(cpu.x);
}

pub fn dey(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_nz(cpu.y);
}

pub fn inx(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_nz(cpu.x);
}

pub fn iny(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_nz(cpu.y);
}

pub fn asl(cpu: &mut Cpu, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    cpu.set_flag(StatusFlag::Carry, operand & 0x80 != 0);
    let result = operand << 1;
    cpu.update_nz(result);
    cpu.write_back(address, result);
}

pub fn rol(cpu: &mut Cpu, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let carry_in = cpu.carry_bit();
    cpu.set_flag(StatusFlag::Carry, operand & 0x80 != 0);
    let result = (operand << 1) | carry_in;
    cpu.update_nz(result);
    cpu.write_back(address, result);
}

/// Unlike the other shifts, `N` is unconditionally cleared: the vacated top
/// bit is always 0.
pub fn lsr(cpu: &mut Cpu, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    cpu.set_flag(StatusFlag::Carry, operand & 0x01 != 0);
    let result = operand >> 1;
    cpu.set_flag(StatusFlag::Zero, result == 0);
    cpu.set_flag(StatusFlag::Negative, false);
    cpu.write_back(address, result);
}

pub fn ror(cpu: &mut Cpu, mode: Mode) {
    let (address, operand) = cpu.get_operand(mode);
    let carry_in = cpu.carry_bit();
    cpu.set_flag(StatusFlag::Carry, operand & 0x01 != 0);
    let result = (operand >> 1) | (carry_in << 7);
    cpu.update_nz(result);
    cpu.write_back(address, result);
}

/// `BIT #imm` only touches `Z`; the memory/absolute-indexed forms also
/// copy the operand's bits 7 and 6 into `N` and `V`.
pub fn bit(cpu: &mut Cpu, mode: Mode) {
    let (_, operand) = cpu.get_operand(mode);
    cpu.set_flag(StatusFlag::Zero, cpu.a & operand == 0);
    if mode != Mode::Immediate {
        cpu.set_flag(StatusFlag::Negative, operand & 0x80 != 0);
        cpu.set_flag(StatusFlag::Overflow, operand & 0x40 != 0);
    }
}

pub fn tsb(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.get_operand_address(mode);
    let m = cpu.memory.read(address);
    cpu.set_flag(StatusFlag::Zero, cpu.a & m == 0);
    cpu.memory.write(address, m | cpu.a);
}

pub fn trb(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.get_operand_address(mode);
    let m = cpu.memory.read(address);
    cpu.set_flag(StatusFlag::Zero, cpu.a & m == 0);
    cpu.memory.write(address, m & !cpu.a);
}

fn reset_bit(cpu: &mut Cpu, mode: Mode, bit: u8) {
    let address = cpu.get_operand_address(mode);
    let value = cpu.memory.read(address);
    cpu.memory.write(address, value & !(1 << bit));
}

fn set_bit(cpu: &mut Cpu, mode: Mode, bit: u8) {
    let address = cpu.get_operand_address(mode);
    let value = cpu.memory.read(address);
    cpu.memory.write(address, value | (1 << bit));
}

macro_rules! bit_test_fn {
    ($name:ident, $helper:ident, $bit:expr) => {
        pub fn $name(cpu: &mut Cpu, mode: Mode) {
            $helper(cpu, mode, $bit);
        }
    };
}

bit_test_fn!(rmb0, reset_bit, 0);
bit_test_fn!(rmb1, reset_bit, 1);
bit_test_fn!(rmb2, reset_bit, 2);
bit_test_fn!(rmb3, reset_bit, 3);
bit_test_fn!(rmb4, reset_bit, 4);
bit_test_fn!(rmb5, reset_bit, 5);
bit_test_fn!(rmb6, reset_bit, 6);
bit_test_fn!(rmb7, reset_bit, 7);

bit_test_fn!(smb0, set_bit, 0);
bit_test_fn!(smb1, set_bit, 1);
bit_test_fn!(smb2, set_bit, 2);
bit_test_fn!(smb3, set_bit, 3);
bit_test_fn!(smb4, set_bit, 4);
bit_test_fn!(smb5, set_bit, 5);
bit_test_fn!(smb6, set_bit, 6);
bit_test_fn!(smb7, set_bit, 7);

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
    fn adc_binary_sets_carry_and_clears_overflow() {
        let mut cpu = cpu_with(&[0x69, 0x01]); // ADC #$01
        cpu.a = 0xFF;
        cpu.step();
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_flag(StatusFlag::Carry));
        assert!(cpu.get_flag(StatusFlag::Zero));
        assert!(!cpu.get_flag(StatusFlag::Overflow));
    }

    #[test]
    fn adc_decimal_mode_produces_bcd_result() {
        let mut cpu = cpu_with(&[0xF8, 0x69, 0x01]); // SED; ADC #$01
        cpu.a = 0x09;
        cpu.step();
        cpu.step();
        assert_eq!(cpu.a, 0x10);
    }

    #[test]
    fn lsr_always_clears_negative() {
        let mut cpu = cpu_with(&[0x4A]); // LSR A
        cpu.a = 0x01;
        cpu.step();
        assert_eq!(cpu.a, 0x00);
        assert!(!cpu.get_flag(StatusFlag::Negative));
        assert!(cpu.get_flag(StatusFlag::Carry));
    }

    #[test]
    fn bit_immediate_only_touches_zero_flag() {
        let mut cpu = cpu_with(&[0x89, 0xC0]); // BIT #$C0
        cpu.a = 0x00;
        cpu.set_flag(StatusFlag::Negative, false);
        cpu.set_flag(StatusFlag::Overflow, false);
        cpu.step();
        assert!(cpu.get_flag(StatusFlag::Zero));
        assert!(!cpu.get_flag(StatusFlag::Negative));
        assert!(!cpu.get_flag(StatusFlag::Overflow));
    }

    #[test]
    fn bit_absolute_copies_bits_six_and_seven_into_flags() {
        let mut cpu = cpu_with(&[0x2C, 0x00, 0x10]); // BIT $1000
        cpu.memory.write(0x1000, 0xC0);
        cpu.a = 0xFF;
        cpu.step();
        assert!(!cpu.get_flag(StatusFlag::Zero));
        assert!(cpu.get_flag(StatusFlag::Negative));
        assert!(cpu.get_flag(StatusFlag::Overflow));
    }

    #[test]
    fn rmb_clears_a_single_bit_in_memory() {
        let mut cpu = cpu_with(&[0x77, 0x10]); // RMB7 $10
        cpu.memory.write(0x10, 0xFF);
        cpu.step();
        assert_eq!(cpu.memory.read(0x10), 0x7F);
    }

    #[test]
    fn smb_sets_a_single_bit_in_memory() {
        let mut cpu = cpu_with(&[0x87, 0x10]); // SMB0 $10
        cpu.memory.write(0x10, 0x00);
        cpu.step();
        assert_eq!(cpu.memory.read(0x10), 0x01);
    }

    #[test]
    fn tsb_ors_accumulator_into_memory_and_sets_zero_from_and() {
        let mut cpu = cpu_with(&[0x04, 0x10]); // TSB $10
        cpu.memory.write(0x10, 0x0F);
        cpu.a = 0xF0;
        cpu.step();
        assert_eq!(cpu.memory.read(0x10), 0xFF);
        assert!(cpu.get_flag(StatusFlag::Zero));
    }

    #[test]
    fn trb_clears_accumulator_bits_from_memory() {
        let mut cpu = cpu_with(&[0x14, 0x10]); // TRB $10
        cpu.memory.write(0x10, 0xFF);
        cpu.a = 0x0F;
        cpu.step();
        assert_eq!(cpu.memory.read(0x10), 0xF0);
        assert!(!cpu.get_flag(StatusFlag::Zero));
    }

    #[test]
    fn dec_accumulator_mode_wraps_from_zero() {
        let mut cpu = cpu_with(&[0x3A]); // DEC A
        cpu.a = 0x00;
        cpu.step();
        assert_eq!(cpu.a, 0xFF);
        assert!(cpu.get_flag(StatusFlag::Negative));
    }
}
