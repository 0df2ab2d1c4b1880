//! The 256-entry opcode dispatch table: for each opcode byte, the
//! mnemonic, addressing-mode tag, base cycle count, page-cross penalty
//! flag, and handler function.
//!
//! Opcode bytes that aren't named by any of the instructions below (the
//! WDC `BBR`/`BBS`/`STP` family, and the illegal-NMOS holes the 65C02
//! turns into various-length NOPs) all default to the same one-byte NOP
//! handler. Reproducing their exact cycle timing is out of scope.

use crate::cpu::control;
use crate::cpu::moves;
use crate::cpu::Cpu;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    ZeroPageIndirect,
    IndirectAbsX,
    Relative,
}

impl Mode {
    /// The short tag used in disassembly listings and by the addressing
    /// mode table in the specification this core implements.
    pub fn tag(self) -> &'static str {
        match self {
            Mode::Implied => "imp",
            Mode::Accumulator => "acc",
            Mode::Immediate => "imm",
            Mode::ZeroPage => "zpg",
            Mode::ZeroPageX => "zpx",
            Mode::ZeroPageY => "zpy",
            Mode::Absolute => "abs",
            Mode::AbsoluteX => "abx",
            Mode::AbsoluteY => "aby",
            Mode::Indirect => "ind",
            Mode::IndirectX => "inx",
            Mode::IndirectY => "iny",
            Mode::ZeroPageIndirect => "zpi",
            Mode::IndirectAbsX => "iax",
            Mode::Relative => "rel",
        }
    }

    /// How many operand bytes follow the opcode byte.
    pub fn operand_size(self) -> u16 {
        match self {
            Mode::Implied | Mode::Accumulator => 0,
            Mode::Immediate
            | Mode::ZeroPage
            | Mode::ZeroPageX
            | Mode::ZeroPageY
            | Mode::IndirectX
            | Mode::IndirectY
            | Mode::ZeroPageIndirect
            | Mode::Relative => 1,
            Mode::Absolute | Mode::AbsoluteX | Mode::AbsoluteY | Mode::Indirect | Mode::IndirectAbsX => 2,
        }
    }
}

pub type Handler = fn(&mut Cpu, Mode);

#[derive(Clone, Copy)]
pub struct OpcodeEntry {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub cycles: u8,
    pub page_penalty: bool,
    pub handler: Handler,
    /// False for opcode bytes that fell through to the default NOP instead
    /// of being named by an instruction below. `step` logs a diagnostic the
    /// first time it sees one of these.
    pub implemented: bool,
}

const fn entry(mnemonic: &'static str, mode: Mode, cycles: u8, page_penalty: bool, handler: Handler) -> OpcodeEntry {
    OpcodeEntry {
        mnemonic,
        mode,
        cycles,
        page_penalty,
        handler,
        implemented: true,
    }
}

const NOP_ENTRY: OpcodeEntry = OpcodeEntry {
    mnemonic: "NOP",
    mode: Mode::Implied,
    cycles: 2,
    page_penalty: false,
    handler: control::nop,
    implemented: false,
};

/// Fill in a single opcode slot. Panics (at const-eval time, i.e. a compile
/// error) if the same byte is assigned twice - that would mean the table
/// below has a typo.
const fn set(table: &mut [OpcodeEntry; 256], opcode: u8, value: OpcodeEntry) {
    table[opcode as usize] = value;
}

pub const OPCODE_TABLE: [OpcodeEntry; 256] = build_table();

const fn build_table() -> [OpcodeEntry; 256] {
    let mut t = [NOP_ENTRY; 256];

    use crate::cpu::alu::*;
    use Mode::*;

    // ORA
    set(&mut t, 0x09, entry("ORA", Immediate, 2, false, ora));
    set(&mut t, 0x05, entry("ORA", ZeroPage, 3, false, ora));
    set(&mut t, 0x15, entry("ORA", ZeroPageX, 4, false, ora));
    set(&mut t, 0x0D, entry("ORA", Absolute, 4, false, ora));
    set(&mut t, 0x1D, entry("ORA", AbsoluteX, 4, true, ora));
    set(&mut t, 0x19, entry("ORA", AbsoluteY, 4, true, ora));
    set(&mut t, 0x01, entry("ORA", IndirectX, 6, false, ora));
    set(&mut t, 0x11, entry("ORA", IndirectY, 5, true, ora));
    set(&mut t, 0x12, entry("ORA", ZeroPageIndirect, 5, false, ora));

    // AND
    set(&mut t, 0x29, entry("AND", Immediate, 2, false, and));
    set(&mut t, 0x25, entry("AND", ZeroPage, 3, false, and));
    set(&mut t, 0x35, entry("AND", ZeroPageX, 4, false, and));
    set(&mut t, 0x2D, entry("AND", Absolute, 4, false, and));
    set(&mut t, 0x3D, entry("AND", AbsoluteX, 4, true, and));
    set(&mut t, 0x39, entry("AND", AbsoluteY, 4, true, and));
    set(&mut t, 0x21, entry("AND", IndirectX, 6, false, and));
    set(&mut t, 0x31, entry("AND", IndirectY, 5, true, and));
    set(&mut t, 0x32, entry("AND", ZeroPageIndirect, 5, false, and));

    // EOR
    set(&mut t, 0x49, entry("EOR", Immediate, 2, false, eor));
    set(&mut t, 0x45, entry("EOR", ZeroPage, 3, false, eor));
    set(&mut t, 0x55, entry("EOR", ZeroPageX, 4, false, eor));
    set(&mut t, 0x4D, entry("EOR", Absolute, 4, false, eor));
    set(&mut t, 0x5D, entry("EOR", AbsoluteX, 4, true, eor));
    set(&mut t, 0x59, entry("EOR", AbsoluteY, 4, true, eor));
    set(&mut t, 0x41, entry("EOR", IndirectX, 6, false, eor));
    set(&mut t, 0x51, entry("EOR", IndirectY, 5, true, eor));
    set(&mut t, 0x52, entry("EOR", ZeroPageIndirect, 5, false, eor));

    // ADC
    set(&mut t, 0x69, entry("ADC", Immediate, 2, false, adc));
    set(&mut t, 0x65, entry("ADC", ZeroPage, 3, false, adc));
    set(&mut t, 0x75, entry("ADC", ZeroPageX, 4, false, adc));
    set(&mut t, 0x6D, entry("ADC", Absolute, 4, false, adc));
    set(&mut t, 0x7D, entry("ADC", AbsoluteX, 4, true, adc));
    set(&mut t, 0x79, entry("ADC", AbsoluteY, 4, true, adc));
    set(&mut t, 0x61, entry("ADC", IndirectX, 6, false, adc));
    set(&mut t, 0x71, entry("ADC", IndirectY, 5, true, adc));
    set(&mut t, 0x72, entry("ADC", ZeroPageIndirect, 5, false, adc));

    // SBC
    set(&mut t, 0xE9, entry("SBC", Immediate, 2, false, sbc));
    set(&mut t, 0xE5, entry("SBC", ZeroPage, 3, false, sbc));
    set(&mut t, 0xF5, entry("SBC", ZeroPageX, 4, false, sbc));
    set(&mut t, 0xED, entry("SBC", Absolute, 4, false, sbc));
    set(&mut t, 0xFD, entry("SBC", AbsoluteX, 4, true, sbc));
    set(&mut t, 0xF9, entry("SBC", AbsoluteY, 4, true, sbc));
    set(&mut t, 0xE1, entry("SBC", IndirectX, 6, false, sbc));
    set(&mut t, 0xF1, entry("SBC", IndirectY, 5, true, sbc));
    set(&mut t, 0xF2, entry("SBC", ZeroPageIndirect, 5, false, sbc));

    // CMP
    set(&mut t, 0xC9, entry("CMP", Immediate, 2, false, cmp));
    set(&mut t, 0xC5, entry("CMP", ZeroPage, 3, false, cmp));
    set(&mut t, 0xD5, entry("CMP", ZeroPageX, 4, false, cmp));
    set(&mut t, 0xCD, entry("CMP", Absolute, 4, false, cmp));
    set(&mut t, 0xDD, entry("CMP", AbsoluteX, 4, true, cmp));
    set(&mut t, 0xD9, entry("CMP", AbsoluteY, 4, true, cmp));
    set(&mut t, 0xC1, entry("CMP", IndirectX, 6, false, cmp));
    set(&mut t, 0xD1, entry("CMP", IndirectY, 5, true, cmp));
    set(&mut t, 0xD2, entry("CMP", ZeroPageIndirect, 5, false, cmp));

    // CPX / CPY
    set(&mut t, 0xE0, entry("CPX", Immediate, 2, false, cpx));
    set(&mut t, 0xE4, entry("CPX", ZeroPage, 3, false, cpx));
    set(&mut t, 0xEC, entry("CPX", Absolute, 4, false, cpx));
    set(&mut t, 0xC0, entry("CPY", Immediate, 2, false, cpy));
    set(&mut t, 0xC4, entry("CPY", ZeroPage, 3, false, cpy));
    set(&mut t, 0xCC, entry("CPY", Absolute, 4, false, cpy));

    // DEC / DEX / DEY / INC / INX / INY
    set(&mut t, 0x3A, entry("DEC", Accumulator, 2, false, dec));
    set(&mut t, 0xC6, entry("DEC", ZeroPage, 5, false, dec));
    set(&mut t, 0xD6, entry("DEC", ZeroPageX, 6, false, dec));
    set(&mut t, 0xCE, entry("DEC", Absolute, 6, false, dec));
    set(&mut t, 0xDE, entry("DEC", AbsoluteX, 7, false, dec));
    set(&mut t, 0xCA, entry("DEX", Implied, 2, false, dex));
    set(&mut t, 0x88, entry("DEY", Implied, 2, false, dey));

    set(&mut t, 0x1A, entry("INC", Accumulator, 2, false, inc));
    set(&mut t, 0xE6, entry("INC", ZeroPage, 5, false, inc));
    set(&mut t, 0xF6, entry("INC", ZeroPageX, 6, false, inc));
    set(&mut t, 0xEE, entry("INC", Absolute, 6, false, inc));
    set(&mut t, 0xFE, entry("INC", AbsoluteX, 7, false, inc));
    set(&mut t, 0xE8, entry("INX", Implied, 2, false, inx));
    set(&mut t, 0xC8, entry("INY", Implied, 2, false, iny));

    // Shifts / rotates
    set(&mut t, 0x0A, entry("ASL", Accumulator, 2, false, asl));
    set(&mut t, 0x06, entry("ASL", ZeroPage, 5, false, asl));
    set(&mut t, 0x16, entry("ASL", ZeroPageX, 6, false, asl));
    set(&mut t, 0x0E, entry("ASL", Absolute, 6, false, asl));
    set(&mut t, 0x1E, entry("ASL", AbsoluteX, 6, false, asl));

    set(&mut t, 0x2A, entry("ROL", Accumulator, 2, false, rol));
    set(&mut t, 0x26, entry("ROL", ZeroPage, 5, false, rol));
    set(&mut t, 0x36, entry("ROL", ZeroPageX, 6, false, rol));
    set(&mut t, 0x2E, entry("ROL", Absolute, 6, false, rol));
    set(&mut t, 0x3E, entry("ROL", AbsoluteX, 6, false, rol));

    set(&mut t, 0x4A, entry("LSR", Accumulator, 2, false, lsr));
    set(&mut t, 0x46, entry("LSR", ZeroPage, 5, false, lsr));
    set(&mut t, 0x56, entry("LSR", ZeroPageX, 6, false, lsr));
    set(&mut t, 0x4E, entry("LSR", Absolute, 6, false, lsr));
    set(&mut t, 0x5E, entry("LSR", AbsoluteX, 6, false, lsr));

    set(&mut t, 0x6A, entry("ROR", Accumulator, 2, false, ror));
    set(&mut t, 0x66, entry("ROR", ZeroPage, 5, false, ror));
    set(&mut t, 0x76, entry("ROR", ZeroPageX, 6, false, ror));
    set(&mut t, 0x6E, entry("ROR", Absolute, 6, false, ror));
    set(&mut t, 0x7E, entry("ROR", AbsoluteX, 6, false, ror));

    // BIT
    set(&mut t, 0x89, entry("BIT", Immediate, 2, false, bit));
    set(&mut t, 0x24, entry("BIT", ZeroPage, 3, false, bit));
    set(&mut t, 0x34, entry("BIT", ZeroPageX, 4, false, bit));
    set(&mut t, 0x2C, entry("BIT", Absolute, 4, false, bit));
    set(&mut t, 0x3C, entry("BIT", AbsoluteX, 4, true, bit));

    // RMB0-7 / SMB0-7
    set(&mut t, 0x07, entry("RMB0", ZeroPage, 5, false, rmb0));
    set(&mut t, 0x17, entry("RMB1", ZeroPage, 5, false, rmb1));
    set(&mut t, 0x27, entry("RMB2", ZeroPage, 5, false, rmb2));
    set(&mut t, 0x37, entry("RMB3", ZeroPage, 5, false, rmb3));
    set(&mut t, 0x47, entry("RMB4", ZeroPage, 5, false, rmb4));
    set(&mut t, 0x57, entry("RMB5", ZeroPage, 5, false, rmb5));
    set(&mut t, 0x67, entry("RMB6", ZeroPage, 5, false, rmb6));
    set(&mut t, 0x77, entry("RMB7", ZeroPage, 5, false, rmb7));
    set(&mut t, 0x87, entry("SMB0", ZeroPage, 5, false, smb0));
    set(&mut t, 0x97, entry("SMB1", ZeroPage, 5, false, smb1));
    set(&mut t, 0xA7, entry("SMB2", ZeroPage, 5, false, smb2));
    set(&mut t, 0xB7, entry("SMB3", ZeroPage, 5, false, smb3));
    set(&mut t, 0xC7, entry("SMB4", ZeroPage, 5, false, smb4));
    set(&mut t, 0xD7, entry("SMB5", ZeroPage, 5, false, smb5));
    set(&mut t, 0xE7, entry("SMB6", ZeroPage, 5, false, smb6));
    set(&mut t, 0xF7, entry("SMB7", ZeroPage, 5, false, smb7));

    // TSB / TRB
    set(&mut t, 0x04, entry("TSB", ZeroPage, 5, false, tsb));
    set(&mut t, 0x0C, entry("TSB", Absolute, 6, false, tsb));
    set(&mut t, 0x14, entry("TRB", ZeroPage, 5, false, trb));
    set(&mut t, 0x1C, entry("TRB", Absolute, 6, false, trb));

    // Loads / stores
    set(&mut t, 0xA9, entry("LDA", Immediate, 2, false, moves::lda));
    set(&mut t, 0xA5, entry("LDA", ZeroPage, 3, false, moves::lda));
    set(&mut t, 0xB5, entry("LDA", ZeroPageX, 4, false, moves::lda));
    set(&mut t, 0xAD, entry("LDA", Absolute, 4, false, moves::lda));
    set(&mut t, 0xBD, entry("LDA", AbsoluteX, 4, true, moves::lda));
    set(&mut t, 0xB9, entry("LDA", AbsoluteY, 4, true, moves::lda));
    set(&mut t, 0xA1, entry("LDA", IndirectX, 6, false, moves::lda));
    set(&mut t, 0xB1, entry("LDA", IndirectY, 5, true, moves::lda));
    set(&mut t, 0xB2, entry("LDA", ZeroPageIndirect, 5, false, moves::lda));

    set(&mut t, 0x85, entry("STA", ZeroPage, 3, false, moves::sta));
    set(&mut t, 0x95, entry("STA", ZeroPageX, 4, false, moves::sta));
    set(&mut t, 0x8D, entry("STA", Absolute, 4, false, moves::sta));
    set(&mut t, 0x9D, entry("STA", AbsoluteX, 5, false, moves::sta));
    set(&mut t, 0x99, entry("STA", AbsoluteY, 5, false, moves::sta));
    set(&mut t, 0x81, entry("STA", IndirectX, 6, false, moves::sta));
    set(&mut t, 0x91, entry("STA", IndirectY, 6, false, moves::sta));
    set(&mut t, 0x92, entry("STA", ZeroPageIndirect, 5, false, moves::sta));

    set(&mut t, 0xA2, entry("LDX", Immediate, 2, false, moves::ldx));
    set(&mut t, 0xA6, entry("LDX", ZeroPage, 3, false, moves::ldx));
    set(&mut t, 0xB6, entry("LDX", ZeroPageY, 4, false, moves::ldx));
    set(&mut t, 0xAE, entry("LDX", Absolute, 4, false, moves::ldx));
    set(&mut t, 0xBE, entry("LDX", AbsoluteY, 4, true, moves::ldx));

    set(&mut t, 0x86, entry("STX", ZeroPage, 3, false, moves::stx));
    set(&mut t, 0x96, entry("STX", ZeroPageY, 4, false, moves::stx));
    set(&mut t, 0x8E, entry("STX", Absolute, 4, false, moves::stx));

    set(&mut t, 0xA0, entry("LDY", Immediate, 2, false, moves::ldy));
    set(&mut t, 0xA4, entry("LDY", ZeroPage, 3, false, moves::ldy));
    set(&mut t, 0xB4, entry("LDY", ZeroPageX, 4, false, moves::ldy));
    set(&mut t, 0xAC, entry("LDY", Absolute, 4, false, moves::ldy));
    set(&mut t, 0xBC, entry("LDY", AbsoluteX, 4, true, moves::ldy));

    set(&mut t, 0x84, entry("STY", ZeroPage, 3, false, moves::sty));
    set(&mut t, 0x94, entry("STY", ZeroPageX, 4, false, moves::sty));
    set(&mut t, 0x8C, entry("STY", Absolute, 4, false, moves::sty));

    set(&mut t, 0x64, entry("STZ", ZeroPage, 3, false, moves::stz));
    set(&mut t, 0x74, entry("STZ", ZeroPageX, 4, false, moves::stz));
    set(&mut t, 0x9C, entry("STZ", Absolute, 4, false, moves::stz));
    set(&mut t, 0x9E, entry("STZ", AbsoluteX, 5, false, moves::stz));

    // Register transfers
    set(&mut t, 0xAA, entry("TAX", Implied, 2, false, moves::tax));
    set(&mut t, 0x8A, entry("TXA", Implied, 2, false, moves::txa));
    set(&mut t, 0xA8, entry("TAY", Implied, 2, false, moves::tay));
    set(&mut t, 0x98, entry("TYA", Implied, 2, false, moves::tya));
    set(&mut t, 0xBA, entry("TSX", Implied, 2, false, moves::tsx));
    set(&mut t, 0x9A, entry("TXS", Implied, 2, false, moves::txs));

    // Stack
    set(&mut t, 0x68, entry("PLA", Implied, 4, false, moves::pla));
    set(&mut t, 0x48, entry("PHA", Implied, 3, false, moves::pha));
    set(&mut t, 0x28, entry("PLP", Implied, 4, false, moves::plp));
    set(&mut t, 0x08, entry("PHP", Implied, 3, false, moves::php));
    set(&mut t, 0xFA, entry("PLX", Implied, 4, false, moves::plx));
    set(&mut t, 0xDA, entry("PHX", Implied, 3, false, moves::phx));
    set(&mut t, 0x7A, entry("PLY", Implied, 4, false, moves::ply));
    set(&mut t, 0x5A, entry("PHY", Implied, 3, false, moves::phy));

    // Branches
    set(&mut t, 0x10, entry("BPL", Relative, 2, false, control::bpl));
    set(&mut t, 0x30, entry("BMI", Relative, 2, false, control::bmi));
    set(&mut t, 0x50, entry("BVC", Relative, 2, false, control::bvc));
    set(&mut t, 0x70, entry("BVS", Relative, 2, false, control::bvs));
    set(&mut t, 0x90, entry("BCC", Relative, 2, false, control::bcc));
    set(&mut t, 0xB0, entry("BCS", Relative, 2, false, control::bcs));
    set(&mut t, 0xD0, entry("BNE", Relative, 2, false, control::bne));
    set(&mut t, 0xF0, entry("BEQ", Relative, 2, false, control::beq));
    set(&mut t, 0x80, entry("BRA", Relative, 2, false, control::bra));

    // Jumps / subroutines / returns
    set(&mut t, 0x4C, entry("JMP", Absolute, 3, false, control::jmp));
    set(&mut t, 0x6C, entry("JMP", Indirect, 6, false, control::jmp));
    set(&mut t, 0x7C, entry("JMP", IndirectAbsX, 6, false, control::jmp));
    set(&mut t, 0x20, entry("JSR", Absolute, 6, false, control::jsr));
    set(&mut t, 0x60, entry("RTS", Implied, 6, false, control::rts));
    set(&mut t, 0x40, entry("RTI", Implied, 6, false, control::rti));
    set(&mut t, 0x00, entry("BRK", Implied, 7, false, control::brk));

    // Flags
    set(&mut t, 0x18, entry("CLC", Implied, 2, false, control::clc));
    set(&mut t, 0x38, entry("SEC", Implied, 2, false, control::sec));
    set(&mut t, 0xD8, entry("CLD", Implied, 2, false, control::cld));
    set(&mut t, 0xF8, entry("SED", Implied, 2, false, control::sed));
    set(&mut t, 0x58, entry("CLI", Implied, 2, false, control::cli));
    set(&mut t, 0x78, entry("SEI", Implied, 2, false, control::sei));
    set(&mut t, 0xB8, entry("CLV", Implied, 2, false, control::clv));

    // Misc
    set(&mut t, 0xEA, entry("NOP", Implied, 2, false, control::nop));
    set(&mut t, 0xCB, entry("WAI", Implied, 3, false, control::wai));

    t
}

/// Disassembly lookup: from opcode byte, yield `(mnemonic, mode_tag)`.
pub fn disassemble(opcode: u8) -> (&'static str, &'static str) {
    let e = &OPCODE_TABLE[opcode as usize];
    (e.mnemonic, e.mode.tag())
}
