//! A pseudo-CPU that shares `Memory` and prints mnemonics instead of
//! executing. Same fetch/decode shape as [`crate::Intel8080`], no side
//! effects on CPU state. Grounded on `original_source/disassembler.hpp`'s
//! `Disassembler8080`, which plays the identical role around the original
//! `Emulator8080`.

use crate::error::EmulatorError;
use crate::memory::Memory;

fn reg_name(code: u8) -> &'static str {
    match code & 0x7 {
        0 => "B",
        1 => "C",
        2 => "D",
        3 => "E",
        4 => "H",
        5 => "L",
        6 => "M",
        _ => "A",
    }
}

fn rp_name(rp: u8) -> &'static str {
    match rp & 0x3 {
        0 => "B",
        1 => "D",
        2 => "H",
        _ => "SP",
    }
}

fn cond_name(cond: u8) -> &'static str {
    match cond & 0x7 {
        0 => "NZ",
        1 => "Z",
        2 => "NC",
        3 => "C",
        4 => "PO",
        5 => "PE",
        6 => "P",
        _ => "M",
    }
}

fn alu_name(group: u8) -> &'static str {
    match group & 0x7 {
        0 => "ADD",
        1 => "ADC",
        2 => "SUB",
        3 => "SBB",
        4 => "ANA",
        5 => "XRA",
        6 => "ORA",
        _ => "CMP",
    }
}

/// Decodes one instruction at `pc`, returning its mnemonic text and length
/// in bytes (1-3). Does not touch `pc` itself — callers advance their own.
fn decode_at(pc: u16, mem: &Memory) -> Result<(String, u8), EmulatorError> {
    let opcode = mem.read(pc)?;
    let imm8 = || mem.read(pc.wrapping_add(1));
    let imm16 = || -> Result<u16, EmulatorError> {
        let lo = mem.read(pc.wrapping_add(1))?;
        let hi = mem.read(pc.wrapping_add(2))?;
        Ok((hi as u16) << 8 | lo as u16)
    };

    let (text, len) = match opcode {
        0x00 => ("NOP".to_string(), 1),
        0x08 | 0x10 | 0x18 | 0x20 | 0x28 | 0x30 | 0x38 | 0xCB | 0xD9 | 0xDD | 0xED | 0xFD => {
            return Err(EmulatorError::UnimplementedInstruction(pc, opcode));
        }
        0x01 | 0x11 | 0x21 | 0x31 => {
            (format!("LXI {},${:04X}", rp_name(opcode >> 4), imm16()?), 3)
        }
        0x02 | 0x12 => (format!("STAX {}", rp_name(opcode >> 4)), 1),
        0x03 | 0x13 | 0x23 | 0x33 => (format!("INX {}", rp_name(opcode >> 4)), 1),
        0x09 | 0x19 | 0x29 | 0x39 => (format!("DAD {}", rp_name(opcode >> 4)), 1),
        0x0A | 0x1A => (format!("LDAX {}", rp_name(opcode >> 4)), 1),
        0x0B | 0x1B | 0x2B | 0x3B => (format!("DCX {}", rp_name(opcode >> 4)), 1),
        0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
            (format!("INR {}", reg_name(opcode >> 3)), 1)
        }
        0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
            (format!("DCR {}", reg_name(opcode >> 3)), 1)
        }
        0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
            (format!("MVI {},${:02X}", reg_name(opcode >> 3), imm8()?), 2)
        }
        0x07 => ("RLC".to_string(), 1),
        0x0F => ("RRC".to_string(), 1),
        0x17 => ("RAL".to_string(), 1),
        0x1F => ("RAR".to_string(), 1),
        0x22 => (format!("SHLD ${:04X}", imm16()?), 3),
        0x27 => ("DAA".to_string(), 1),
        0x2A => (format!("LHLD ${:04X}", imm16()?), 3),
        0x2F => ("CMA".to_string(), 1),
        0x32 => (format!("STA ${:04X}", imm16()?), 3),
        0x37 => ("STC".to_string(), 1),
        0x3A => (format!("LDA ${:04X}", imm16()?), 3),
        0x3F => ("CMC".to_string(), 1),
        0x76 => ("HLT".to_string(), 1),
        0x40..=0x7F => (
            format!("MOV {},{}", reg_name(opcode >> 3), reg_name(opcode)),
            1,
        ),
        0x80..=0xBF => (format!("{} {}", alu_name(opcode >> 3), reg_name(opcode)), 1),
        0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
            (format!("R{}", cond_name(opcode >> 3)), 1)
        }
        0xC1 | 0xD1 | 0xE1 => (format!("POP {}", rp_name(opcode >> 4)), 1),
        0xF1 => ("POP PSW".to_string(), 1),
        0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => (
            format!("J{} ${:04X}", cond_name(opcode >> 3), imm16()?),
            3,
        ),
        0xC3 => (format!("JMP ${:04X}", imm16()?), 3),
        0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => (
            format!("C{} ${:04X}", cond_name(opcode >> 3), imm16()?),
            3,
        ),
        0xC5 | 0xD5 | 0xE5 => (format!("PUSH {}", rp_name(opcode >> 4)), 1),
        0xF5 => ("PUSH PSW".to_string(), 1),
        0xC6 => (format!("ADI ${:02X}", imm8()?), 2),
        0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF => {
            (format!("RST {}", (opcode >> 3) & 0x7), 1)
        }
        0xC9 => ("RET".to_string(), 1),
        0xCD => (format!("CALL ${:04X}", imm16()?), 3),
        0xCE => (format!("ACI ${:02X}", imm8()?), 2),
        0xD3 => (format!("OUT ${:02X}", imm8()?), 2),
        0xD6 => (format!("SUI ${:02X}", imm8()?), 2),
        0xDB => (format!("IN ${:02X}", imm8()?), 2),
        0xDE => (format!("SBI ${:02X}", imm8()?), 2),
        0xE3 => ("XTHL".to_string(), 1),
        0xE6 => (format!("ANI ${:02X}", imm8()?), 2),
        0xE9 => ("PCHL".to_string(), 1),
        0xEB => ("XCHG".to_string(), 1),
        0xEE => (format!("XRI ${:02X}", imm8()?), 2),
        0xF3 => ("DI".to_string(), 1),
        0xF6 => (format!("ORI ${:02X}", imm8()?), 2),
        0xF9 => ("SPHL".to_string(), 1),
        0xFB => ("EI".to_string(), 1),
        0xFE => (format!("CPI ${:02X}", imm8()?), 2),
    };

    Ok((text, len))
}

/// A disassembling pseudo-CPU: a bare PC over shared `Memory`.
pub struct Disassembler {
    pc: u16,
}

impl Default for Disassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Disassembler {
    pub fn new() -> Self {
        Self { pc: 0 }
    }

    pub fn reset(&mut self, addr: u16) {
        self.pc = addr;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Decode the instruction at the current PC, advance past it, and
    /// return `(address_of_instruction, mnemonic)`.
    pub fn step(&mut self, mem: &Memory) -> Result<(u16, String), EmulatorError> {
        let addr = self.pc;
        let (text, len) = decode_at(addr, mem)?;
        self.pc = self.pc.wrapping_add(len as u16);
        Ok((addr, text))
    }
}
