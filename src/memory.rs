use std::{fs, path::Path};

use log::info;

use crate::{
    error::EmulatorError,
    registers::{IndexRegister, ProgramCounter},
};

pub type TypeAddr = u16; // in reality u12
type FontBytes = [u8; 5 * 16];

pub const MEMORY_SIZE: usize = 4096;
pub const FONT_BASE: TypeAddr = 0x050;
pub const PROGRAM_START: TypeAddr = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;
pub const STACK_DEPTH: usize = 16;

const ADDR_MASK: TypeAddr = 0x0FFF;

pub const DEFAULT_FONT: FontBytes = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// 4K of byte-addressable RAM plus the address registers that point into it.
///
/// Every access goes through a 12-bit mask, so `index + offset` arithmetic
/// that runs past 0xFFF wraps back to the start instead of leaving the array.
#[derive(Debug, Clone)]
pub struct Memory {
    // 000 -> 04F is empty by convention, font data lives at 050 -> 09F
    bytes: [u8; MEMORY_SIZE],
    pub pc: ProgramCounter,
    pub index: IndexRegister,
    pub stack: Stack,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        let mut mem = Self {
            bytes: [0; MEMORY_SIZE],
            pc: ProgramCounter(PROGRAM_START),
            index: IndexRegister(0x0),
            stack: Stack::new(),
        };
        mem.load_font();
        mem
    }

    pub fn set(&mut self, addr: TypeAddr, val: u8) {
        self.bytes[(addr & ADDR_MASK) as usize] = val;
    }

    pub fn get(&self, addr: TypeAddr) -> u8 {
        self.bytes[(addr & ADDR_MASK) as usize]
    }

    /// Byte at `index + offset`, wrapping at the end of RAM.
    pub fn get_indexed(&self, offset: u16) -> u8 {
        self.get(self.index.0.wrapping_add(offset))
    }

    pub fn set_indexed(&mut self, offset: u16, val: u8) {
        self.set(self.index.0.wrapping_add(offset), val);
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads the big-endian word at pc and moves pc past it.
    pub fn next_instruction(&mut self) -> u16 {
        let (l, r) = (self.get(self.pc.0), self.get(self.pc.0.wrapping_add(1)));
        self.pc.increment();
        ((l as u16) << 8) | r as u16
    }

    pub fn set_pc(&mut self, addr: TypeAddr) {
        self.pc.set_addr(addr);
    }

    pub fn set_index(&mut self, addr: TypeAddr) {
        self.index.set_addr(addr);
    }

    fn load_font(&mut self) {
        let start_index = FONT_BASE as usize;
        self.bytes[start_index..start_index + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);
    }

    /// Copies program bytes to 0x200. Oversized programs are rejected and
    /// leave memory as it was.
    pub fn load_rom(&mut self, bytes: &[u8]) -> Result<(), EmulatorError> {
        if bytes.len() > MAX_ROM_SIZE {
            return Err(EmulatorError::RomTooLarge {
                size: bytes.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start_index = PROGRAM_START as usize;
        self.bytes[start_index..start_index + bytes.len()].copy_from_slice(bytes);
        info!("loaded {} byte program at {:#05x}", bytes.len(), PROGRAM_START);
        Ok(())
    }

    pub fn load_rom_by_file(&mut self, path: impl AsRef<Path>) -> Result<(), EmulatorError> {
        let path = path.as_ref();
        let program = fs::read(path).map_err(|source| EmulatorError::RomRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_rom(&program)
    }
}

/// Fixed 16-slot return stack; `sp` is the next free slot.
#[derive(Debug, Clone, Default)]
pub struct Stack {
    addresses: [TypeAddr; STACK_DEPTH],
    sp: u8,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, addr: TypeAddr) -> Option<()> {
        let slot = self.addresses.get_mut(self.sp as usize)?;
        *slot = addr;
        self.sp += 1;
        Some(())
    }

    pub fn pop(&mut self) -> Option<TypeAddr> {
        self.sp = self.sp.checked_sub(1)?;
        Some(self.addresses[self.sp as usize])
    }

    pub fn depth(&self) -> usize {
        self.sp as usize
    }
}
