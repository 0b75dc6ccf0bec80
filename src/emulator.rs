use std::path::Path;

use log::{debug, info, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    decode::OpCodes,
    display::FrameBuffer,
    error::EmulatorError,
    keyboard::Keypad,
    memory::{Memory, TypeAddr, FONT_BASE},
    registers::{Registers, FLAG},
    timer::Timer,
};

const MAX_SPRITE_HEIGHT: usize = 15;

/// The whole machine. `step` is the only thing that advances it; the host
/// reads the framebuffer and writes the keypad in between.
pub struct Emulator<R: Rng = StdRng> {
    fb: FrameBuffer,
    regs: Registers,
    mem: Memory,
    delay_timer: Timer,
    sound_timer: Timer,
    keypad: Keypad,
    current_instruction: u16,
    rng: R,
}

impl Emulator<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Emulator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Emulator<R> {
    /// Builds a freshly reset machine drawing `Cxkk` bytes from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self {
            fb: FrameBuffer::new(),
            regs: Registers::new(),
            mem: Memory::new(),
            delay_timer: Timer::default(),
            sound_timer: Timer::default(),
            keypad: Keypad::new(),
            current_instruction: 0,
            rng,
        }
    }

    /// Zeroes every field, reloads the font and points pc at 0x200. The
    /// random source keeps its state.
    pub fn reset(&mut self) {
        self.fb.clear_buffer();
        self.regs = Registers::new();
        self.mem = Memory::new();
        self.delay_timer = Timer::default();
        self.sound_timer = Timer::default();
        self.keypad.release_all();
        self.current_instruction = 0;
        info!("machine reset");
    }

    /// Copies `rom` to 0x200. Nothing else is touched, so call `reset` first
    /// when switching programs.
    pub fn load_program(&mut self, rom: &[u8]) -> Result<(), EmulatorError> {
        self.mem.load_rom(rom)
    }

    pub fn load_program_file(&mut self, path: impl AsRef<Path>) -> Result<(), EmulatorError> {
        self.mem.load_rom_by_file(path)
    }

    /// One fetch-decode-execute cycle followed by a timer tick.
    ///
    /// A stack fault is returned before the timers move; pc has already
    /// stepped past the faulting instruction.
    pub fn step(&mut self) -> Result<(), EmulatorError> {
        let operation = self.fetch_decode();
        self.execute_ins(operation)?;
        self.sync_timers();
        Ok(())
    }

    pub fn fetch_decode(&mut self) -> OpCodes {
        let addr = self.mem.pc.0;
        let ins = self.mem.next_instruction();
        self.current_instruction = ins;
        let operation = OpCodes::decode_raw(ins);
        trace!("{addr:#05x}: {ins:04x} {operation:?}");
        operation
    }

    pub fn execute_ins(&mut self, ins: OpCodes) -> Result<(), EmulatorError> {
        match ins {
            OpCodes::ClearScreen => {
                self.fb.clear_buffer();
            }
            OpCodes::PopSubroutine => {
                let addr = self.mem.stack.pop().ok_or(EmulatorError::StackUnderflow {
                    pc: self.instruction_addr(),
                })?;
                self.mem.set_pc(addr);
            }
            OpCodes::Jump(addr) => {
                self.mem.set_pc(addr);
            }
            OpCodes::PushSubroutine(addr) => {
                // return address is the instruction after the call
                self.mem
                    .stack
                    .push(self.mem.pc.0)
                    .ok_or(EmulatorError::StackOverflow {
                        pc: self.instruction_addr(),
                    })?;
                self.mem.set_pc(addr);
            }
            OpCodes::SkipEqualConstant(vx, nn) => {
                if self.regs.get(vx) == nn {
                    self.mem.pc.increment();
                }
            }
            OpCodes::SkipNotEqualConstant(vx, nn) => {
                if self.regs.get(vx) != nn {
                    self.mem.pc.increment();
                }
            }
            OpCodes::SkipEqualRegister(vx, vy) => {
                if self.regs.get(vx) == self.regs.get(vy) {
                    self.mem.pc.increment();
                }
            }
            OpCodes::SkipNotEqualRegister(vx, vy) => {
                if self.regs.get(vx) != self.regs.get(vy) {
                    self.mem.pc.increment();
                }
            }
            OpCodes::SetRegister(vx, nn) => {
                self.regs.set_register(vx, nn);
            }
            OpCodes::AddToRegister(vx, nn) => {
                self.regs.add_to_register(vx, nn);
            }
            OpCodes::CopyRegister(vx, vy) => {
                self.regs.set_register(vx, self.regs.get(vy));
            }
            OpCodes::Or(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) | self.regs.get(vy));
            }
            OpCodes::And(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) & self.regs.get(vy));
            }
            OpCodes::XOr(vx, vy) => {
                self.regs
                    .set_register(vx, self.regs.get(vx) ^ self.regs.get(vy));
            }
            // flag is written before the result, so with VF as destination
            // the result is what survives
            OpCodes::Add(vx, vy) => {
                let (sum, carry) = self.regs.get(vx).overflowing_add(self.regs.get(vy));
                self.regs.set_flag(carry);
                self.regs.set_register(vx, sum);
            }
            OpCodes::SubtractForward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_flag(x > y); // no borrow
                self.regs.set_register(vx, x.wrapping_sub(y));
            }
            OpCodes::SubtractBackward(vx, vy) => {
                let (x, y) = (self.regs.get(vx), self.regs.get(vy));
                self.regs.set_flag(y > x); // no borrow
                self.regs.set_register(vx, y.wrapping_sub(x));
            }
            OpCodes::RightShift(vx, _) => {
                let vx_value = self.regs.get(vx);
                self.regs.set_register(FLAG, vx_value & 1);
                self.regs.set_register(vx, vx_value >> 1);
            }
            OpCodes::LeftShift(vx, _) => {
                let vx_value = self.regs.get(vx);
                self.regs.set_register(FLAG, (vx_value >> 7) & 1);
                self.regs.set_register(vx, vx_value << 1);
            }
            OpCodes::SetIndexRegister(addr) => self.mem.set_index(addr),
            OpCodes::JumpWithOffset(addr) => {
                self.mem.set_pc(addr + self.regs.get(0) as u16);
            }
            OpCodes::Random(vx, nn) => {
                let ransuu: u8 = self.rng.gen();
                self.regs.set_register(vx, nn & ransuu);
            }
            OpCodes::Display(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                self.regs.set_flag(false);

                let height = (height as usize).min(MAX_SPRITE_HEIGHT);
                let mut sprite = [0u8; MAX_SPRITE_HEIGHT];
                for (row, byte) in sprite[..height].iter_mut().enumerate() {
                    *byte = self.mem.get_indexed(row as u16); // 8 pixels wide
                }

                let collided = self.fb.paint(x, y, &sprite[..height]);
                self.regs.set_flag(collided);
            }
            OpCodes::SkipIfPressed(vx) => {
                if self.keypad.is_pressed(self.regs.get(vx)) {
                    self.mem.pc.increment();
                }
            }
            OpCodes::SkipIfNotPressed(vx) => {
                if !self.keypad.is_pressed(self.regs.get(vx)) {
                    self.mem.pc.increment();
                }
            }
            OpCodes::CopyDelayToRegister(vx) => self.regs.set_register(vx, self.delay_timer.count),
            OpCodes::GetKey(vx) => match self.keypad.first_pressed() {
                Some(key) => self.regs.set_register(vx, key),
                // run this instruction again next step
                None => self.mem.pc.decrement(),
            },
            OpCodes::CopyRegisterToDelay(vx) => self.delay_timer.set(self.regs.get(vx)),
            OpCodes::CopyRegisterToSound(vx) => self.sound_timer.set(self.regs.get(vx)),
            OpCodes::AddToIndex(vx) => {
                self.mem.index.add(self.regs.get(vx));
            }
            OpCodes::PointChar(vx) => {
                let char = self.regs.get(vx) as u16;
                self.mem.set_index(FONT_BASE + char * 5);
            }
            OpCodes::ToDecimal(vx) => {
                let value = self.regs.get(vx);
                self.mem.set_indexed(0, value / 100);
                self.mem.set_indexed(1, value / 10 % 10);
                self.mem.set_indexed(2, value % 10);
            }
            OpCodes::StoreRegisterToMemory(vx) => {
                for reg in 0..=vx {
                    self.mem.set_indexed(reg as u16, self.regs.get(reg));
                }
            }
            OpCodes::LoadRegisterFromMemory(vx) => {
                for reg in 0..=vx {
                    let reg_val = self.mem.get_indexed(reg as u16);
                    self.regs.set_register(reg, reg_val);
                }
            }
            OpCodes::Unimplemented => {
                debug!(
                    "ignoring unknown opcode {:04x} at {:#05x}",
                    self.current_instruction,
                    self.instruction_addr()
                );
            }
        }
        Ok(())
    }

    pub fn sync_timers(&mut self) {
        self.delay_timer.tick();
        if self.sound_timer.tick() && !self.sound_timer.is_active() {
            trace!("sound timer expired");
        }
    }

    // address the current instruction was fetched from
    fn instruction_addr(&self) -> TypeAddr {
        self.mem.pc.0.wrapping_sub(2)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.fb
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn registers(&self) -> &Registers {
        &self.regs
    }

    pub fn memory(&self) -> &[u8] {
        self.mem.bytes()
    }

    pub fn pc(&self) -> TypeAddr {
        self.mem.pc.0
    }

    pub fn index(&self) -> TypeAddr {
        self.mem.index.0
    }

    pub fn stack_depth(&self) -> usize {
        self.mem.stack.depth()
    }

    pub fn current_instruction(&self) -> u16 {
        self.current_instruction
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.count
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.count
    }

    /// Whether a tone should be playing right now.
    pub fn sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }
}
