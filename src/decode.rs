use crate::memory::TypeAddr;

/// A fetched instruction word with its operand fields pulled out by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction(u16);

impl RawInstruction {
    pub fn new(code: u16) -> Self {
        RawInstruction(code)
    }

    // n is starting digit (1-based, from the left), m is length
    pub fn nth_m_digits(&self, n: u8, m: u8) -> u16 {
        // 0110 1100 1111 0001
        // -------------------
        // 1111 1111 1111 1111
        //      1111 1111 1111
        //           1111 1111
        //                1111
        let shift_places = (4 - m - (n - 1)) * 4;
        let mask: u16 = (1 << (m * 4)) - 1;
        (self.0 >> shift_places) & mask
    }

    pub fn family(&self) -> u8 {
        self.nth_m_digits(1, 1) as u8
    }

    pub fn x(&self) -> u8 {
        self.nth_m_digits(2, 1) as u8
    }

    pub fn y(&self) -> u8 {
        self.nth_m_digits(3, 1) as u8
    }

    pub fn n(&self) -> u8 {
        self.nth_m_digits(4, 1) as u8
    }

    pub fn kk(&self) -> u8 {
        self.nth_m_digits(3, 2) as u8
    }

    pub fn nnn(&self) -> TypeAddr {
        self.nth_m_digits(2, 3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCodes {
    // 00E0
    // turn all pixels off
    ClearScreen,
    // 00EE
    PopSubroutine,
    // 1NNN
    // set PC to address NNN, "jump" to memory location
    Jump(TypeAddr),
    // 2NNN
    PushSubroutine(TypeAddr),

    // 3XNN
    SkipEqualConstant(u8, u8),
    // 4XNN
    SkipNotEqualConstant(u8, u8),
    // 5XY0
    SkipEqualRegister(u8, u8),
    // 9XY0
    SkipNotEqualRegister(u8, u8),

    // 6XNN
    SetRegister(u8, u8),
    // 7XNN
    // add NN to VX, no carry
    AddToRegister(u8, u8),

    // 8XY0
    CopyRegister(u8, u8),
    // 8XY1
    Or(u8, u8),
    // 8XY2
    And(u8, u8),
    // 8XY3
    XOr(u8, u8),
    // 8XY4
    Add(u8, u8),
    // 8XY5
    SubtractForward(u8, u8),
    // 8XY6
    RightShift(u8, u8),
    // 8XY7
    SubtractBackward(u8, u8),
    // 8XYE
    LeftShift(u8, u8),

    // ANNN
    SetIndexRegister(TypeAddr),
    // BNNN
    JumpWithOffset(TypeAddr),
    // CXNN
    Random(u8, u8),
    // DXYN
    // draw an N pixel tall sprite from I at (VX, VY), VF set on collision
    Display(u8, u8, u8),

    // EX9E
    SkipIfPressed(u8),
    // EXA1
    SkipIfNotPressed(u8),

    // FX07
    CopyDelayToRegister(u8),
    // FX0A
    GetKey(u8),
    // FX15
    CopyRegisterToDelay(u8),
    // FX18
    CopyRegisterToSound(u8),
    // FX1E
    AddToIndex(u8),
    // FX29
    PointChar(u8),
    // FX33
    ToDecimal(u8),
    // FX55
    StoreRegisterToMemory(u8),
    // FX65
    LoadRegisterFromMemory(u8),

    Unimplemented,
}

impl OpCodes {
    pub fn decode_raw(ins: u16) -> Self {
        let raw = RawInstruction::new(ins);
        let (x, y, kk, nnn) = (raw.x(), raw.y(), raw.kk(), raw.nnn());

        // only 0, 8, E and F look past the top nibble
        match (raw.family(), raw.n()) {
            (0x0, _) => match nnn {
                0x0E0 => Self::ClearScreen,
                0x0EE => Self::PopSubroutine,
                _ => Self::Unimplemented,
            },
            (0x1, _) => Self::Jump(nnn),
            (0x2, _) => Self::PushSubroutine(nnn),
            (0x3, _) => Self::SkipEqualConstant(x, kk),
            (0x4, _) => Self::SkipNotEqualConstant(x, kk),
            (0x5, _) => Self::SkipEqualRegister(x, y),
            (0x6, _) => Self::SetRegister(x, kk),
            (0x7, _) => Self::AddToRegister(x, kk),
            (0x8, 0x0) => Self::CopyRegister(x, y),
            (0x8, 0x1) => Self::Or(x, y),
            (0x8, 0x2) => Self::And(x, y),
            (0x8, 0x3) => Self::XOr(x, y),
            (0x8, 0x4) => Self::Add(x, y),
            (0x8, 0x5) => Self::SubtractForward(x, y),
            (0x8, 0x6) => Self::RightShift(x, y),
            (0x8, 0x7) => Self::SubtractBackward(x, y),
            (0x8, 0xE) => Self::LeftShift(x, y),
            (0x9, _) => Self::SkipNotEqualRegister(x, y),
            (0xA, _) => Self::SetIndexRegister(nnn),
            (0xB, _) => Self::JumpWithOffset(nnn),
            (0xC, _) => Self::Random(x, kk),
            (0xD, n) => Self::Display(x, y, n),
            (0xE, _) => match kk {
                0x9E => Self::SkipIfPressed(x),
                0xA1 => Self::SkipIfNotPressed(x),
                _ => Self::Unimplemented,
            },
            (0xF, _) => match kk {
                0x07 => Self::CopyDelayToRegister(x),
                0x0A => Self::GetKey(x),
                0x15 => Self::CopyRegisterToDelay(x),
                0x18 => Self::CopyRegisterToSound(x),
                0x1E => Self::AddToIndex(x),
                0x29 => Self::PointChar(x),
                0x33 => Self::ToDecimal(x),
                0x55 => Self::StoreRegisterToMemory(x),
                0x65 => Self::LoadRegisterFromMemory(x),
                _ => Self::Unimplemented,
            },
            _ => Self::Unimplemented,
        }
    }
}

#[test]
fn test_bit_manip() {
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 1), 0xC);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(3, 1), 0xE);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 1), 0x4);

    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(1, 2), 0x4C);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 2), 0xCE);
    assert_eq!(RawInstruction::new(0x4CEE).nth_m_digits(2, 3), 0xCEE);
}

#[test]
fn test_operand_fields() {
    let raw = RawInstruction::new(0xD3A7);
    assert_eq!(raw.family(), 0xD);
    assert_eq!((raw.x(), raw.y(), raw.n()), (0x3, 0xA, 0x7));
    assert_eq!(raw.kk(), 0xA7);
    assert_eq!(raw.nnn(), 0x3A7);
}

#[cfg(test)]
mod tests {
    use super::OpCodes::{self, *};

    #[test]
    fn test_decodes_every_family() {
        let table = [
            (0x00E0, ClearScreen),
            (0x00EE, PopSubroutine),
            (0x1ABC, Jump(0xABC)),
            (0x2ABC, PushSubroutine(0xABC)),
            (0x3A42, SkipEqualConstant(0xA, 0x42)),
            (0x4A42, SkipNotEqualConstant(0xA, 0x42)),
            (0x5AB0, SkipEqualRegister(0xA, 0xB)),
            (0x6A42, SetRegister(0xA, 0x42)),
            (0x7A42, AddToRegister(0xA, 0x42)),
            (0x8AB0, CopyRegister(0xA, 0xB)),
            (0x8AB1, Or(0xA, 0xB)),
            (0x8AB2, And(0xA, 0xB)),
            (0x8AB3, XOr(0xA, 0xB)),
            (0x8AB4, Add(0xA, 0xB)),
            (0x8AB5, SubtractForward(0xA, 0xB)),
            (0x8AB6, RightShift(0xA, 0xB)),
            (0x8AB7, SubtractBackward(0xA, 0xB)),
            (0x8ABE, LeftShift(0xA, 0xB)),
            (0x9AB0, SkipNotEqualRegister(0xA, 0xB)),
            (0xAABC, SetIndexRegister(0xABC)),
            (0xBABC, JumpWithOffset(0xABC)),
            (0xCA42, Random(0xA, 0x42)),
            (0xDAB5, Display(0xA, 0xB, 0x5)),
            (0xEA9E, SkipIfPressed(0xA)),
            (0xEAA1, SkipIfNotPressed(0xA)),
            (0xFA07, CopyDelayToRegister(0xA)),
            (0xFA0A, GetKey(0xA)),
            (0xFA15, CopyRegisterToDelay(0xA)),
            (0xFA18, CopyRegisterToSound(0xA)),
            (0xFA1E, AddToIndex(0xA)),
            (0xFA29, PointChar(0xA)),
            (0xFA33, ToDecimal(0xA)),
            (0xFA55, StoreRegisterToMemory(0xA)),
            (0xFA65, LoadRegisterFromMemory(0xA)),
        ];
        for (raw, expected) in table {
            assert_eq!(OpCodes::decode_raw(raw), expected, "decoding {raw:04X}");
        }
    }

    #[test]
    fn test_unknown_patterns_are_unimplemented() {
        for raw in [0x0000, 0x0123, 0x00E1, 0x8AB8, 0x8ABF, 0xEA9F, 0xFA00, 0xFAFF] {
            assert_eq!(OpCodes::decode_raw(raw), Unimplemented, "decoding {raw:04X}");
        }
    }

    #[test]
    fn test_register_skips_ignore_low_nibble() {
        assert_eq!(OpCodes::decode_raw(0x5AB7), SkipEqualRegister(0xA, 0xB));
        assert_eq!(OpCodes::decode_raw(0x9AB1), SkipNotEqualRegister(0xA, 0xB));
    }
}
