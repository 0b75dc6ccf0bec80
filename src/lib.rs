// 16 8-bit data registers named V0 to VF, VF doubling as the carry flag
// I -> address register (12 bits)
//
// Stack of 16 return addresses
//
// Delay timer & Sound timer: count down once per executed instruction until 0
//
// Display res: 64 width, 32 height
//
// 35 opcodes, each are 2 bytes (big-endian)
//      NNN: address
//      NN: 8-bit constant
//      N: 4-bit constant
//      X and Y: 4-bit register identifier

pub mod config;
pub mod decode;
pub mod display;
pub mod emulator;
pub mod error;
pub mod keyboard;
pub mod memory;
pub mod registers;
pub mod timer;

pub use config::Config;
pub use display::FrameBuffer;
pub use emulator::Emulator;
pub use error::EmulatorError;
pub use keyboard::Keypad;
