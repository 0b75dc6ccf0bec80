use std::{io, path::PathBuf};

use crate::memory::TypeAddr;

/// Faults raised by program loading and instruction execution.
#[derive(Debug, thiserror::Error)]
pub enum EmulatorError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("could not read ROM {path:?}")]
    RomRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stack overflow: call nested deeper than 16 at {pc:#05X}")]
    StackOverflow { pc: TypeAddr },

    #[error("stack underflow: return with empty call stack at {pc:#05X}")]
    StackUnderflow { pc: TypeAddr },
}
