//! Error types for the 8080 core.
//!
//! Mirrors the hand-rolled `Display`/`Error` style used for ROM loading
//! elsewhere in this workspace rather than pulling in an error-derive crate.

use std::fmt;

/// Errors raised by [`crate::Memory`] and [`crate::Intel8080`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmulatorError {
    /// A read (fetch or operand read) fell outside the memory's address range.
    MemoryReadError(u16),

    /// Dispatch hit an opcode with no handler (the twelve illegal 8080
    /// opcodes, or a family gap).
    UnimplementedInstruction(u16, u8),

    /// `request_interrupt` was given an opcode from a multi-byte
    /// instruction family. Only single-byte instructions (in practice,
    /// `RST n`) can be injected.
    UnimplementedInterrupt(u8),
}

impl fmt::Display for EmulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemoryReadError(addr) => write!(f, "invalid read at address ${addr:04X}"),
            Self::UnimplementedInstruction(addr, opcode) => {
                write!(f, "invalid opcode ${opcode:02X} at address ${addr:04X}")
            }
            Self::UnimplementedInterrupt(opcode) => {
                write!(f, "invalid interrupt instruction ${opcode:02X}")
            }
        }
    }
}

impl std::error::Error for EmulatorError {}
