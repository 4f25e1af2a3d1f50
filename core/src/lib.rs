pub mod cpu;
pub mod error;
pub mod memory;

pub use cpu::disassembler::Disassembler;
pub use cpu::intel8080::{Intel8080, Intel8080State};
pub use error::EmulatorError;
pub use memory::Memory;
