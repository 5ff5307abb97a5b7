/// Fatal conditions raised while loading or stepping the machine.
///
/// Unknown opcodes are deliberately absent: they execute as no-ops.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("memory access out of bounds at address {address:#06X}")]
    Addressing { address: usize },

    #[error("stack overflow: call to {address:#05X} exceeds 16 nested calls")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return with an empty call stack")]
    StackUnderflow,

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("invalid key {0:#04X}, expected 0x0..=0xF")]
    InvalidKey(u8),
}

pub type Result<T> = std::result::Result<T, Error>;
