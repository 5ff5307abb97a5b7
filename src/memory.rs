use crate::error::{Error, Result};
use crate::font;
use log::info;

pub const MEMORY_SIZE: usize = 4096;
/// Programs are loaded, and execution starts, here.
pub const PROGRAM_START: usize = 0x200;

wrapper! {
    pub Memory => MEMORY_SIZE
}

impl Memory {
    /// Zeroed memory with the font glyphs in place.
    pub fn new() -> Self {
        let mut memory = Self::default();
        memory[font::MEMORY_RANGE].copy_from_slice(font::FONT);
        memory
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.get(address)
            .copied()
            .ok_or(Error::Addressing { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let cell = self
            .get_mut(address)
            .ok_or(Error::Addressing { address })?;
        *cell = value;
        Ok(())
    }

    /// Big-endian instruction word at `address`.
    pub fn read_word(&self, address: usize) -> Result<u16> {
        Ok(u16::from_be_bytes([
            self.read(address)?,
            self.read(address + 1)?,
        ]))
    }

    /// `len` bytes starting at `start`, all of which must be addressable.
    pub fn range(&self, start: usize, len: usize) -> Result<&[u8]> {
        self.get(start..start + len).ok_or(Error::Addressing {
            address: start.max(MEMORY_SIZE),
        })
    }

    pub fn range_mut(&mut self, start: usize, len: usize) -> Result<&mut [u8]> {
        self.get_mut(start..start + len).ok_or(Error::Addressing {
            address: start.max(MEMORY_SIZE),
        })
    }

    /// Copies a program image verbatim to [`PROGRAM_START`].
    pub fn load(&mut self, rom: &[u8]) -> Result<()> {
        let max = MEMORY_SIZE - PROGRAM_START;
        if rom.len() > max {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max,
            });
        }
        self[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(rom);
        info!("Loaded ROM [size: {}]", rom.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_zeroed_after_font() {
        let memory = Memory::new();
        assert_eq!(memory[font::MEMORY_RANGE], *font::FONT);
        assert!(memory[font::MEMORY_RANGE.end..].iter().all(|&b| b == 0));
    }

    #[test]
    fn read_word_is_big_endian() -> Result<()> {
        let mut memory = Memory::new();
        memory.write(0x300, 0x12)?;
        memory.write(0x301, 0x34)?;
        assert_eq!(memory.read_word(0x300)?, 0x1234);
        Ok(())
    }

    #[test]
    fn out_of_bounds_access_is_an_error() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.write(MEMORY_SIZE, 1),
            Err(Error::Addressing { address: 0x1000 })
        ));
        assert!(matches!(
            memory.read_word(MEMORY_SIZE - 1),
            Err(Error::Addressing { address: 0x1000 })
        ));
        assert!(memory.range(MEMORY_SIZE - 2, 3).is_err());
        assert!(memory.range(MEMORY_SIZE - 3, 3).is_ok());
    }

    #[test]
    fn load_places_program_at_0x200() -> Result<()> {
        let mut memory = Memory::new();
        memory.load(&[0x00, 0xE0])?;
        assert_eq!(memory.range(PROGRAM_START, 2)?, &[0x00, 0xE0]);
        Ok(())
    }

    #[test]
    fn load_rejects_oversized_rom() {
        let mut memory = Memory::new();
        let rom = vec![0; MEMORY_SIZE - PROGRAM_START + 1];
        assert!(matches!(
            memory.load(&rom),
            Err(Error::RomTooLarge { size: 3585, max: 3584 })
        ));
        let rom = vec![0xAB; MEMORY_SIZE - PROGRAM_START];
        assert!(memory.load(&rom).is_ok());
        assert_eq!(memory[MEMORY_SIZE - 1], 0xAB);
    }
}
