use crate::bits;
use std::fmt;

/// A fetched opcode word split into its four nibbles, most significant first.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub nibbles: [u8; 4],
}

impl From<u16> for Instruction {
    fn from(inst: u16) -> Self {
        let [hi, lo] = inst.to_be_bytes();
        Self {
            nibbles: [hi >> 4, hi & 0xF, lo >> 4, lo & 0xF],
        }
    }
}

impl From<Instruction> for u16 {
    fn from(inst: Instruction) -> Self {
        let [a, b, c, d] = inst.nibbles;
        u16::from_be_bytes([bits::recombine(a, b), bits::recombine(c, d)])
    }
}

impl Instruction {
    pub fn x(&self) -> usize {
        self.nibbles[1] as usize
    }

    pub fn y(&self) -> usize {
        self.nibbles[2] as usize
    }

    pub fn n(&self) -> u8 {
        self.nibbles[3]
    }

    /// Low byte.
    pub fn nn(&self) -> u8 {
        bits::recombine(self.nibbles[2], self.nibbles[3])
    }

    /// Low 12 bits.
    pub fn nnn(&self) -> u16 {
        u16::from(*self) & 0x0FFF
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for nibble in self.nibbles.iter() {
            write!(f, "{:X}", nibble)?;
        }
        Ok(())
    }
}

/// Assembly-style mnemonic; unassigned opcodes render as a raw data word.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, n, nn, nnn) = (self.x(), self.y(), self.n(), self.nn(), self.nnn());
        match self.nibbles {
            [0, 0, 0xE, 0] => write!(f, "CLS"),
            [0, 0, 0xE, 0xE] => write!(f, "RET"),
            [1, ..] => write!(f, "JP {nnn:#05X}"),
            [2, ..] => write!(f, "CALL {nnn:#05X}"),
            [3, ..] => write!(f, "SE V{x:X}, {nn:#04X}"),
            [4, ..] => write!(f, "SNE V{x:X}, {nn:#04X}"),
            [5, ..] => write!(f, "SE V{x:X}, V{y:X}"),
            [6, ..] => write!(f, "LD V{x:X}, {nn:#04X}"),
            [7, ..] => write!(f, "ADD V{x:X}, {nn:#04X}"),
            [8, _, _, 0] => write!(f, "LD V{x:X}, V{y:X}"),
            [8, _, _, 1] => write!(f, "OR V{x:X}, V{y:X}"),
            [8, _, _, 2] => write!(f, "AND V{x:X}, V{y:X}"),
            [8, _, _, 3] => write!(f, "XOR V{x:X}, V{y:X}"),
            [8, _, _, 4] => write!(f, "ADD V{x:X}, V{y:X}"),
            [8, _, _, 5] => write!(f, "SUB V{x:X}, V{y:X}"),
            [8, _, _, 6] => write!(f, "SHR V{x:X}, V{y:X}"),
            [8, _, _, 7] => write!(f, "SUBN V{x:X}, V{y:X}"),
            [8, _, _, 0xE] => write!(f, "SHL V{x:X}, V{y:X}"),
            [9, ..] => write!(f, "SNE V{x:X}, V{y:X}"),
            [0xA, ..] => write!(f, "LD I, {nnn:#05X}"),
            [0xB, ..] => write!(f, "JP V0, {nnn:#05X}"),
            [0xC, ..] => write!(f, "RND V{x:X}, {nn:#04X}"),
            [0xD, ..] => write!(f, "DRW V{x:X}, V{y:X}, {n}"),
            [0xE, _, 9, 0xE] => write!(f, "SKP V{x:X}"),
            [0xE, _, 0xA, 1] => write!(f, "SKNP V{x:X}"),
            [0xF, _, _, 3] => write!(f, "LD B, V{x:X}"),
            [0xF, _, 1, 5] => write!(f, "LD DT, V{x:X}"),
            [0xF, _, 5, 5] => write!(f, "LD [I], V{x:X}"),
            [0xF, _, 6, 5] => write!(f, "LD V{x:X}, [I]"),
            [0xF, _, _, 7] => write!(f, "LD V{x:X}, DT"),
            [0xF, _, _, 8] => write!(f, "LD ST, V{x:X}"),
            [0xF, _, _, 9] => write!(f, "LD F, V{x:X}"),
            [0xF, _, _, 0xA] => write!(f, "LD V{x:X}, K"),
            [0xF, _, _, 0xE] => write!(f, "ADD I, V{x:X}"),
            _ => write!(f, "DW {:#06X}", u16::from(*self)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction() {
        let val = 0b00101110; // 46
        let inst = Instruction::from(val);
        assert_eq!(
            inst,
            Instruction {
                nibbles: [0, 0, 0b0010, 0b1110]
            }
        );
    }

    #[test]
    fn operands() {
        let inst = Instruction::from(0xD25A);
        assert_eq!(inst.x(), 2);
        assert_eq!(inst.y(), 5);
        assert_eq!(inst.n(), 0xA);
        assert_eq!(inst.nn(), 0x5A);
        assert_eq!(inst.nnn(), 0x25A);
        assert_eq!(u16::from(inst), 0xD25A);
    }

    #[test]
    fn debug_is_hex() {
        assert_eq!(format!("{:?}", Instruction::from(0x00E0)), "00E0");
        assert_eq!(format!("{:?}", Instruction::from(0xF733)), "F733");
    }

    #[test]
    fn mnemonics() {
        let cases = [
            (0x00E0, "CLS"),
            (0x00EE, "RET"),
            (0x1200, "JP 0x200"),
            (0x2A34, "CALL 0xA34"),
            (0x3233, "SE V2, 0x33"),
            (0x65B0, "LD V5, 0xB0"),
            (0x8AB4, "ADD VA, VB"),
            (0x856E, "SHL V5, V6"),
            (0xB5AD, "JP V0, 0x5AD"),
            (0xD253, "DRW V2, V5, 3"),
            (0xE49E, "SKP V4"),
            (0xF40A, "LD V4, K"),
            (0xF733, "LD B, V7"),
            (0xF765, "LD V7, [I]"),
        ];
        for (word, text) in cases {
            assert_eq!(Instruction::from(word).to_string(), text);
        }
    }

    #[test]
    fn unassigned_opcodes_render_as_data() {
        assert_eq!(Instruction::from(0x0123).to_string(), "DW 0x0123");
        assert_eq!(Instruction::from(0x8128).to_string(), "DW 0x8128");
        assert_eq!(Instruction::from(0xF404).to_string(), "DW 0xF404");
        assert_eq!(Instruction::from(0xF0F5).to_string(), "DW 0xF0F5");
    }

    #[test]
    fn loose_operand_nibbles_still_decode() {
        assert_eq!(Instruction::from(0x5121).to_string(), "SE V1, V2");
        assert_eq!(Instruction::from(0x9AB3).to_string(), "SNE VA, VB");
        assert_eq!(Instruction::from(0xF103).to_string(), "LD B, V1");
        assert_eq!(Instruction::from(0xF2A7).to_string(), "LD V2, DT");
    }
}
