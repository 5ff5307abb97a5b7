macro_rules! wrapper {
    ($($vis:vis $name:ident => $size:expr),*) => {
        $(
            #[derive(Debug, Clone)]
            $vis struct $name([u8; $size]);

            impl Default for $name {
                fn default() -> Self {
                    Self([0; $size])
                }
            }

            impl std::ops::Deref for $name {
                type Target = [u8; $size];

                fn deref(&self) -> &Self::Target {
                    &self.0
                }
            }

            impl std::ops::DerefMut for $name {
                fn deref_mut(&mut self) -> &mut Self::Target {
                    &mut self.0
                }
            }
        )*
    };
}

pub mod cli;
pub mod config;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod keypad;
pub mod memory;
pub mod screen;

pub use config::{Config, KeyConsumption, KeyResume};
pub use error::{Error, Result};
pub use framebuffer::Framebuffer;
pub use instruction::Instruction;
pub use interpreter::Interpreter;

mod bits {
    pub const fn set(n: u8, bits: u8) -> bool {
        (bits & (1 << n)) != 0
    }

    pub const fn recombine(upper: u8, lower: u8) -> u8 {
        (upper << 4) | lower
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn bit_set() {
            assert!(set(7, 0x80));
            assert!(!set(6, 0x80));
            assert!(set(0, 0x01));
        }

        #[test]
        fn recombine_nibbles() {
            assert_eq!(recombine(0xA, 0x5), 0xA5);
        }
    }
}
