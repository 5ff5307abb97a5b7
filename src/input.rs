use std::collections::HashMap;
use winit::event::VirtualKeyCode;
use winit_input_helper::WinitInputHelper;

/// Generates a keymap from QWERTY keys to hex keypad values, represented
/// as a [`HashMap`](std::collections::HashMap).
macro_rules! keymap {
    ($($keycode:ident => $mapping:literal),*) => {
        lazy_static::lazy_static! {
            /// The left-hand 4x4 block of a QWERTY keyboard laid over the hex keypad:
            ///
            /// ```text
            /// 1 2 3 4      1 2 3 C
            /// Q W E R      4 5 6 D
            /// A S D F  =>  7 8 9 E
            /// Z X C V      A 0 B F
            /// ```
            pub static ref KEYMAP: HashMap<VirtualKeyCode, u8> = HashMap::from([
                $((VirtualKeyCode::$keycode, $mapping)),*
            ]);
        }
    };
}

keymap! {
    Key1 => 0x1,
    Key2 => 0x2,
    Key3 => 0x3,
    Key4 => 0xC,
    Q => 0x4,
    W => 0x5,
    E => 0x6,
    R => 0xD,
    A => 0x7,
    S => 0x8,
    D => 0x9,
    F => 0xE,
    Z => 0xA,
    X => 0x0,
    C => 0xB,
    V => 0xF
}

/// Picks the one key delivered to the machine when several are held: the
/// lowest keypad value wins.
pub fn select_key(mut held: impl FnMut(VirtualKeyCode) -> bool) -> Option<u8> {
    KEYMAP
        .iter()
        .filter(|(code, _)| held(**code))
        .map(|(_, &key)| key)
        .min()
}

/// The keypad value to deliver this frame, if any mapped key is down.
pub fn held_key(input: &WinitInputHelper) -> Option<u8> {
    select_key(|code| input.key_held(code))
}
