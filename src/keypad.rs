use crate::config::KeyConsumption;
use log::debug;

/// Values above this are not keys on the hex keypad.
pub const MAX_KEY: u8 = 0xF;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    #[default]
    Running,
    /// Blocked on `FX0A`; the key will be stored in V`register`.
    AwaitingKey { register: usize },
}

/// Tracks the single most recently pressed key and the blocking-input state.
#[derive(Debug, Default, Clone)]
pub struct Keypad {
    state: InputState,
    last_key: Option<u8>,
    consumption: KeyConsumption,
}

impl Keypad {
    pub fn new(consumption: KeyConsumption) -> Self {
        Self {
            consumption,
            ..Default::default()
        }
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, InputState::AwaitingKey { .. })
    }

    pub fn last_key(&self) -> Option<u8> {
        self.last_key
    }

    pub fn await_key(&mut self, register: usize) {
        self.state = InputState::AwaitingKey { register };
        debug!("Awaiting key for V{register:X}");
    }

    /// Records `key` as the last pressed key. If an `FX0A` was pending, returns
    /// its target register and resumes running.
    pub fn press(&mut self, key: u8) -> Option<usize> {
        self.last_key = Some(key);
        match std::mem::take(&mut self.state) {
            InputState::AwaitingKey { register } => Some(register),
            InputState::Running => None,
        }
    }

    /// Compares `value` against the last key for `EX9E` (`want_pressed`) or
    /// `EXA1`. Returns whether the next instruction should be skipped.
    ///
    /// Depending on the [`KeyConsumption`] policy this may forget the last
    /// key, so two checks in a row can disagree.
    pub fn check(&mut self, value: u8, want_pressed: bool) -> bool {
        let matched = self.last_key == Some(value);
        let skip = matched == want_pressed;
        let forget = match self.consumption {
            KeyConsumption::OnMismatch => !matched,
            KeyConsumption::UnlessSkipped => !skip,
            KeyConsumption::Never => false,
        };
        if forget {
            self.last_key = None;
        }
        skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_resumes_waiting_register() {
        let mut keypad = Keypad::default();
        keypad.await_key(4);
        assert!(keypad.is_awaiting());
        assert_eq!(keypad.press(0xC), Some(4));
        assert_eq!(keypad.state(), InputState::Running);
        assert_eq!(keypad.last_key(), Some(0xC));
    }

    #[test]
    fn press_while_running_only_records() {
        let mut keypad = Keypad::default();
        assert_eq!(keypad.press(0x3), None);
        assert_eq!(keypad.last_key(), Some(0x3));
        assert!(!keypad.is_awaiting());
    }

    #[test]
    fn on_mismatch_forgets_on_failed_compare() {
        let mut keypad = Keypad::new(KeyConsumption::OnMismatch);
        keypad.press(0xC);
        // pressed check against another key: no skip, key forgotten
        assert!(!keypad.check(0xB, true));
        assert_eq!(keypad.last_key(), None);

        keypad.press(0xC);
        // not-pressed check against the same key: no skip, key kept
        assert!(!keypad.check(0xC, false));
        assert_eq!(keypad.last_key(), Some(0xC));
        // not-pressed check against another key: skip, key forgotten
        assert!(keypad.check(0xB, false));
        assert_eq!(keypad.last_key(), None);
    }

    #[test]
    fn consecutive_checks_can_disagree() {
        let mut keypad = Keypad::new(KeyConsumption::OnMismatch);
        keypad.press(0x5);
        assert!(keypad.check(0x6, false));
        // key was consumed by the first check
        assert!(!keypad.check(0x5, true));
    }

    #[test]
    fn unless_skipped_forgets_when_not_skipping() {
        let mut keypad = Keypad::new(KeyConsumption::UnlessSkipped);
        keypad.press(0xC);
        assert!(!keypad.check(0xC, false));
        assert_eq!(keypad.last_key(), None);

        keypad.press(0xC);
        assert!(keypad.check(0xB, false));
        assert_eq!(keypad.last_key(), Some(0xC));
    }

    #[test]
    fn never_is_a_pure_read() {
        let mut keypad = Keypad::new(KeyConsumption::Never);
        keypad.press(0x7);
        assert!(!keypad.check(0x1, true));
        assert!(keypad.check(0x7, true));
        assert!(keypad.check(0x1, false));
        assert_eq!(keypad.last_key(), Some(0x7));
    }
}
