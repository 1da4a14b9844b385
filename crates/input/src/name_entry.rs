//! Bounded text buffer for typing a leaderboard name.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::MAX_NAME_LETTERS;

/// What a key press did to the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEntryOutcome {
    /// Buffer changed (or the key was ignored); keep typing
    Editing,
    /// Enter pressed on a non-blank name
    Submitted(String),
    /// Esc pressed; the name is discarded
    Cancelled,
}

#[derive(Debug, Clone, Default)]
pub struct NameEntry {
    letters: ArrayVec<char, MAX_NAME_LETTERS>,
}

impl NameEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_string(&self) -> String {
        self.letters.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.letters.is_full()
    }

    pub fn clear(&mut self) {
        self.letters.clear();
    }

    pub fn handle_key_press(&mut self, code: KeyCode) -> NameEntryOutcome {
        match code {
            KeyCode::Char(c) if !c.is_control() => {
                // Extra letters past the limit are dropped.
                let _ = self.letters.try_push(c);
                NameEntryOutcome::Editing
            }
            KeyCode::Backspace => {
                self.letters.pop();
                NameEntryOutcome::Editing
            }
            KeyCode::Enter => {
                let name = self.as_string();
                if name.trim().is_empty() {
                    return NameEntryOutcome::Editing;
                }
                self.clear();
                NameEntryOutcome::Submitted(name)
            }
            KeyCode::Esc => {
                self.clear();
                NameEntryOutcome::Cancelled
            }
            _ => NameEntryOutcome::Editing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(entry: &mut NameEntry, s: &str) {
        for c in s.chars() {
            entry.handle_key_press(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_type_and_submit() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, "Ana");
        assert_eq!(
            entry.handle_key_press(KeyCode::Enter),
            NameEntryOutcome::Submitted("Ana".to_string())
        );
        assert!(entry.is_empty());
    }

    #[test]
    fn test_letters_past_limit_are_dropped() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, "abcdefghijk");
        assert!(entry.is_full());
        assert_eq!(entry.as_string(), "abcdefgh");
    }

    #[test]
    fn test_backspace() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, "Bob");
        entry.handle_key_press(KeyCode::Backspace);
        assert_eq!(entry.as_string(), "Bo");

        let mut empty = NameEntry::new();
        assert_eq!(
            empty.handle_key_press(KeyCode::Backspace),
            NameEntryOutcome::Editing
        );
    }

    #[test]
    fn test_blank_name_is_not_submitted() {
        let mut entry = NameEntry::new();
        assert_eq!(entry.handle_key_press(KeyCode::Enter), NameEntryOutcome::Editing);
        type_str(&mut entry, "  ");
        assert_eq!(entry.handle_key_press(KeyCode::Enter), NameEntryOutcome::Editing);
    }

    #[test]
    fn test_cancel() {
        let mut entry = NameEntry::new();
        type_str(&mut entry, "Cy");
        assert_eq!(entry.handle_key_press(KeyCode::Esc), NameEntryOutcome::Cancelled);
        assert!(entry.is_empty());
    }
}
