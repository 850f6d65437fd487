#![forbid(unsafe_code)]

//! Search field embedded in the tree-select popup.
//!
//! A single-line, grapheme-aware text field. It only edits its own value;
//! the owning widget decides which keys reach it and re-runs the filter
//! when [`InputOutcome::Edited`] comes back.

use arbor_core::event::{KeyCode, KeyEvent, Modifiers};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// What a key did to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Key not handled.
    Ignored,
    /// Caret moved, value unchanged.
    Moved,
    /// Value changed.
    Edited,
}

/// A single-line search field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchInput {
    value: String,
    /// Caret position as a grapheme index.
    cursor: usize,
    placeholder: String,
}

impl SearchInput {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder shown while empty.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Placeholder text.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Caret position in graphemes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the value and park the caret at the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = sanitize(&value.into());
        self.cursor = self.grapheme_count();
    }

    /// Empty the field. Returns `true` if it held text.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.value.is_empty();
        self.value.clear();
        self.cursor = 0;
        had_text
    }

    /// Handle an editing key.
    pub fn handle_key(&mut self, key: &KeyEvent) -> InputOutcome {
        let ctrl = key.modifiers.contains(Modifiers::CTRL);

        match key.code {
            KeyCode::Char('u') if ctrl => {
                if self.clear() {
                    InputOutcome::Edited
                } else {
                    InputOutcome::Ignored
                }
            }
            KeyCode::Char(c) if !ctrl && !c.is_control() => {
                self.insert_text(c.encode_utf8(&mut [0; 4]));
                InputOutcome::Edited
            }
            KeyCode::Backspace => edited_if(self.delete_back()),
            KeyCode::Delete => edited_if(self.delete_forward()),
            KeyCode::Left => moved_if(self.move_to(self.cursor.saturating_sub(1))),
            KeyCode::Right => moved_if(self.move_to(self.cursor + 1)),
            KeyCode::Home => moved_if(self.move_to(0)),
            KeyCode::End => moved_if(self.move_to(self.grapheme_count())),
            _ => InputOutcome::Ignored,
        }
    }

    /// Insert text at the caret. Line breaks and tabs become spaces, other
    /// control characters are dropped.
    pub fn insert_text(&mut self, text: &str) {
        let clean = sanitize(text);
        if clean.is_empty() {
            return;
        }
        let byte = self.byte_offset(self.cursor);
        self.value.insert_str(byte, &clean);
        // Combining marks may merge with the grapheme before the caret, so
        // recount instead of adding the inserted grapheme count.
        let before = self.value[..byte + clean.len()].graphemes(true).count();
        self.cursor = before;
    }

    /// Display width of the value in cells.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.value.width()
    }

    fn grapheme_count(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn byte_offset(&self, grapheme_index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn move_to(&mut self, target: usize) -> bool {
        let target = target.min(self.grapheme_count());
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.value.replace_range(start..end, "");
        self.cursor -= 1;
        true
    }

    fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.grapheme_count() {
            return false;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.value.replace_range(start..end, "");
        true
    }
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}

fn edited_if(changed: bool) -> InputOutcome {
    if changed {
        InputOutcome::Edited
    } else {
        InputOutcome::Ignored
    }
}

fn moved_if(moved: bool) -> InputOutcome {
    if moved {
        InputOutcome::Moved
    } else {
        InputOutcome::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut SearchInput, code: KeyCode) -> InputOutcome {
        input.handle_key(&KeyEvent::new(code))
    }

    #[test]
    fn typing_appends_at_caret() {
        let mut input = SearchInput::new();
        for c in "abc".chars() {
            assert_eq!(press(&mut input, KeyCode::Char(c)), InputOutcome::Edited);
        }
        assert_eq!(input.value(), "abc");
        assert_eq!(input.cursor(), 3);

        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Char('X'));
        assert_eq!(input.value(), "abXc");
    }

    #[test]
    fn backspace_and_delete() {
        let mut input = SearchInput::new();
        input.set_value("hello");
        assert_eq!(press(&mut input, KeyCode::Backspace), InputOutcome::Edited);
        assert_eq!(input.value(), "hell");
        assert_eq!(press(&mut input, KeyCode::Delete), InputOutcome::Ignored);
        press(&mut input, KeyCode::Home);
        assert_eq!(press(&mut input, KeyCode::Backspace), InputOutcome::Ignored);
        assert_eq!(press(&mut input, KeyCode::Delete), InputOutcome::Edited);
        assert_eq!(input.value(), "ell");
    }

    #[test]
    fn caret_moves_report_moved_only_when_moving() {
        let mut input = SearchInput::new();
        input.set_value("ab");
        assert_eq!(press(&mut input, KeyCode::Right), InputOutcome::Ignored);
        assert_eq!(press(&mut input, KeyCode::Left), InputOutcome::Moved);
        assert_eq!(press(&mut input, KeyCode::Home), InputOutcome::Moved);
        assert_eq!(press(&mut input, KeyCode::End), InputOutcome::Moved);
    }

    #[test]
    fn grapheme_clusters_delete_as_one() {
        let mut input = SearchInput::new();
        input.set_value("e\u{301}x");
        assert_eq!(input.cursor(), 2);
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(input.value(), "x");
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = SearchInput::new();
        input.set_value("query");
        let key = KeyEvent::new(KeyCode::Char('u')).with_modifiers(Modifiers::CTRL);
        assert_eq!(input.handle_key(&key), InputOutcome::Edited);
        assert_eq!(input.value(), "");
        assert_eq!(input.handle_key(&key), InputOutcome::Ignored);
    }

    #[test]
    fn pasted_text_is_sanitized() {
        let mut input = SearchInput::new();
        input.insert_text("a\tb\nc\u{7}");
        assert_eq!(input.value(), "a b c");
    }

    #[test]
    fn unhandled_keys_are_ignored() {
        let mut input = SearchInput::new();
        assert_eq!(press(&mut input, KeyCode::Up), InputOutcome::Ignored);
        assert_eq!(press(&mut input, KeyCode::Enter), InputOutcome::Ignored);
    }
}
