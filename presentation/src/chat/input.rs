//! Line editor setup for the chat REPL

use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{ColorMode, Editor, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};

pub(crate) type ChatEditor = Editor<InputHelper, DefaultHistory>;

/// Hides the typed line while `masking` is set.
#[derive(Debug, Default)]
pub(crate) struct InputHelper {
    masking: bool,
}

impl Helper for InputHelper {}

impl Completer for InputHelper {
    type Candidate = String;
}

impl Hinter for InputHelper {
    type Hint = String;
}

impl Validator for InputHelper {}

impl Highlighter for InputHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Owned("*".repeat(line.chars().count()))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.masking
    }
}

pub(crate) fn new_editor() -> rustyline::Result<ChatEditor> {
    let mut rl = ChatEditor::new()?;
    rl.set_helper(Some(InputHelper::default()));
    Ok(rl)
}

/// Read a line shown as `*`. Nothing read here is added to history.
pub(crate) fn read_masked(rl: &mut ChatEditor, label: &str) -> rustyline::Result<String> {
    set_masking(rl, true);
    // Masking is a highlight, so it must apply even on terminals without color
    rl.set_color_mode(ColorMode::Forced);
    let answer = rl.readline(label);
    set_masking(rl, false);
    rl.set_color_mode(ColorMode::Enabled);
    answer
}

fn set_masking(rl: &mut ChatEditor, masking: bool) {
    if let Some(helper) = rl.helper_mut() {
        helper.masking = masking;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masking_hides_every_character() {
        let helper = InputHelper { masking: true };
        assert_eq!(helper.highlight("demo123", 7), "*******");
        assert_eq!(helper.highlight("pässwörd", 0), "********");
        assert!(helper.highlight_char("demo123", 7, false));
    }

    #[test]
    fn test_unmasked_line_is_shown_as_typed() {
        let helper = InputHelper::default();
        assert!(matches!(helper.highlight("J1 math", 7), Cow::Borrowed("J1 math")));
        assert!(!helper.highlight_char("J1 math", 7, false));
    }
}
