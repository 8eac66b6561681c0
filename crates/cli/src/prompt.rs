//! Line-oriented prompts on top of rustyline
//!
//! Every prompt returns `Ok(None)` when the user presses Ctrl-C or Ctrl-D,
//! which the menu treats as a request to leave.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::cell::Cell;

use anyhow::Result;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper};

/// Hides typed characters while a password is being entered.
#[derive(Default)]
struct MaskingHelper {
    masking: Cell<bool>,
}

impl Helper for MaskingHelper {}

impl Completer for MaskingHelper {
    type Candidate = String;
}

impl Hinter for MaskingHelper {
    type Hint = String;
}

impl Validator for MaskingHelper {}

impl Highlighter for MaskingHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking.get() {
            Owned("*".repeat(line.chars().count()))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        self.masking.get()
    }
}

pub struct Prompt {
    editor: Editor<MaskingHelper, DefaultHistory>,
}

impl Prompt {
    pub fn new() -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(MaskingHelper::default()));
        Ok(Self { editor })
    }

    /// Read one trimmed line.
    pub fn text(&mut self, message: &str) -> Result<Option<String>> {
        self.read(message, Entry::Trimmed)
    }

    /// Read a line without echoing it. Surrounding spaces are kept.
    pub fn password(&mut self, message: &str) -> Result<Option<String>> {
        self.set_masking(true);
        let line = self.read(message, Entry::Verbatim);
        self.set_masking(false);
        line
    }

    /// Ask a yes/no question until the answer parses.
    pub fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        loop {
            let Some(answer) = self.read(&format!("{question} (y/n) "), Entry::Trimmed)? else {
                return Ok(None);
            };
            match parse_yes_no(&answer) {
                Some(yes) => return Ok(Some(yes)),
                None => println!("请输入 y 或 n"),
            }
        }
    }

    /// Show a numbered list and return the picked index.
    pub fn select(&mut self, title: &str, choices: &[String]) -> Result<Option<usize>> {
        loop {
            println!("{title}");
            for (i, choice) in choices.iter().enumerate() {
                println!("  {}. {}", i + 1, choice);
            }
            let Some(answer) = self.read(&format!("[1-{}]> ", choices.len()), Entry::Trimmed)? else {
                return Ok(None);
            };
            match parse_choice(&answer, choices.len()) {
                Some(index) => return Ok(Some(index)),
                None => println!("无效的选项：{answer}"),
            }
        }
    }

    fn set_masking(&mut self, on: bool) {
        if let Some(helper) = self.editor.helper() {
            helper.masking.set(on);
        }
    }

    fn read(&mut self, message: &str, entry: Entry) -> Result<Option<String>> {
        match self.editor.readline(message) {
            Ok(line) => Ok(Some(entry.apply(line))),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Trimmed,
    Verbatim,
}

impl Entry {
    fn apply(self, line: String) -> String {
        match self {
            Entry::Trimmed => line.trim().to_string(),
            Entry::Verbatim => line,
        }
    }
}

/// 1-based menu input to a 0-based index.
pub fn parse_choice(input: &str, len: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

pub fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "是" => Some(true),
        "n" | "no" | "否" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_is_one_based_and_bounded() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("two", 3), None);
    }

    #[test]
    fn yes_no_accepts_common_spellings() {
        assert_eq!(parse_yes_no("Y"), Some(true));
        assert_eq!(parse_yes_no("是"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn verbatim_entry_keeps_surrounding_spaces() {
        assert_eq!(Entry::Verbatim.apply(" pa ss ".to_string()), " pa ss ");
        assert_eq!(Entry::Trimmed.apply(" 13800000000 ".to_string()), "13800000000");
    }

    #[test]
    fn masking_helper_hides_only_when_enabled() {
        let helper = MaskingHelper::default();
        assert_eq!(helper.highlight("secret", 6), "secret");

        helper.masking.set(true);
        assert_eq!(helper.highlight("密码12", 4), "****");
    }
}
