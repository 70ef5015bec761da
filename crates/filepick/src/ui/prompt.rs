//! Line input sources for the picker loop.

use std::borrow::Cow;
use std::io::BufRead;

use anyhow::{Context, Result};
use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal,
};

/// Supplies one line of user input at a time.
pub trait LineReader {
    /// Read the next line. `None` means the user cancelled or input ended.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive line editor backed by reedline.
pub struct ReedlineReader {
    editor: Reedline,
}

impl ReedlineReader {
    pub fn new() -> Self {
        Self {
            editor: Reedline::create(),
        }
    }
}

impl Default for ReedlineReader {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReader for ReedlineReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let prompt = PickerPrompt { text: prompt };
        match self.editor.read_line(&prompt).context("failed to read input")? {
            Signal::Success(line) => Ok(Some(line)),
            _ => Ok(None),
        }
    }
}

struct PickerPrompt<'a> {
    text: &'a str,
}

impl Prompt for PickerPrompt<'_> {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.text)
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({prefix}search: {}) ", history_search.term))
    }
}

/// Reads lines from any buffered source; used when stdin is not a terminal.
pub struct BufReadLineReader<R> {
    reader: R,
}

impl<R: BufRead> BufReadLineReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineReader for BufReadLineReader<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .context("failed to read input line")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
    }
}
