//! Prompt loop tying the picker to a line reader and an output stream.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::app::picker::{Outcome, Picker};
use crate::ui::prompt::LineReader;
use crate::ui::render::render_menu;

/// Primary entry point for running an interactive picker session.
pub struct UiApp<R, W> {
    picker: Picker,
    reader: R,
    out: W,
    prompt: String,
}

impl<R: LineReader, W: Write> UiApp<R, W> {
    pub fn new(picker: Picker, reader: R, out: W, prompt: impl Into<String>) -> Self {
        Self {
            picker,
            reader,
            out,
            prompt: prompt.into(),
        }
    }

    /// Run until the user finishes (`Some(paths)`) or cancels (`None`).
    pub fn run(mut self) -> Result<Option<Vec<PathBuf>>> {
        loop {
            let menu = self.picker.current_menu()?;
            render_menu(&menu, &mut self.out).context("failed to render menu")?;

            let Some(line) = self.reader.read_line(&self.prompt)? else {
                tracing::debug!("input ended, cancelling");
                self.picker.cancel();
                return Ok(None);
            };

            match self.picker.handle_line(&line)? {
                Outcome::Continue => {}
                Outcome::Rejected(message) => {
                    writeln!(self.out, "{message}").context("failed to write message")?;
                }
                Outcome::Finished(paths) => {
                    tracing::debug!(count = paths.len(), "picker finished");
                    return Ok(Some(paths));
                }
            }
        }
    }
}
