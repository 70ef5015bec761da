pub mod app;
pub mod domain;
pub mod infra;
pub mod ui;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Result;

use crate::app::picker::{PickOptions, Picker};
use crate::ui::app::UiApp;
use crate::ui::prompt::{BufReadLineReader, ReedlineReader};

pub fn init(verbose: bool) {
    infra::logging::init(verbose);
}

/// Run an interactive session on the process terminal.
///
/// Menus go to stderr. Returns `None` when the user cancels.
pub fn pick(options: PickOptions) -> Result<Option<Vec<PathBuf>>> {
    let prompt = options.config.prompt.symbol.clone();
    let picker = Picker::new(options);
    let stdin = io::stdin();
    if stdin.is_terminal() {
        UiApp::new(picker, ReedlineReader::new(), io::stderr(), prompt).run()
    } else {
        tracing::debug!("stdin is not a terminal, reading plain lines");
        UiApp::new(picker, BufReadLineReader::new(stdin.lock()), io::stderr(), prompt).run()
    }
}
