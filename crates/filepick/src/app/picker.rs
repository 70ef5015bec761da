//! Turns lines of input into store actions for the current page.

use std::path::PathBuf;

use anyhow::Result;

use crate::app::pages::{Entry, InputMode, PageContext, PageMenu};
use crate::app::resolver::resolve;
use crate::app::search::GlobSearch;
use crate::app::store::{Status, Store, StoreAction, StoreState};
use crate::domain::model::{Action, Page, Resolution, ResolutionBatch};
use crate::domain::signal::format_error;
use crate::infra::config::Config;

/// Where a picker session starts.
#[derive(Debug, Clone)]
pub struct PickOptions {
    pub base_dir: PathBuf,
    pub start_page: Page,
    /// Pattern preloaded into the glob page.
    pub glob: Option<String>,
    pub config: Config,
}

impl PickOptions {
    pub fn new(base_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            base_dir: base_dir.into(),
            start_page: config.defaults.start_page,
            glob: None,
            config,
        }
    }
}

/// Result of handling one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line was applied; render the next menu.
    Continue,
    /// The line was rejected as a whole; show the message and prompt again.
    Rejected(String),
    /// The user is done; these are the picked files.
    Finished(Vec<PathBuf>),
}

/// Drives one picker session.
pub struct Picker {
    store: Store,
    context: PageContext,
    /// Menu last handed out by `current_menu`; the next line resolves against it.
    shown: Option<PageMenu>,
}

impl Picker {
    pub fn new(options: PickOptions) -> Self {
        let mut state = StoreState::new(&options.base_dir, options.start_page);
        state.glob = options.glob;
        Self {
            context: PageContext::new(options.base_dir, options.config),
            store: Store::new(state),
            shown: None,
        }
    }

    pub fn state(&self) -> &StoreState {
        self.store.state()
    }

    /// Build the menu for the current page.
    ///
    /// The menu is kept until the next line is handled, so ids resolve against what was shown
    /// even if the filesystem changes in between.
    pub fn current_menu(&mut self) -> Result<PageMenu> {
        let menu = self.context.build(self.store.state())?;
        self.shown = Some(menu.clone());
        Ok(menu)
    }

    /// End the session without a result.
    pub fn cancel(&mut self) {
        self.store.dispatch(StoreAction::Cancel);
    }

    /// Apply one line of input to the current page.
    pub fn handle_line(&mut self, line: &str) -> Result<Outcome> {
        let menu = match self.shown.take() {
            Some(menu) => menu,
            None => self.context.build(self.store.state())?,
        };
        let outcome = match menu.input {
            InputMode::Pattern => self.handle_pattern(line),
            InputMode::Query => self.handle_query(line, &menu)?,
        };
        if self.store.state().status == Status::Finished {
            return Ok(Outcome::Finished(
                self.store.state().selection.items().to_vec(),
            ));
        }
        Ok(outcome)
    }

    fn handle_pattern(&mut self, line: &str) -> Outcome {
        let pattern = line.trim();
        if pattern.is_empty() {
            self.store.dispatch(StoreAction::ClearGlob);
            self.store.dispatch(StoreAction::Navigate(Page::Main));
            return Outcome::Continue;
        }
        match GlobSearch::new(pattern, self.context.case_insensitive_glob()) {
            Ok(_) => {
                self.store.dispatch(StoreAction::SetGlob(pattern.to_owned()));
                Outcome::Continue
            }
            Err(err) => {
                tracing::debug!(error = %err, "rejected glob pattern");
                Outcome::Rejected(format_error(line))
            }
        }
    }

    fn handle_query(&mut self, line: &str, menu: &PageMenu) -> Result<Outcome> {
        match resolve(line, &menu.options, menu.policy) {
            Ok(Resolution::Blank) => {
                self.go_back(menu.page);
                Ok(Outcome::Continue)
            }
            Ok(Resolution::Batch(batch)) => {
                self.apply(batch);
                Ok(Outcome::Continue)
            }
            Err(err) if err.is_user_error() => Ok(Outcome::Rejected(err.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    fn go_back(&mut self, page: Page) {
        let action = match page {
            Page::Main => StoreAction::Finish,
            Page::Glob if self.store.state().glob.is_some() => StoreAction::ClearGlob,
            _ => StoreAction::Navigate(Page::Main),
        };
        self.store.dispatch(action);
    }

    fn apply(&mut self, batch: ResolutionBatch<Entry>) {
        let single = batch.items.len() == 1;
        for item in batch.items {
            let action = match (item.value, item.action) {
                (Entry::Page(page), _) => StoreAction::Navigate(page),
                (Entry::Finish, _) => StoreAction::Finish,
                (Entry::File(path), Action::Select) => StoreAction::Select(path),
                (Entry::File(path), Action::Unselect) => StoreAction::Unselect(path),
                (Entry::Directory(dir) | Entry::Parent(dir), Action::Select) if single => {
                    StoreAction::EnterDirectory(dir)
                }
                (Entry::Directory(dir) | Entry::Parent(dir), _) => {
                    tracing::debug!(dir = %dir.display(), "skipping directory in multi-item batch");
                    continue;
                }
            };
            self.store.dispatch(action);
        }
    }
}
