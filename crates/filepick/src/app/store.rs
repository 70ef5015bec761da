//! Unidirectional state container for the picker session.

use std::path::{Path, PathBuf};

use crate::app::selection::FileSelection;
use crate::domain::model::Page;

/// Lifecycle of a picker session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Running,
    Finished,
    Cancelled,
}

/// Everything the pages need to build their menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreState {
    pub page: Page,
    pub base_dir: PathBuf,
    /// Directory shown by the directory browser; always inside `base_dir`.
    pub cwd: PathBuf,
    pub glob: Option<String>,
    pub selection: FileSelection,
    pub status: Status,
}

impl StoreState {
    pub fn new(base_dir: impl Into<PathBuf>, page: Page) -> Self {
        let base_dir = base_dir.into();
        Self {
            page,
            cwd: base_dir.clone(),
            base_dir,
            glob: None,
            selection: FileSelection::new(),
            status: Status::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// `path` relative to the base directory, or the full path when it lies outside.
    pub fn relative<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        match path.strip_prefix(&self.base_dir) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative.to_string_lossy(),
            _ => path.to_string_lossy(),
        }
    }
}

/// Every state change goes through one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAction {
    Navigate(Page),
    EnterDirectory(PathBuf),
    Select(PathBuf),
    Unselect(PathBuf),
    SetGlob(String),
    ClearGlob,
    Finish,
    Cancel,
}

/// Owns the state and applies actions to it.
#[derive(Debug, Clone)]
pub struct Store {
    state: StoreState,
}

impl Store {
    pub fn new(state: StoreState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn into_state(self) -> StoreState {
        self.state
    }

    pub fn dispatch(&mut self, action: StoreAction) {
        if !self.state.is_running() {
            tracing::debug!(?action, "ignoring action after session ended");
            return;
        }
        tracing::debug!(?action, "dispatch");
        reduce(&mut self.state, action);
    }
}

fn reduce(state: &mut StoreState, action: StoreAction) {
    match action {
        StoreAction::Navigate(page) => state.page = page,
        StoreAction::EnterDirectory(dir) => {
            if dir.starts_with(&state.base_dir) {
                state.cwd = dir;
            } else {
                tracing::warn!(dir = %dir.display(), "refusing to leave the base directory");
            }
        }
        StoreAction::Select(path) => {
            state.selection.add(path);
        }
        StoreAction::Unselect(path) => {
            state.selection.remove(&path);
        }
        StoreAction::SetGlob(pattern) => state.glob = Some(pattern),
        StoreAction::ClearGlob => state.glob = None,
        StoreAction::Finish => state.status = Status::Finished,
        StoreAction::Cancel => state.status = Status::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        Store::new(StoreState::new("/repo", Page::Main))
    }

    #[test]
    fn navigation_and_selection() {
        let mut store = store();
        store.dispatch(StoreAction::Navigate(Page::Files));
        store.dispatch(StoreAction::Select("/repo/a.rs".into()));
        store.dispatch(StoreAction::Select("/repo/b.rs".into()));
        store.dispatch(StoreAction::Unselect("/repo/a.rs".into()));

        let state = store.state();
        assert_eq!(state.page, Page::Files);
        assert_eq!(state.selection.items(), &[PathBuf::from("/repo/b.rs")]);
    }

    #[test]
    fn directory_changes_stay_inside_base() {
        let mut store = store();
        store.dispatch(StoreAction::EnterDirectory("/repo/src".into()));
        assert_eq!(store.state().cwd, PathBuf::from("/repo/src"));

        store.dispatch(StoreAction::EnterDirectory("/etc".into()));
        assert_eq!(store.state().cwd, PathBuf::from("/repo/src"));

        store.dispatch(StoreAction::EnterDirectory("/repo".into()));
        assert_eq!(store.state().cwd, PathBuf::from("/repo"));
    }

    #[test]
    fn glob_pattern_can_be_set_and_cleared() {
        let mut store = store();
        store.dispatch(StoreAction::SetGlob("*.rs".into()));
        assert_eq!(store.state().glob.as_deref(), Some("*.rs"));
        store.dispatch(StoreAction::ClearGlob);
        assert!(store.state().glob.is_none());
    }

    #[test]
    fn finished_sessions_ignore_further_actions() {
        let mut store = store();
        store.dispatch(StoreAction::Finish);
        store.dispatch(StoreAction::Select("/repo/late.rs".into()));
        store.dispatch(StoreAction::Cancel);

        let state = store.into_state();
        assert_eq!(state.status, Status::Finished);
        assert!(state.selection.is_empty());
    }

    #[test]
    fn relative_paths_fall_back_to_absolute() {
        let state = StoreState::new("/repo", Page::Main);
        assert_eq!(state.relative(Path::new("/repo/src/lib.rs")), "src/lib.rs");
        assert_eq!(state.relative(Path::new("/other/x.rs")), "/other/x.rs");
    }
}
