//! Menus shown by each page, rebuilt from the store state on every render.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::app::menu::MenuOptionSet;
use crate::app::scan::{Scanner, ScannerConfig};
use crate::app::search::GlobSearch;
use crate::app::store::StoreState;
use crate::domain::model::{Page, Policy};
use crate::domain::signal::format_error;
use crate::infra::config::Config;
use crate::infra::git::GitClient;

/// Payload carried by a menu option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Page(Page),
    Finish,
    Parent(PathBuf),
    Directory(PathBuf),
    File(PathBuf),
}

/// How the next line of input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Resolved against the menu options.
    Query,
    /// Taken verbatim as a glob pattern.
    Pattern,
}

/// A fully built menu ready to render and resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMenu {
    pub page: Page,
    pub title: String,
    pub options: MenuOptionSet<Entry>,
    pub policy: Policy,
    pub input: InputMode,
    /// Shown instead of, or below, the options.
    pub note: Option<String>,
}

impl PageMenu {
    fn query(page: Page, title: String, options: MenuOptionSet<Entry>, policy: Policy) -> Self {
        Self {
            page,
            title,
            options,
            policy,
            input: InputMode::Query,
            note: None,
        }
    }

    fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Collaborators the pages read from: the filesystem scanner and git.
pub struct PageContext {
    scanner: Scanner,
    scanner_cfg: ScannerConfig,
    git: GitClient,
    case_insensitive_glob: bool,
}

impl PageContext {
    pub fn new(base_dir: PathBuf, config: Config) -> Self {
        let git = GitClient::discover(&base_dir);
        let case_insensitive_glob = config.defaults.case_insensitive_glob;
        Self {
            scanner: Scanner::new(),
            scanner_cfg: ScannerConfig::from_root(base_dir, config),
            git,
            case_insensitive_glob,
        }
    }

    /// Build the menu for the state's current page.
    pub fn build(&self, state: &StoreState) -> Result<PageMenu> {
        match state.page {
            Page::Main => Ok(main_menu(state)),
            Page::Directories => self.directories(state),
            Page::Files => self.files(state),
            Page::Glob => self.glob(state),
            Page::Changed => self.changed(state),
            Page::Review => Ok(review(state)),
        }
    }

    pub fn case_insensitive_glob(&self) -> bool {
        self.case_insensitive_glob
    }

    fn directories(&self, state: &StoreState) -> Result<PageMenu> {
        let mut entries = Vec::new();
        if state.cwd != state.base_dir
            && let Some(parent) = state.cwd.parent()
        {
            entries.push(("..".to_owned(), "../".to_owned(), Entry::Parent(parent.to_path_buf()), false));
        }

        for meta in self.scanner.list_directory(&self.scanner_cfg, &state.cwd)? {
            let name = meta.file_name();
            if meta.is_dir {
                entries.push((name.clone(), format!("{name}/"), Entry::Directory(meta.path), false));
            } else {
                let selected = state.selection.contains(&meta.path);
                entries.push((name.clone(), name, Entry::File(meta.path), selected));
            }
        }

        let title = format!("{} ({})", Page::Directories.title(), display_dir(state, &state.cwd));
        let menu = PageMenu::query(
            Page::Directories,
            title,
            MenuOptionSet::from_entries(entries),
            Policy::many(),
        );
        Ok(if menu.options.is_empty() {
            menu.with_note("Empty directory.")
        } else {
            menu
        })
    }

    fn files(&self, state: &StoreState) -> Result<PageMenu> {
        let scan = self.scanner.scan(&self.scanner_cfg)?;
        let options = file_options(state, scan.regular_files().map(|meta| meta.path.clone()));
        let menu = PageMenu::query(Page::Files, Page::Files.title().to_owned(), options, Policy::many());
        Ok(if menu.options.is_empty() {
            menu.with_note("No files found.")
        } else {
            menu
        })
    }

    fn glob(&self, state: &StoreState) -> Result<PageMenu> {
        let Some(pattern) = state.glob.as_deref() else {
            return Ok(pattern_prompt(None));
        };
        let search = match GlobSearch::new(pattern, self.case_insensitive_glob) {
            Ok(search) => search,
            Err(err) => {
                tracing::debug!(error = %err, "stored glob pattern does not compile");
                return Ok(pattern_prompt(Some(format_error(pattern))));
            }
        };

        let scan = self.scanner.scan(&self.scanner_cfg)?;
        let options = file_options(
            state,
            search.filter(&scan).into_iter().map(|meta| meta.path.clone()),
        );
        let title = format!("{} ({})", Page::Glob.title(), search.pattern());
        let menu = PageMenu::query(Page::Glob, title, options, Policy::many());
        Ok(if menu.options.is_empty() {
            menu.with_note("No files match; press enter to try another pattern.")
        } else {
            menu
        })
    }

    fn changed(&self, state: &StoreState) -> Result<PageMenu> {
        let menu = |options| {
            PageMenu::query(Page::Changed, Page::Changed.title().to_owned(), options, Policy::many())
        };
        if self.git.work_dir().is_none() {
            return Ok(menu(MenuOptionSet::default()).with_note("Not inside a git repository."));
        }

        let changed = match self.git.changed_files() {
            Ok(files) => files,
            Err(err) => {
                tracing::warn!(error = %err, "failed to list changed files");
                return Ok(menu(MenuOptionSet::default()).with_note(format!("git failed: {err}")));
            }
        };
        let within_base = changed
            .into_iter()
            .filter(|path| path.starts_with(&state.base_dir));
        let menu = menu(file_options(state, within_base));
        Ok(if menu.options.is_empty() {
            menu.with_note("No changed files.")
        } else {
            menu
        })
    }
}

/// Glob page waiting for a pattern, optionally explaining why the last one was refused.
fn pattern_prompt(error: Option<String>) -> PageMenu {
    let hint = "Enter a glob pattern, e.g. src/**/*.rs (blank to go back).";
    let note = match error {
        Some(error) => format!("{error}\n{hint}"),
        None => hint.to_owned(),
    };
    let mut menu = PageMenu::query(
        Page::Glob,
        Page::Glob.title().to_owned(),
        MenuOptionSet::default(),
        Policy::many(),
    )
    .with_note(note);
    menu.input = InputMode::Pattern;
    menu
}

fn main_menu(state: &StoreState) -> PageMenu {
    let count = state.selection.len();
    let mut entries: Vec<(String, String, Entry, bool)> = [
        Page::Directories,
        Page::Files,
        Page::Glob,
        Page::Changed,
    ]
    .into_iter()
    .map(|page| (page.name().to_owned(), page.title().to_owned(), Entry::Page(page), false))
    .collect();
    entries.push((
        Page::Review.name().to_owned(),
        format!("{} ({count})", Page::Review.title()),
        Entry::Page(Page::Review),
        false,
    ));
    entries.push(("done".to_owned(), "Done".to_owned(), Entry::Finish, false));

    PageMenu::query(
        Page::Main,
        Page::Main.title().to_owned(),
        MenuOptionSet::from_entries(entries),
        Policy::single(),
    )
}

fn review(state: &StoreState) -> PageMenu {
    let entries = state.selection.items().iter().map(|path| {
        let name = state.relative(path).into_owned();
        (name.clone(), name, Entry::File(path.clone()), true)
    });
    let menu = PageMenu::query(
        Page::Review,
        Page::Review.title().to_owned(),
        MenuOptionSet::from_entries(entries),
        Policy::many(),
    );
    if menu.options.is_empty() {
        menu.with_note("Nothing selected yet.")
    } else {
        menu
    }
}

fn file_options(
    state: &StoreState,
    paths: impl IntoIterator<Item = PathBuf>,
) -> MenuOptionSet<Entry> {
    MenuOptionSet::from_entries(paths.into_iter().map(|path| {
        let name = state.relative(&path).into_owned();
        let selected = state.selection.contains(&path);
        (name.clone(), name, Entry::File(path), selected)
    }))
}

fn display_dir(state: &StoreState, dir: &Path) -> String {
    if dir == state.base_dir {
        ".".to_owned()
    } else {
        format!("{}/", state.relative(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    fn fixture() -> Result<TempDir> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("src/bin"))?;
        fs::write(root.join("README.md"), "readme")?;
        fs::write(root.join("src/lib.rs"), "lib")?;
        fs::write(root.join("src/main.rs"), "main")?;
        fs::write(root.join("src/bin/tool.rs"), "tool")?;
        Ok(temp)
    }

    fn names(menu: &PageMenu) -> Vec<String> {
        menu.options.iter().map(|option| option.name.clone()).collect()
    }

    #[test]
    fn main_menu_lists_pages_and_done() {
        let mut state = StoreState::new("/repo", Page::Main);
        state.selection.add("/repo/a.rs");
        let menu = main_menu(&state);

        assert_eq!(
            names(&menu),
            vec!["directories", "files", "glob", "changed", "review", "done"]
        );
        assert_eq!(menu.policy, Policy::single());
        assert_eq!(menu.options.get(5).unwrap().label, "Review selection (1)");
        assert_eq!(menu.options.value_of(6), Ok(&Entry::Finish));
    }

    #[test]
    fn directory_page_offers_parent_below_base() -> Result<()> {
        let temp = fixture()?;
        let root = temp.path().to_path_buf();
        let context = PageContext::new(root.clone(), Config::default());

        let mut state = StoreState::new(&root, Page::Directories);
        let top = context.build(&state)?;
        assert_eq!(names(&top), vec!["src", "README.md"]);
        assert_eq!(top.options.get(1).unwrap().label, "src/");

        state.cwd = root.join("src");
        state.selection.add(root.join("src/lib.rs"));
        let nested = context.build(&state)?;
        assert_eq!(names(&nested), vec!["..", "bin", "lib.rs", "main.rs"]);
        assert_eq!(nested.options.value_of(1), Ok(&Entry::Parent(root.clone())));
        assert!(nested.options.get(3).unwrap().is_selected);
        assert!(!nested.options.get(4).unwrap().is_selected);
        assert_eq!(nested.title, "Browse directories (src/)");
        Ok(())
    }

    #[test]
    fn files_page_lists_everything_relative_to_base() -> Result<()> {
        let temp = fixture()?;
        let root = temp.path().to_path_buf();
        let context = PageContext::new(root.clone(), Config::default());

        let menu = context.build(&StoreState::new(&root, Page::Files))?;
        assert_eq!(
            names(&menu),
            vec!["README.md", "src/bin/tool.rs", "src/lib.rs", "src/main.rs"]
        );
        assert_eq!(
            menu.options.value_of(3),
            Ok(&Entry::File(root.join("src/lib.rs")))
        );
        Ok(())
    }

    #[test]
    fn glob_page_asks_for_a_pattern_first() -> Result<()> {
        let temp = fixture()?;
        let root = temp.path().to_path_buf();
        let context = PageContext::new(root.clone(), Config::default());

        let mut state = StoreState::new(&root, Page::Glob);
        let prompt = context.build(&state)?;
        assert_eq!(prompt.input, InputMode::Pattern);
        assert!(prompt.options.is_empty());

        state.glob = Some("src/*.rs".into());
        let menu = context.build(&state)?;
        assert_eq!(menu.input, InputMode::Query);
        assert_eq!(names(&menu), vec!["src/lib.rs", "src/main.rs"]);
        assert_eq!(menu.title, "Search by glob (src/*.rs)");
        Ok(())
    }

    #[test]
    fn invalid_stored_glob_falls_back_to_pattern_input() -> Result<()> {
        let temp = fixture()?;
        let root = temp.path().to_path_buf();
        let context = PageContext::new(root.clone(), Config::default());

        let mut state = StoreState::new(&root, Page::Glob);
        state.glob = Some("src/[".into());
        let menu = context.build(&state)?;
        assert_eq!(menu.input, InputMode::Pattern);
        assert!(menu.options.is_empty());
        assert_eq!(
            menu.note.as_deref(),
            Some("Huh (src/[)?\nEnter a glob pattern, e.g. src/**/*.rs (blank to go back).")
        );
        Ok(())
    }

    #[test]
    fn review_page_shows_selection_in_pick_order() {
        let mut state = StoreState::new("/repo", Page::Review);
        assert_eq!(review(&state).note.as_deref(), Some("Nothing selected yet."));

        state.selection.add("/repo/z.rs");
        state.selection.add("/repo/a.rs");
        let menu = review(&state);
        assert_eq!(names(&menu), vec!["z.rs", "a.rs"]);
        assert!(menu.options.iter().all(|option| option.is_selected));
    }
}
