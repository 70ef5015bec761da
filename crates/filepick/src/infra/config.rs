//! Configuration management utilities.
//!
//! Layers apply in order: built-in defaults, user file, workspace file, environment. A layer only
//! overrides the keys it sets; ignore lists accumulate.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::domain::model::Page;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
const USER_CONFIG_PATH: &str = "filepick/config.toml";
const WORKSPACE_CONFIG_PATH: &str = ".filepick/config.toml";
const BASE_DIR_ENV: &str = "FILEPICK_BASE_DIR";
const SHOW_HIDDEN_ENV: &str = "FILEPICK_SHOW_HIDDEN";

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub defaults: Defaults,
    pub ignore: Ignore,
    pub prompt: Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub base_dir: Option<PathBuf>,
    pub start_page: Page,
    pub show_hidden: bool,
    pub case_insensitive_glob: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            base_dir: None,
            start_page: Page::Main,
            show_hidden: false,
            case_insensitive_glob: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ignore {
    /// Directory or file names skipped at any depth.
    pub paths: Vec<String>,
    pub globs: Vec<String>,
}

impl Default for Ignore {
    fn default() -> Self {
        Self {
            paths: vec!["target/".into(), "node_modules/".into(), ".git/".into()],
            globs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub symbol: String,
}

impl Default for Prompt {
    fn default() -> Self {
        Self {
            symbol: "> ".into(),
        }
    }
}

/// One configuration source as written on disk. Unset keys leave earlier layers alone.
#[derive(Debug, Default, Deserialize)]
struct Layer {
    #[serde(default)]
    defaults: DefaultsLayer,
    #[serde(default)]
    ignore: IgnoreLayer,
    #[serde(default)]
    prompt: PromptLayer,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultsLayer {
    base_dir: Option<PathBuf>,
    start_page: Option<Page>,
    show_hidden: Option<bool>,
    case_insensitive_glob: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct IgnoreLayer {
    #[serde(default)]
    paths: Vec<String>,
    #[serde(default)]
    globs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PromptLayer {
    symbol: Option<String>,
}

impl Layer {
    fn parse(contents: &str, origin: &str) -> Result<Self> {
        toml::from_str(contents).with_context(|| format!("failed to parse {origin}"))
    }

    /// Read a config file; a missing file is not an error.
    fn read(path: &Path) -> Result<Option<Self>> {
        match fs::read_to_string(path) {
            Ok(data) => Self::parse(&data, &path.display().to_string()).map(Some),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err)
                .with_context(|| format!("failed to read config file: {}", path.display())),
        }
    }

    fn from_env(var: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            defaults: DefaultsLayer {
                base_dir: var(BASE_DIR_ENV)
                    .filter(|value| !value.trim().is_empty())
                    .map(PathBuf::from),
                show_hidden: var(SHOW_HIDDEN_ENV).map(|value| parse_flag(&value)),
                ..DefaultsLayer::default()
            },
            ..Layer::default()
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Where the on-disk layers live.
#[derive(Debug, Clone, Default)]
struct ConfigPaths {
    user: Option<PathBuf>,
    workspace: Option<PathBuf>,
}

impl ConfigPaths {
    fn discover(cwd: &Path) -> Self {
        let root = find_repo_root(cwd).unwrap_or_else(|| cwd.to_path_buf());
        Self {
            user: config_dir().map(|dir| dir.join(USER_CONFIG_PATH)),
            workspace: Some(root.join(WORKSPACE_CONFIG_PATH)),
        }
    }

    fn files(&self) -> impl Iterator<Item = &Path> {
        self.user
            .iter()
            .chain(self.workspace.iter())
            .map(PathBuf::as_path)
    }
}

impl Config {
    /// Load configuration from defaults, user config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let cwd = env::current_dir().context("failed to read current directory")?;
        Self::load_from(&ConfigPaths::discover(&cwd), |key| env::var(key).ok())
    }

    fn load_from(paths: &ConfigPaths, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Config::default();
        config.apply(Layer::parse(&DEFAULT_CONFIG, "built-in config")?);

        for path in paths.files() {
            if let Some(layer) = Layer::read(path)? {
                tracing::debug!(path = %path.display(), "loaded config layer");
                config.apply(layer);
            }
        }

        config.apply(Layer::from_env(var));
        Ok(config)
    }

    fn apply(&mut self, layer: Layer) {
        let Layer {
            defaults,
            ignore,
            prompt,
        } = layer;

        if let Some(base_dir) = defaults.base_dir {
            self.defaults.base_dir = Some(base_dir);
        }
        if let Some(page) = defaults.start_page {
            self.defaults.start_page = page;
        }
        if let Some(show_hidden) = defaults.show_hidden {
            self.defaults.show_hidden = show_hidden;
        }
        if let Some(case_insensitive) = defaults.case_insensitive_glob {
            self.defaults.case_insensitive_glob = case_insensitive;
        }

        extend_unique(&mut self.ignore.paths, ignore.paths);
        extend_unique(&mut self.ignore.globs, ignore.globs);

        if let Some(symbol) = prompt.symbol {
            self.prompt.symbol = symbol;
        }
    }
}

fn extend_unique(into: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !into.contains(&value) {
            into.push(value);
        }
    }
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}
