//! Filesystem scanning services.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder, WalkState};

use crate::infra::config::Config;

const FILEPICK_IGNORE: &str = ".filepickignore";

/// Metadata describing a file or directory found under the base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub path: PathBuf,
    /// Path relative to the base directory, `/`-separated.
    pub display_path: String,
    pub is_dir: bool,
}

impl FileMetadata {
    /// Final path component, used as the matchable menu name.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display_path.clone())
    }
}

/// Result of scanning a base directory.
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    pub files: Vec<FileMetadata>,
    pub root: PathBuf,
}

impl ScanResult {
    /// Only regular files, in display order.
    pub fn regular_files(&self) -> impl Iterator<Item = &FileMetadata> {
        self.files.iter().filter(|meta| !meta.is_dir)
    }
}

/// Configuration inputs for the scanner.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    pub root: PathBuf,
    pub config: Config,
}

impl ScannerConfig {
    pub fn from_root(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }
}

/// Scanner walking the base directory respecting ignore rules.
#[derive(Debug, Default)]
pub struct Scanner;

impl Scanner {
    pub fn new() -> Self {
        Self
    }

    /// Recursively collect every entry below the root.
    pub fn scan(&self, cfg: &ScannerConfig) -> Result<ScanResult> {
        let rules = Arc::new(IgnoreRules::load(&cfg.root, &cfg.config)?);
        let mut builder = walk_builder(&cfg.root, &cfg.root, &cfg.config, rules);

        let files = Mutex::new(Vec::new());
        builder.threads(0).build_parallel().run(|| {
            let files = &files;
            let root = cfg.root.clone();
            Box::new(move |result| match result {
                Ok(entry) => {
                    if let Some(meta) = process_entry(&entry, &root)
                        && let Ok(mut guard) = files.lock()
                    {
                        guard.push(meta);
                    }
                    WalkState::Continue
                }
                Err(err) => {
                    tracing::warn!(error = %err, "scanner error");
                    WalkState::Continue
                }
            })
        });

        let mut files = files.into_inner().unwrap_or_default();
        files.sort_by(|a, b| a.display_path.cmp(&b.display_path));

        Ok(ScanResult {
            files,
            root: cfg.root.clone(),
        })
    }

    /// List the direct children of `dir`, directories first, each group sorted by name.
    ///
    /// Ignore rules are evaluated relative to `cfg.root`.
    pub fn list_directory(&self, cfg: &ScannerConfig, dir: &Path) -> Result<Vec<FileMetadata>> {
        let rules = Arc::new(IgnoreRules::load(&cfg.root, &cfg.config)?);
        let mut builder = walk_builder(&cfg.root, dir, &cfg.config, rules);
        builder.max_depth(Some(1));

        let mut entries = Vec::new();
        for result in builder.build() {
            match result {
                Ok(entry) => {
                    if let Some(meta) = process_entry(&entry, &cfg.root)
                        && entry.path() != dir
                    {
                        entries.push(meta);
                    }
                }
                Err(err) => tracing::warn!(error = %err, dir = %dir.display(), "listing error"),
            }
        }

        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.file_name().to_lowercase().cmp(&b.file_name().to_lowercase()))
        });
        Ok(entries)
    }
}

fn walk_builder(root: &Path, start: &Path, config: &Config, rules: Arc<IgnoreRules>) -> WalkBuilder {
    let mut builder = WalkBuilder::new(start);
    builder
        .git_ignore(true)
        .require_git(false)
        .hidden(!config.defaults.show_hidden)
        .add_custom_ignore_filename(FILEPICK_IGNORE);

    let root = root.to_path_buf();
    builder.filter_entry(move |entry| {
        let Ok(rel) = entry.path().strip_prefix(&root) else {
            return true;
        };
        if rel.as_os_str().is_empty() {
            return true;
        }
        let is_dir = entry.file_type().is_some_and(|kind| kind.is_dir());
        !rules.is_ignored(rel, is_dir)
    });
    builder
}

fn process_entry(entry: &DirEntry, root: &Path) -> Option<FileMetadata> {
    let path = entry.path();
    if path == root {
        return None;
    }

    let file_type = entry.file_type()?;
    let is_dir = if file_type.is_symlink() {
        path.is_dir()
    } else {
        file_type.is_dir()
    };

    Some(FileMetadata {
        path: path.to_path_buf(),
        display_path: to_display_path(root, path),
        is_dir,
    })
}

fn to_display_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Ignore patterns from config and `.filepickignore`, matched against base-relative paths.
///
/// A pattern ending in `/` only matches directories. A pattern without an inner `/` matches
/// that name at any depth, otherwise it is anchored at the base directory. Config `globs` are
/// used as written.
#[derive(Debug, Clone)]
struct IgnoreRules {
    dirs: GlobSet,
    any: GlobSet,
}

impl IgnoreRules {
    fn load(root: &Path, config: &Config) -> Result<Self> {
        let mut dirs = GlobSetBuilder::new();
        let mut any = GlobSetBuilder::new();

        let file_patterns = read_ignore_file(&root.join(FILEPICK_IGNORE))?;
        let patterns = config
            .ignore
            .paths
            .iter()
            .chain(&file_patterns)
            .map(String::as_str)
            .chain([FILEPICK_IGNORE]);
        for raw in patterns {
            let Some((glob, dir_only)) = path_pattern(raw) else {
                continue;
            };
            let glob = Glob::new(&glob).with_context(|| format!("invalid ignore pattern '{raw}'"))?;
            if dir_only {
                dirs.add(glob);
            } else {
                any.add(glob);
            }
        }

        for raw in &config.ignore.globs {
            any.add(Glob::new(raw).with_context(|| format!("invalid ignore glob '{raw}'"))?);
        }

        Ok(Self {
            dirs: dirs.build().context("failed to build ignore matcher")?,
            any: any.build().context("failed to build ignore matcher")?,
        })
    }

    fn is_ignored(&self, rel: &Path, is_dir: bool) -> bool {
        self.any.is_match(rel) || (is_dir && self.dirs.is_match(rel))
    }
}

/// Glob text for an ignore path plus whether it is directory-only.
fn path_pattern(raw: &str) -> Option<(String, bool)> {
    let trimmed = raw.trim();
    let dir_only = trimmed.ends_with('/');
    let body = trimmed.trim_matches('/');
    if body.is_empty() {
        return None;
    }
    let anchored = trimmed.starts_with('/') || body.contains('/');
    let glob = if anchored {
        body.to_owned()
    } else {
        format!("**/{body}")
    };
    Some((glob, dir_only))
}

fn read_ignore_file(path: &Path) -> Result<Vec<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect())
}
