//! Git integration utilities.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow};

/// Lightweight wrapper around [`gix::Repository`] discovery for locating changed files.
///
/// `gix` only finds the repository and its work tree. Listing changes shells out to the `git`
/// executable, which must be on `PATH`.
#[derive(Default)]
pub struct GitClient {
    repo: Option<gix::Repository>,
}

impl GitClient {
    /// Attempt to locate a git repository starting from `path`.
    pub fn discover(path: impl AsRef<Path>) -> Self {
        let repo = match gix::discover(path.as_ref()) {
            Ok(repo) => Some(repo),
            Err(err) => {
                tracing::debug!(path = %path.as_ref().display(), error = %err, "no git repository");
                None
            }
        };
        Self { repo }
    }

    /// Root of the work tree, when a non-bare repository was found.
    pub fn work_dir(&self) -> Option<PathBuf> {
        self.repo
            .as_ref()
            .and_then(|repo| repo.work_dir())
            .map(Path::to_path_buf)
    }

    /// Absolute paths of files that differ from `HEAD` or are untracked and not ignored.
    ///
    /// Deleted files are omitted since there is nothing left to pick. Returns an empty list when
    /// no repository was discovered. Runs `git status`, so a missing `git` binary is an error.
    pub fn changed_files(&self) -> Result<Vec<PathBuf>> {
        let Some(root) = self.work_dir() else {
            return Ok(Vec::new());
        };

        let output = Command::new("git")
            .arg("-C")
            .arg(&root)
            .args(["status", "--porcelain=v1", "-z", "--untracked-files=all"])
            .output()
            .context("failed to run git status")?;
        if !output.status.success() {
            return Err(anyhow!(
                "git status exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_porcelain(&stdout)
            .into_iter()
            .map(|relative| root.join(relative))
            .filter(|path| path.is_file())
            .collect())
    }
}

/// Extract paths from `git status --porcelain=v1 -z` output, sorted and deduplicated.
fn parse_porcelain(output: &str) -> Vec<String> {
    let mut paths = BTreeSet::new();
    let mut records = output.split('\0').filter(|record| !record.is_empty());
    while let Some(record) = records.next() {
        let Some((status, path)) = record.split_at_checked(2) else {
            continue;
        };
        let path = path.trim_start();
        if !path.is_empty() {
            paths.insert(path.to_owned());
        }
        // Renames and copies carry the source path as a separate record.
        if status.starts_with(['R', 'C']) {
            records.next();
        }
    }
    paths.into_iter().collect()
}
