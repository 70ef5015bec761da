//! Glob search over scanned files.

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};

use crate::app::scan::{FileMetadata, ScanResult};

/// Compiled glob pattern matched against paths relative to the base directory.
#[derive(Debug, Clone)]
pub struct GlobSearch {
    pattern: String,
    matcher: GlobMatcher,
}

impl GlobSearch {
    /// Compile `pattern`.
    ///
    /// A pattern without `/` matches the file name at any depth, so `*.rs` behaves like
    /// `**/*.rs`.
    pub fn new(pattern: &str, case_insensitive: bool) -> Result<Self> {
        let pattern = pattern.trim();
        let effective = if pattern.contains('/') {
            pattern.to_owned()
        } else {
            format!("**/{pattern}")
        };
        let glob = GlobBuilder::new(&effective)
            .case_insensitive(case_insensitive)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid glob pattern '{pattern}'"))?;
        Ok(Self {
            pattern: pattern.to_owned(),
            matcher: glob.compile_matcher(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, meta: &FileMetadata) -> bool {
        !meta.is_dir && self.matcher.is_match(&meta.display_path)
    }

    /// Matching files of `scan`, in scan order.
    pub fn filter<'a>(&self, scan: &'a ScanResult) -> Vec<&'a FileMetadata> {
        scan.files.iter().filter(|meta| self.is_match(meta)).collect()
    }
}
