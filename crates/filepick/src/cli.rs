use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_complete::Shell;

use filepick::domain::model::Page;
use filepick::infra::config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "filepick",
    version,
    about = "Pick files interactively and print their paths"
)]
pub struct Cli {
    /// Directory to pick from (default: config, then the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Page to open first
    #[arg(long, value_enum, value_name = "PAGE")]
    pub start: Option<Page>,

    /// Preload a glob pattern and open the glob page
    #[arg(short, long, value_name = "PATTERN")]
    pub glob: Option<String>,

    /// Include hidden files and directories
    #[arg(long)]
    pub hidden: bool,

    /// Print the picked paths as a JSON array
    #[arg(long, conflicts_with = "null")]
    pub json: bool,

    /// Separate picked paths with NUL instead of newline
    #[arg(short = '0', long)]
    pub null: bool,

    /// Write the result to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn resolve_base_dir(&self, config: &Config) -> Result<PathBuf> {
        let dir = match self.base_dir.as_ref().or(config.defaults.base_dir.as_ref()) {
            Some(dir) => dir.clone(),
            None => env::current_dir().context("failed to read current directory")?,
        };
        dir.canonicalize()
            .with_context(|| format!("base directory not found: {}", dir.display()))
    }

    pub fn start_page(&self, config: &Config) -> Page {
        match (self.start, &self.glob) {
            (Some(page), _) => page,
            (None, Some(_)) => Page::Glob,
            (None, None) => config.defaults.start_page,
        }
    }
}
