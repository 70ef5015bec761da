//! Infrastructure adapters for git, config, and logging.

pub mod config;
pub mod git;
pub mod logging;
