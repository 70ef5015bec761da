mod cli;

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use filepick::app::picker::PickOptions;
use filepick::infra::config::Config;

use crate::cli::Cli;

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    filepick::init(args.verbose);

    if let Some(shell) = args.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "filepick", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = Config::load()?;
    if args.hidden {
        config.defaults.show_hidden = true;
    }
    let base_dir = args.resolve_base_dir(&config)?;
    let start_page = args.start_page(&config);
    tracing::debug!(base_dir = %base_dir.display(), page = %start_page, "starting picker");

    let mut options = PickOptions::new(base_dir, config);
    options.start_page = start_page;
    options.glob = args.glob.clone();

    let Some(paths) = filepick::pick(options)? else {
        return Ok(ExitCode::FAILURE);
    };

    let rendered = format_paths(&paths, &args)?;
    match &args.output {
        Some(file) => fs::write(file, rendered)
            .with_context(|| format!("failed to write {}", file.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn format_paths(paths: &[PathBuf], args: &Cli) -> Result<String> {
    if args.json {
        let mut json = serde_json::to_string_pretty(paths).context("failed to encode paths")?;
        json.push('\n');
        return Ok(json);
    }
    let terminator = if args.null { '\0' } else { '\n' };
    Ok(paths
        .iter()
        .map(|path| format!("{}{terminator}", path.display()))
        .collect())
}
