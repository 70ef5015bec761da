use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(author, version, about = "Project automation commands", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the filepick test suite through cargo nextest
    Nextest {
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        release: bool,
        /// Only run tests whose name contains FILTER
        filter: Option<String>,
    },
    /// Review pending menu rendering snapshots with cargo insta
    Snapshots,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Nextest {
            profile,
            release,
            filter,
        } => run_nextest(profile, release, filter)?,
        Commands::Snapshots => {
            run_cargo(Command::new("cargo").args(["insta", "review", "-p", "filepick"]))?
        }
    }
    Ok(())
}

fn run_nextest(profile: Option<String>, release: bool, filter: Option<String>) -> Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["nextest", "run", "-p", "filepick"]);
    if let Some(profile) = profile {
        cmd.arg("--profile").arg(profile);
    }
    if release {
        cmd.arg("--release");
    }
    if let Some(filter) = filter {
        cmd.arg(filter);
    }
    run_cargo(&mut cmd)
}

fn run_cargo(cmd: &mut Command) -> Result<()> {
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{cmd:?} failed");
    }
    Ok(())
}
