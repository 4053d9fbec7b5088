//! Workspace automation tasks, invoked as `cargo run -p xtask -- <task>`.

use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "xtask", about = "Project automation tasks", version)]
struct Args {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand, Debug)]
enum Task {
    /// Build and run the clock probe in release mode.
    Probe {
        /// Extra arguments passed through to netport-probe.
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
    /// Run unit and integration tests across the workspace.
    Test,
    /// Run the full acceptance suite, including ignored soak tests.
    Soak,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.task {
        Task::Probe { args } => {
            let mut cmd = vec![
                "run".to_string(),
                "--release".to_string(),
                "-p".to_string(),
                "netport-probe".to_string(),
                "--".to_string(),
            ];
            cmd.extend(args);
            run_cargo(&cmd)
        }
        Task::Test => run_cargo(&["test".to_string(), "--workspace".to_string()]),
        Task::Soak => run_cargo(&[
            "test".to_string(),
            "--test".to_string(),
            "acceptance_tests".to_string(),
            "--".to_string(),
            "--include-ignored".to_string(),
        ]),
    }
}

fn run_cargo(args: &[String]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .status()
        .with_context(|| format!("failed to spawn cargo {}", args.join(" ")))?;

    if !status.success() {
        bail!("cargo {} exited with {status}", args.join(" "));
    }
    Ok(())
}
