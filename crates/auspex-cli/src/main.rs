//! `auspex` command line.

mod cli;
mod commands;
mod output;

use std::io::{self, Write};
use std::process::ExitCode;

use auspex::FolderConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::Output;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match cli.base_dir {
        Some(dir) => FolderConfig::new(dir),
        None => FolderConfig::from_env(),
    };

    match commands::run(cli.command, config, cli.output).and_then(write_output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let label = console::style("error:").red().bold().for_stderr();
            eprintln!("{label} {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn write_output(output: Output) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    match output {
        Output::Render(text) => stdout.write_all(text.as_bytes())?,
        Output::Json(value) => {
            serde_json::to_writer_pretty(&mut stdout, &value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
