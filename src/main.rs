use clap::Parser;
use log::info;
use lua_debugger::config::Config;
use lua_debugger::{executor, logging, Result};
use std::path::PathBuf;

/// Run a debugger.lua session and track where it is stopped.
#[derive(Debug, Parser)]
#[command(name = "lua-debugger", version)]
struct Cli {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write diagnostics to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    /// Print JSON-lines stop events to stderr
    #[arg(long)]
    events: bool,

    /// Cap on text held back as a possible marker, in bytes (0 = no cap)
    #[arg(long)]
    max_pending: Option<usize>,

    /// Debugger command line, e.g. `lua script.lua`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    apply_cli(&mut config, &cli)?;

    logging::init(&config.log)?;
    info!("debugger command: {}", config.debugger.command);

    let code = executor::run_debugger(&config)?;
    info!("session finished");

    match code {
        Some(0) => Ok(()),
        Some(code) => std::process::exit(code),
        None => std::process::exit(1),
    }
}

fn apply_cli(config: &mut Config, cli: &Cli) -> Result<()> {
    if !cli.command.is_empty() {
        config.debugger.set_argv(&cli.command)?;
    }
    if let Some(file) = &cli.log_file {
        config.log.file = Some(file.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if cli.events {
        config.events = true;
    }
    if let Some(max) = cli.max_pending {
        config.scanner.max_pending_bytes = (max > 0).then_some(max);
    }
    Ok(())
}
