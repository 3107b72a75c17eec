use crate::config::LogConfig;
use crate::Result;
use log::{info, LevelFilter};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

/// Install a file logger when `config.file` is set.
///
/// The debugger owns the terminal, so diagnostics never go to stdout or
/// stderr. Without a log file the `log` macros are no-ops.
pub fn init(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.file else {
        return Ok(());
    };
    let level = config.level_filter()?;
    let file = File::create(path)?;

    let mut builder = ConfigBuilder::new();
    builder.set_target_level(LevelFilter::Error);
    builder.set_thread_level(LevelFilter::Off);

    WriteLogger::init(level, builder.build(), file)?;
    info!("=== lua-debugger started, logging to {} ===", path.display());
    Ok(())
}
