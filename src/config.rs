//! Runtime configuration, loaded from an optional JSON file.
//!
//! Every field has a default so an empty object (or no file at all) is a
//! valid configuration. Command-line flags are applied on top by `main`.

use crate::scanner::DEFAULT_MAX_PENDING;
use crate::{Error, Result};
use log::LevelFilter;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub debugger: DebuggerConfig,
    pub scanner: ScannerConfig,
    pub log: LogConfig,
    /// Write JSON-lines stop events to stderr.
    pub events: bool,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebuggerConfig {
    /// Full command line, shell-quoted.
    pub command: String,
    pub cwd: Option<PathBuf>,
}

impl Default for DebuggerConfig {
    fn default() -> Self {
        Self {
            command: "lua".to_string(),
            cwd: None,
        }
    }
}

impl DebuggerConfig {
    /// Split `command` into program and arguments.
    pub fn argv(&self) -> Result<Vec<String>> {
        let argv = shlex::split(&self.command)
            .ok_or_else(|| Error::BadCommandLine(self.command.clone()))?;
        if argv.is_empty() {
            return Err(Error::EmptyCommand);
        }
        Ok(argv)
    }

    /// Replace `command` with an already split argument list.
    pub fn set_argv(&mut self, argv: &[String]) -> Result<()> {
        self.command = shlex::try_join(argv.iter().map(String::as_str))
            .map_err(|e| Error::BadCommandLine(e.to_string()))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// `null` keeps a pending marker prefix for as long as it takes.
    pub max_pending_bytes: Option<usize>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_pending_bytes: Some(DEFAULT_MAX_PENDING),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// No file means no logger is installed.
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(self.level.trim()).map_err(|_| Error::LogLevel(self.level.clone()))
    }
}
