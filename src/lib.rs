//! Front end for line-oriented Lua debuggers.
//!
//! The debugger's output is streamed through a [`MarkerScanner`], which
//! passes text through to the terminal and keeps track of the source
//! location the debugger last stopped at.

pub mod config;
pub mod debugger;
mod error;
pub mod events;
pub mod executor;
pub mod logging;
pub mod scanner;

pub use error::{Error, Result};
pub use scanner::{Location, MarkerScanner};
