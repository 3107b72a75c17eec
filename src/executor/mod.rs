mod runner;

pub use runner::{drive, run_debugger};
