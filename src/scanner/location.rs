use serde::Serialize;
use std::fmt;

/// A source position announced by the debugger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    pub path: String,
    /// 1-based
    pub line: u32,
}

impl Location {
    pub fn new(path: impl Into<String>, line: u32) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }

    /// Build a location from the captured `file`/`line` fields of a marker.
    ///
    /// Returns `None` when the line number overflows or is zero.
    pub(crate) fn from_fields(file: &str, line: &str) -> Option<Self> {
        match line.parse::<u32>() {
            Ok(line) if line > 0 => Some(Self::new(file, line)),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}
