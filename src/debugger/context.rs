use super::decode::Utf8Decoder;
use crate::scanner::{Location, MarkerScanner};

/// Result of pushing one read of debugger output through the context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputUpdate {
    /// Text to display now.
    pub text: String,
    /// Set when at least one marker was recognized in this read; holds the
    /// location of the last one.
    pub stop: Option<Location>,
}

/// Per-session view of the debugger's output stream.
#[derive(Debug)]
pub struct DebugContext {
    decoder: Utf8Decoder,
    scanner: MarkerScanner,
}

impl DebugContext {
    pub fn new(max_pending: Option<usize>) -> Self {
        Self {
            decoder: Utf8Decoder::new(),
            scanner: MarkerScanner::with_max_pending(max_pending),
        }
    }

    pub fn current_location(&self) -> Option<&Location> {
        self.scanner.current_location()
    }

    pub fn on_output(&mut self, bytes: &[u8]) -> OutputUpdate {
        let text = self.decoder.decode(bytes);
        self.scan(&text)
    }

    /// Flush everything still held back at the end of the session.
    pub fn close(&mut self) -> OutputUpdate {
        let tail = self.decoder.finish();
        let mut update = self.scan(&tail);
        update.text.push_str(&self.scanner.finish());
        update
    }

    fn scan(&mut self, text: &str) -> OutputUpdate {
        let seen_before = self.scanner.markers_seen();
        let text = self.scanner.feed(text);
        let stop = if self.scanner.markers_seen() > seen_before {
            self.scanner.current_location().cloned()
        } else {
            None
        };
        OutputUpdate { text, stop }
    }
}
