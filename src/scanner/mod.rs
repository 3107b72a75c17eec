//! Incremental extraction of location markers from debugger output.
//!
//! The debugger writes free-form text interleaved with frame announcements
//! such as `Inspecting frame: foo.lua:42 in upvalue 'dbg'`. Output arrives in
//! arbitrary chunks, so a marker can be split across two reads. The scanner
//! buffers just enough text to recognize markers whole and passes everything
//! else through unchanged.

mod location;
mod patterns;

pub use location::Location;

use log::{debug, warn};
use patterns::{marker_regex, marker_start_regex};

/// Retained text above this size is flushed as plain text.
pub const DEFAULT_MAX_PENDING: usize = 64 * 1024;

/// Streaming marker recognizer for one debug session.
#[derive(Debug)]
pub struct MarkerScanner {
    buffer: String,
    /// Whether `buffer[0]` sits at the start of a line.
    at_line_start: bool,
    current: Option<Location>,
    markers_seen: u64,
    max_pending: Option<usize>,
}

impl Default for MarkerScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkerScanner {
    pub fn new() -> Self {
        Self::with_max_pending(Some(DEFAULT_MAX_PENDING))
    }

    /// Create a scanner with a custom cap on retained text. `None` never
    /// flushes a pending marker prefix early.
    pub fn with_max_pending(max_pending: Option<usize>) -> Self {
        Self {
            buffer: String::new(),
            at_line_start: true,
            current: None,
            markers_seen: 0,
            max_pending,
        }
    }

    /// Most recently recognized location, if any.
    pub fn current_location(&self) -> Option<&Location> {
        self.current.as_ref()
    }

    /// Number of markers recognized so far.
    pub fn markers_seen(&self) -> u64 {
        self.markers_seen
    }

    /// Text held back because it may still complete into a marker.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Feed a chunk of debugger output and get back the text that is safe to
    /// display now.
    ///
    /// Every complete marker in the buffer is applied in order, so the last
    /// one determines [`current_location`](Self::current_location). Marker
    /// lines are part of the returned text, unmodified.
    pub fn feed(&mut self, chunk: &str) -> String {
        self.buffer.push_str(chunk);
        let mut output = String::new();

        loop {
            let Some(from) = self.search_start() else {
                break;
            };
            let Some(caps) = marker_regex().captures_at(&self.buffer, from) else {
                break;
            };
            let (start, end) = caps.get(0).map_or((from, from), |m| (m.start(), m.end()));
            let location = Location::from_fields(&caps["file"], &caps["line"]);

            match location {
                Some(location) => {
                    debug!("marker at {}", location);
                    self.current = Some(location);
                    self.markers_seen += 1;
                }
                None => {
                    warn!(
                        "ignoring marker with unusable line number: {:?}",
                        &self.buffer[start..end]
                    );
                }
            }

            self.emit(&mut output, end);
        }

        let hold_from = self
            .search_start()
            .and_then(|from| marker_start_regex().find_at(&self.buffer, from))
            .map(|m| m.start());

        let flush_to = hold_from.unwrap_or(self.buffer.len());
        self.emit(&mut output, flush_to);

        if let Some(max) = self.max_pending {
            if self.buffer.len() > max {
                warn!(
                    "pending marker prefix grew to {} bytes, flushing as plain text",
                    self.buffer.len()
                );
                let end = self.buffer.len();
                self.emit(&mut output, end);
            }
        }

        output
    }

    /// Flush whatever is still held back. Call once the debugger stream ends.
    pub fn finish(&mut self) -> String {
        self.at_line_start = true;
        std::mem::take(&mut self.buffer)
    }

    /// First offset at which a marker could begin, or `None` when the buffer
    /// holds no line start at all.
    fn search_start(&self) -> Option<usize> {
        if self.at_line_start {
            Some(0)
        } else {
            self.buffer.find('\n').map(|idx| idx + 1)
        }
    }

    /// Move `buffer[..end]` to `output`.
    fn emit(&mut self, output: &mut String, end: usize) {
        if end == 0 {
            return;
        }
        output.push_str(&self.buffer[..end]);
        self.at_line_start = self.buffer[..end].ends_with('\n');
        self.buffer.drain(..end);
    }
}
