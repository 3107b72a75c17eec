use regex::Regex;
use std::sync::OnceLock;

/// Literal text a marker line can begin with.
const ANCHORS: [&str; 2] = ["break", "Inspecting frame:"];

/// Complete marker line, any of the four shapes
static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Unterminated last line that may still grow into a marker
static MARKER_START_REGEX: OnceLock<Regex> = OnceLock::new();

/// Get the compiled full-marker pattern.
///
/// Matches, anchored at a line start and running to the end of that line:
/// - `break via dbg(...) => PATH:LINE in ...`
/// - `break via dbg.call(...) => PATH:LINE in ...`
/// - `Inspecting frame: PATH:LINE in ...`
/// - `PATH:LINE in ...`
///
/// `file` and `line` are captured from whichever shape matched. The
/// `dbg(...)` argument text is matched lazily, so the first `) => ` wins
/// whether or not the rest of the line has arrived yet.
pub(crate) fn marker_regex() -> &'static Regex {
    MARKER_REGEX.get_or_init(|| {
        Regex::new(
            r"(?mx)
            ^
            (?:
                break\ via\ dbg(?:\.call)?\(.*?\)\ =>\ 
                |
                Inspecting\ frame:\ 
            )?
            (?P<file>\S+):(?P<line>[0-9]+)\ in\ .*$
            ",
        )
        .expect("Failed to compile marker regex")
    })
}

/// Get the compiled marker-start pattern.
///
/// Only ever matches the final, unterminated line of the buffer: either a
/// line that begins with one of the anchors, or a line that is still a
/// proper prefix of an anchor (`Insp`, `bre`, ...). A newline after the
/// candidate resolves it as plain text.
///
/// The prefixes are held so a read that ends inside the anchor word does not
/// lose the marker. The cost is that a final line which is exactly `b`, `I`,
/// `In` and so on is shown only once more output (or the session end)
/// arrives.
pub(crate) fn marker_start_regex() -> &'static Regex {
    MARKER_START_REGEX.get_or_init(|| {
        let words = ANCHORS
            .iter()
            .map(|anchor| regex::escape(anchor))
            .collect::<Vec<_>>()
            .join("|");
        let partials = ANCHORS
            .iter()
            .flat_map(|anchor| proper_prefixes(anchor))
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        Regex::new(&format!(r"(?m)^(?:(?:{words})[^\n]*|(?:{partials}))\z"))
            .expect("Failed to compile marker-start regex")
    })
}

/// Non-empty proper prefixes of `word`, split on char boundaries.
fn proper_prefixes(word: &str) -> impl Iterator<Item = &str> {
    word.char_indices()
        .skip(1)
        .map(move |(idx, _)| &word[..idx])
}
