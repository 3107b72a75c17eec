/// Navigation commands understood by debugger.lua.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    Continue,
    Step,
    Next,
    Finish,
    Up,
    Down,
    Where,
    Trace,
    Locals,
    Help,
    Quit,
    /// Jump to stack frame N.
    Inspect(u32),
    /// Anything else, forwarded untouched.
    Raw(String),
}

impl NavCommand {
    /// Parse one line of user input. Long names are accepted alongside the
    /// debugger's single-letter forms; unrecognized input becomes `Raw`.
    pub fn parse(input: &str) -> Self {
        let line = input.trim_end_matches(['\r', '\n']);
        let mut words = line.split_whitespace();

        match (words.next(), words.next(), words.next()) {
            (Some("c" | "continue" | "cont"), None, None) => NavCommand::Continue,
            (Some("s" | "step" | "stepIn"), None, None) => NavCommand::Step,
            (Some("n" | "next" | "stepOver"), None, None) => NavCommand::Next,
            (Some("f" | "finish" | "stepOut"), None, None) => NavCommand::Finish,
            (Some("u" | "up"), None, None) => NavCommand::Up,
            (Some("d" | "down"), None, None) => NavCommand::Down,
            (Some("w" | "where"), None, None) => NavCommand::Where,
            (Some("t" | "trace" | "bt" | "backtrace"), None, None) => NavCommand::Trace,
            (Some("l" | "locals"), None, None) => NavCommand::Locals,
            (Some("h" | "help"), None, None) => NavCommand::Help,
            (Some("q" | "quit"), None, None) => NavCommand::Quit,
            (Some("i" | "inspect" | "frame"), Some(n), None) => match n.parse::<u32>() {
                Ok(n) => NavCommand::Inspect(n),
                Err(_) => NavCommand::Raw(line.to_string()),
            },
            _ => NavCommand::Raw(line.to_string()),
        }
    }

    /// The exact line to send to the debugger.
    pub fn wire(&self) -> String {
        match self {
            NavCommand::Continue => "c".to_string(),
            NavCommand::Step => "s".to_string(),
            NavCommand::Next => "n".to_string(),
            NavCommand::Finish => "f".to_string(),
            NavCommand::Up => "u".to_string(),
            NavCommand::Down => "d".to_string(),
            NavCommand::Where => "w".to_string(),
            NavCommand::Trace => "t".to_string(),
            NavCommand::Locals => "l".to_string(),
            NavCommand::Help => "h".to_string(),
            NavCommand::Quit => "q".to_string(),
            NavCommand::Inspect(n) => format!("i {}", n),
            NavCommand::Raw(line) => line.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_and_short_names() {
        assert_eq!(NavCommand::parse("next"), NavCommand::Next);
        assert_eq!(NavCommand::parse("n"), NavCommand::Next);
        assert_eq!(NavCommand::parse("  finish \n"), NavCommand::Finish);
        assert_eq!(NavCommand::parse("bt"), NavCommand::Trace);
        assert_eq!(NavCommand::Finish.wire(), "f");
    }

    #[test]
    fn test_inspect_frame() {
        assert_eq!(NavCommand::parse("frame 3"), NavCommand::Inspect(3));
        assert_eq!(NavCommand::Inspect(3).wire(), "i 3");
        assert_eq!(
            NavCommand::parse("i three"),
            NavCommand::Raw("i three".to_string())
        );
    }

    #[test]
    fn test_everything_else_is_forwarded_raw() {
        assert_eq!(
            NavCommand::parse("p some_table"),
            NavCommand::Raw("p some_table".to_string())
        );
        assert_eq!(
            NavCommand::parse("next 2"),
            NavCommand::Raw("next 2".to_string())
        );
        // An empty line repeats the previous command in debugger.lua.
        assert_eq!(NavCommand::parse("\n").wire(), "");
    }
}
