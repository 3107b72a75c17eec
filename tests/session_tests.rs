// End-to-end runs of the host loop against a scripted stand-in debugger.

use lua_debugger::config::{Config, DebuggerConfig};
use lua_debugger::debugger::{DebugContext, DebugSession};
use lua_debugger::events::EventWriter;
use lua_debugger::executor;
use lua_debugger::Location;
use serde_json::Value;
use std::io::Write;
use std::sync::mpsc::channel;

#[cfg(unix)]
fn fake_debugger(script: &str) -> DebuggerConfig {
    DebuggerConfig {
        command: shlex::try_join(["sh", "-c", script]).unwrap(),
        cwd: None,
    }
}

#[cfg(test)]
mod session_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(unix)]
    #[test]
    fn test_drive_reports_stops_and_exit() {
        let config = fake_debugger(
            "printf 'break via dbg() => main.lua:10 in main chunk\\n'; \
             printf 'Inspecting frame: lib/'; sleep 0.1; printf 'util.lua:44 in f\\n'; \
             printf 'debugger.lua> '",
        );
        let (tx, rx) = channel();
        let mut session = DebugSession::spawn(&config, tx).unwrap();
        let mut ctx = DebugContext::new(None);
        let mut out = Vec::new();
        let mut events = EventWriter::new(Vec::new());

        let code = executor::drive(&rx, &mut session, &mut ctx, &mut out, Some(&mut events)).unwrap();

        assert_eq!(code, Some(0));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "break via dbg() => main.lua:10 in main chunk\n\
             Inspecting frame: lib/util.lua:44 in f\n\
             debugger.lua> "
        );
        assert_eq!(
            ctx.current_location(),
            Some(&Location::new("lib/util.lua", 44))
        );

        let events: Vec<Value> = String::from_utf8(events.into_inner())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        let names: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
        assert_eq!(names, ["stopped", "stopped", "exited"]);
        assert_eq!(events[1]["body"]["path"], "lib/util.lua");
        assert_eq!(events[2]["body"]["code"], 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_drive_flushes_unfinished_marker_at_exit() {
        let config = fake_debugger("printf 'break via dbg(' ; exit 3");
        let (tx, rx) = channel();
        let mut session = DebugSession::spawn(&config, tx).unwrap();
        let mut ctx = DebugContext::new(None);
        let mut out = Vec::new();

        let code =
            executor::drive(&rx, &mut session, &mut ctx, &mut out, None::<&mut EventWriter<Vec<u8>>>)
                .unwrap();

        assert_eq!(code, Some(3));
        assert_eq!(String::from_utf8(out).unwrap(), "break via dbg(");
        assert_eq!(ctx.current_location(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_session_forwards_commands() {
        // Echo back whatever command arrives, framed as a marker.
        let config = fake_debugger("read cmd; printf 'Inspecting frame: %s.lua:1 in main\\n' \"$cmd\"");
        let (tx, rx) = channel();
        let mut session = DebugSession::spawn(&config, tx.clone()).unwrap();
        let mut ctx = DebugContext::new(None);
        let mut out = Vec::new();

        tx.send(lua_debugger::debugger::SessionInput::Command("finish".to_string()))
            .unwrap();
        executor::drive(&rx, &mut session, &mut ctx, &mut out, None::<&mut EventWriter<Vec<u8>>>)
            .unwrap();

        assert_eq!(ctx.current_location(), Some(&Location::new("f.lua", 1)));
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "debugger": {{"command": "lua5.4 game.lua", "cwd": "/tmp"}},
                "scanner": {{"max_pending_bytes": 1024}},
                "events": true
            }}"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.debugger.argv().unwrap(), ["lua5.4", "game.lua"]);
        assert_eq!(config.scanner.max_pending_bytes, Some(1024));
        assert!(config.events);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_malformed_config_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(lua_debugger::Error::Config(_))
        ));
    }
}
