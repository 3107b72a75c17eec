//! Machine-readable stop notifications for editor front ends.
//!
//! Each event is one JSON object per line:
//! `{"seq":1,"type":"event","event":"stopped","body":{"path":"a.lua","line":3}}`

use crate::scanner::Location;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "body", rename_all = "lowercase")]
pub enum HostEvent {
    Stopped(Location),
    Exited { code: Option<i32> },
}

#[derive(Debug, Serialize)]
pub struct EventMessage<'a> {
    pub seq: u64,
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    #[serde(flatten)]
    pub event: &'a HostEvent,
}

#[derive(Debug)]
pub struct EventWriter<W: Write> {
    seq: u64,
    out: W,
}

impl<W: Write> EventWriter<W> {
    pub fn new(out: W) -> Self {
        Self { seq: 0, out }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    pub fn emit(&mut self, event: &HostEvent) -> io::Result<()> {
        let msg = EventMessage {
            seq: self.next_seq(),
            msg_type: "event",
            event,
        };
        serde_json::to_writer(&mut self.out, &msg)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_events_are_sequenced_json_lines() {
        let mut writer = EventWriter::new(Vec::new());
        writer
            .emit(&HostEvent::Stopped(Location::new("a.lua", 3)))
            .unwrap();
        writer.emit(&HostEvent::Exited { code: Some(0) }).unwrap();

        assert_eq!(
            lines(&writer.into_inner()),
            vec![
                json!({"seq": 1, "type": "event", "event": "stopped",
                       "body": {"path": "a.lua", "line": 3}}),
                json!({"seq": 2, "type": "event", "event": "exited",
                       "body": {"code": 0}}),
            ]
        );
    }
}
