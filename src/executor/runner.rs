use crate::config::Config;
use crate::debugger::{spawn_input_reader, DebugContext, DebugSession, NavCommand, SessionInput};
use crate::events::{EventWriter, HostEvent};
use crate::Result;
use log::{debug, info, warn};
use std::io::{self, Write};
use std::sync::mpsc::{channel, Receiver};

/// Run one interactive debug session on the current terminal.
///
/// Returns the debugger's exit code.
pub fn run_debugger(config: &Config) -> Result<Option<i32>> {
    let (tx, rx) = channel();
    let mut session = DebugSession::spawn(&config.debugger, tx.clone())?;
    spawn_input_reader(io::BufReader::new(io::stdin()), tx);

    let mut ctx = DebugContext::new(config.scanner.max_pending_bytes);
    let mut events = config.events.then(|| EventWriter::new(io::stderr()));
    let mut out = io::stdout().lock();

    drive(&rx, &mut session, &mut ctx, &mut out, events.as_mut())
}

/// Pump session input until every debugger output stream is closed.
///
/// Debugger output goes through `ctx` to `out`; user commands go to the
/// debugger. At the end the scanner is flushed and the process reaped.
pub fn drive<W, E>(
    rx: &Receiver<SessionInput>,
    session: &mut DebugSession,
    ctx: &mut DebugContext,
    out: &mut W,
    mut events: Option<&mut EventWriter<E>>,
) -> Result<Option<i32>>
where
    W: Write,
    E: Write,
{
    for input in rx.iter() {
        match input {
            SessionInput::Stdout(bytes) => {
                let update = ctx.on_output(&bytes);
                out.write_all(update.text.as_bytes())?;
                out.flush()?;
                if let Some(location) = update.stop {
                    info!("stopped at {}", location);
                    if let Some(events) = events.as_deref_mut() {
                        events.emit(&HostEvent::Stopped(location))?;
                    }
                }
            }
            SessionInput::Stderr(bytes) => {
                let mut err = io::stderr();
                err.write_all(&bytes)?;
                err.flush()?;
            }
            SessionInput::Command(line) => {
                let command = NavCommand::parse(&line);
                debug!("user command {:?}", command);
                if let Err(e) = session.send_line(&command.wire()) {
                    warn!("could not send {:?}: {}", command, e);
                }
            }
            SessionInput::InputClosed => session.close_stdin(),
            SessionInput::StreamClosed => {
                if session.stream_closed() {
                    break;
                }
            }
        }
    }

    let rest = ctx.close();
    out.write_all(rest.text.as_bytes())?;
    out.flush()?;
    if let Some(location) = rest.stop {
        if let Some(events) = events.as_deref_mut() {
            events.emit(&HostEvent::Stopped(location))?;
        }
    }

    let code = session.wait()?;
    if let Some(events) = events {
        events.emit(&HostEvent::Exited { code })?;
    }
    Ok(code)
}
