use crate::config::DebuggerConfig;
use crate::{Error, Result};
use log::{debug, info, warn};
use std::io::{self, BufRead, Read, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

const READ_CHUNK: usize = 4096;

/// Everything the host loop reacts to, from any of its reader threads.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionInput {
    /// Raw bytes from the debugger's stdout, exactly as read.
    Stdout(Vec<u8>),
    /// Raw bytes from the debugger's stderr. Displayed but never scanned.
    Stderr(Vec<u8>),
    /// One of the debugger's output streams reached EOF.
    StreamClosed,
    /// A line typed by the user, without its line terminator.
    Command(String),
    /// The user's input reached EOF.
    InputClosed,
}

/// A running debugger process with its output pumped into a channel.
#[derive(Debug)]
pub struct DebugSession {
    child: Child,
    stdin: Option<ChildStdin>,
    open_streams: usize,
}

impl DebugSession {
    pub fn spawn(config: &DebuggerConfig, tx: Sender<SessionInput>) -> Result<Self> {
        let argv = config.argv()?;
        let (program, args) = argv.split_first().ok_or(Error::EmptyCommand)?;

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &config.cwd {
            command.current_dir(cwd);
        }

        let mut child = command.spawn().map_err(|source| Error::Spawn {
            command: config.command.clone(),
            source,
        })?;

        let stdin = child.stdin.take();
        let mut open_streams = 0;
        if let Some(stdout) = child.stdout.take() {
            spawn_pump("stdout", stdout, tx.clone(), SessionInput::Stdout);
            open_streams += 1;
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_pump("stderr", stderr, tx, SessionInput::Stderr);
            open_streams += 1;
        }

        info!("started `{}` (pid {})", config.command, child.id());

        Ok(Self {
            child,
            stdin,
            open_streams,
        })
    }

    /// Send one command line to the debugger.
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::BrokenPipe, "debugger stdin already closed")
        })?;
        stdin.write_all(line.as_bytes())?;
        stdin.write_all(b"\n")?;
        stdin.flush()?;
        Ok(())
    }

    pub fn close_stdin(&mut self) {
        if self.stdin.take().is_some() {
            debug!("closed debugger stdin");
        }
    }

    /// Record that one output stream hit EOF. Returns `true` once all of
    /// them have.
    pub fn stream_closed(&mut self) -> bool {
        self.open_streams = self.open_streams.saturating_sub(1);
        self.open_streams == 0
    }

    /// Wait for the debugger to exit and return its exit code.
    pub fn wait(&mut self) -> Result<Option<i32>> {
        self.close_stdin();
        let status = self.child.wait()?;
        info!("debugger exited with {}", status);
        Ok(status.code())
    }
}

impl Drop for DebugSession {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            warn!("debugger still running at teardown, killing it");
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Read `reader` in chunks as they arrive, without waiting for newlines, so
/// a prompt with no line terminator still reaches the display.
fn spawn_pump<R>(
    name: &'static str,
    mut reader: R,
    tx: Sender<SessionInput>,
    wrap: fn(Vec<u8>) -> SessionInput,
) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    if tx.send(wrap(buf[..n].to_vec())).is_err() {
                        return;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("{} read failed: {}", name, e);
                    break;
                }
            }
        }
        debug!("{} reached EOF", name);
        let _ = tx.send(SessionInput::StreamClosed);
    })
}

/// Forward the user's input lines to the host loop.
pub fn spawn_input_reader<R>(input: R, tx: Sender<SessionInput>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    let line = line.trim_end_matches('\r').to_string();
                    if tx.send(SessionInput::Command(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    warn!("input read failed: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(SessionInput::InputClosed);
    })
}
