mod commands;
mod context;
mod decode;
mod session;

pub use commands::NavCommand;
pub use context::{DebugContext, OutputUpdate};
pub use decode::Utf8Decoder;
pub use session::{spawn_input_reader, DebugSession, SessionInput};
