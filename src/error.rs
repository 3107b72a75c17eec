use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to start debugger `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no debugger command given")]
    EmptyCommand,

    #[error("cannot split command line: {0}")]
    BadCommandLine(String),

    #[error("invalid log level `{0}`")]
    LogLevel(String),

    #[error("failed to initialize logging: {0}")]
    Log(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, Error>;
