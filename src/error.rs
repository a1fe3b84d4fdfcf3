use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the shell around the simulation engine.
///
/// The engine itself never fails: collisions are ordinary state transitions.
#[derive(Debug, Error)]
pub enum SnakeError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "terminal is {}x{} but the board needs {}x{}; enlarge the window or shrink the grid",
        actual.0, actual.1, needed.0, needed.1
    )]
    TerminalTooSmall { needed: (u16, u16), actual: (u16, u16) },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, SnakeError>;
