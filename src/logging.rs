use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::{Result, SnakeError};

/// Sends log records to `path`, appending. `RUST_LOG` overrides the
/// default `info` filter.
///
/// Without a path nothing is initialised: stderr shares the screen with
/// the game board.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|error| SnakeError::Logging(error.to_string()))
}
