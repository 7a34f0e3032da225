use std::io;

use thiserror::Error;

/// Errors that can end a break reminder session.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading from or writing to the terminal failed
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The desktop notification service rejected a notification
    #[error("notification error: {0}")]
    Notification(#[from] notify_rust::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
