//! Error types for forgepage-server.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("request head exceeds {0} bytes")]
    HeadTooLarge(usize),

    #[error("connection closed before end of request head")]
    TruncatedHead,
}
