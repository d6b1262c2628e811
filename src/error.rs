use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JoinError {
    #[error("failed to read {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("join rejected with status {status}: {detail}")]
    Rejected { status: u16, detail: String },
    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
