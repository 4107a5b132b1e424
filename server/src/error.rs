use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("word list {0} has no usable entries")]
    Empty(String),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("could not resolve listen address {0}")]
    Resolve(String),
    #[error("failed to set up listening socket: {0}")]
    Bind(#[from] io::Error),
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),
}
