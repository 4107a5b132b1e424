//! Server settings gathered from the command line

use shared::DEFAULT_PORT;
use std::path::PathBuf;

/// Starting guess budget for every round
pub const MAX_GUESSES: u32 = 4;
/// Listen backlog for pending connections
pub const MAX_QUEUE: u32 = 5;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_guesses: u32,
    pub dictionary: PathBuf,
}

impl ServerConfig {
    pub fn new(dictionary: impl Into<PathBuf>) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_guesses: MAX_GUESSES,
            dictionary: dictionary.into(),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
