//! # Word Game Terminal Client
//!
//! A minimal line-mode client for the word game server. Whatever the server
//! sends is printed as it arrives (name prompts do not end in a newline, so
//! output is never buffered by line), and every line typed on stdin is sent
//! with the protocol's CR LF terminator.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::network::Client;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::connect("127.0.0.1:52505").await?;
//!     client.run().await?;
//!     Ok(())
//! }
//! ```

pub mod network;
