//! # Word Game Server Library
//!
//! This library implements a multi-player, turn-based letter guessing game
//! served over plain TCP. Players connect with any line-oriented client (the
//! bundled terminal client or netcat), pick a display name and take turns
//! guessing letters of a hidden word.
//!
//! ## Core Responsibilities
//!
//! ### Connection Management
//! Every connection starts in the lobby. Once it supplies a non-empty name
//! that no active player uses, it joins the roster and starts receiving game
//! broadcasts. Disconnects and failed writes remove a session immediately.
//!
//! ### Turn-Based Game State
//! A single shared round tracks the target word, the revealed progress, the
//! letters guessed so far and the remaining guess budget. Only the player
//! holding the turn may guess; the turn cycles through the roster in join
//! order and survives round resets.
//!
//! ### Messaging
//! Status updates, join notices and round results are broadcast to the
//! roster. A recipient whose socket is gone is dropped without interrupting
//! delivery to the others.
//!
//! ## Architecture Design
//!
//! ### Single-Threaded Event Loop
//! The server runs on a current-thread tokio runtime. Per-connection reader
//! tasks forward raw bytes to one loop which owns all state, so there are no
//! locks anywhere. Each loop pass waits for the listener or any connection,
//! accepts first, then handles pending input in ascending client order.
//!
//! ### Line Framing
//! Input is accumulated in a fixed-size buffer per connection until a CR LF
//! arrives. Input that outgrows the buffer disconnects the sender. A client
//! that never completes a line is never timed out.
//!
//! ## Module Organization
//!
//! - `client_manager`: sessions, lobby/roster membership and removal
//! - `game`: round state, guess evaluation and turn rotation
//! - `lobby`: name registration
//! - `messaging`: roster broadcasts with failure handling
//! - `dispatcher`: turns connection events into protocol actions
//! - `network`: listening socket, per-connection tasks and the run loop
//! - `dictionary`: word list loading and random selection
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::config::ServerConfig;
//! use server::network::Server;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::new("words.txt");
//!
//!     let server = Server::from_config(&config).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client_manager;
pub mod config;
pub mod dictionary;
pub mod dispatcher;
pub mod error;
pub mod game;
pub mod lobby;
pub mod messages;
pub mod messaging;
pub mod network;
