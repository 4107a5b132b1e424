//! Connection bookkeeping for the word game server
//!
//! This module owns every live connection and tracks which phase it is in:
//! - Lobby: connected but not yet named, receives no broadcasts
//! - Roster: named players that take turns guessing
//!
//! Each [`Client`] carries its own line buffer and an outbound queue drained
//! by a writer task. Dropping a client aborts its reader task and closes the
//! queue, which in turn closes the socket.

use crate::game::GameState;
use log::info;
use shared::{Frame, FrameError, LineBuffer};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Connection handle assigned by the server, increasing with every accept
pub type ClientId = u32;

/// Which collection a session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Lobby,
    Roster,
}

/// The peer's outbound queue is gone, usually because a socket write failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

/// One connected peer
#[derive(Debug)]
pub struct Client {
    /// Unique handle assigned on accept
    pub id: ClientId,
    /// Peer address, used for logging
    pub addr: SocketAddr,
    /// When the connection was accepted
    pub connected_at: Instant,
    name: Option<String>,
    membership: Membership,
    inbuf: LineBuffer,
    outbox: mpsc::UnboundedSender<String>,
    reader: Option<AbortHandle>,
}

impl Client {
    /// Creates a lobby session that writes through `outbox`
    pub fn new(id: ClientId, addr: SocketAddr, outbox: mpsc::UnboundedSender<String>) -> Self {
        Self {
            id,
            addr,
            connected_at: Instant::now(),
            name: None,
            membership: Membership::Lobby,
            inbuf: LineBuffer::new(),
            outbox,
            reader: None,
        }
    }

    /// Attaches the task feeding this session's input so it can be stopped on removal
    pub fn with_reader(mut self, reader: AbortHandle) -> Self {
        self.reader = Some(reader);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn membership(&self) -> Membership {
        self.membership
    }

    /// Queues a message for the writer task
    pub fn send(&self, message: &str) -> Result<(), Disconnected> {
        self.outbox
            .send(message.to_string())
            .map_err(|_| Disconnected)
    }

    /// Buffers freshly read bytes, returning a line once one is complete
    pub fn receive(&mut self, data: &[u8]) -> Result<Option<Frame>, FrameError> {
        self.inbuf.push(data)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}

/// Owns every session plus the roster's turn order
///
/// The set of keys in `clients` is the set of watched connections: input for
/// any other handle is ignored.
pub struct ClientManager {
    clients: BTreeMap<ClientId, Client>,
    /// Roster members in join order, the cycle the turn follows
    roster: Vec<ClientId>,
    next_client_id: ClientId,
}

impl ClientManager {
    /// Creates an empty registry
    ///
    /// Handles start from 1 and increase with every accepted connection, so
    /// ascending handle order is also accept order.
    pub fn new() -> Self {
        Self {
            clients: BTreeMap::new(),
            roster: Vec::new(),
            next_client_id: 1,
        }
    }

    /// Reserves the handle for the next accepted connection
    ///
    /// The network layer needs the handle before the session exists so its
    /// reader and writer tasks can tag their events with it.
    pub fn next_client_id(&mut self) -> ClientId {
        let id = self.next_client_id;
        self.next_client_id += 1;
        id
    }

    /// Starts watching a new connection and places it in the lobby
    ///
    /// Lobby sessions receive nothing but replies to their own input until
    /// they pick a name.
    pub fn register(&mut self, mut client: Client) -> ClientId {
        let id = client.id;
        client.membership = Membership::Lobby;
        info!("Client {} connected from {}", id, client.addr);
        self.clients.insert(id, client);
        id
    }

    /// Moves a lobby session onto the roster under `name`.
    ///
    /// Returns false if the session is unknown or already on the roster.
    pub fn promote(&mut self, id: ClientId, name: String) -> bool {
        let Some(client) = self.clients.get_mut(&id) else {
            return false;
        };
        if client.membership == Membership::Roster {
            return false;
        }

        info!("Client {} joined the game as {}", id, name);
        client.name = Some(name);
        client.membership = Membership::Roster;
        self.roster.push(id);
        true
    }

    /// Drops a session and everything attached to it.
    ///
    /// If the session held the turn, the turn moves on before the session is
    /// detached; a sole holder leaves the turn empty.
    pub fn remove(&mut self, id: ClientId, game: &mut GameState) -> Option<Client> {
        if game.turn() == Some(id) {
            game.advance_turn(&self.roster);
            if game.turn() == Some(id) {
                game.clear_turn();
            }
        }

        self.roster.retain(|&member| member != id);
        let client = self.clients.remove(&id)?;
        info!(
            "Removing client {} {} after {:?}",
            id,
            client.addr,
            client.connected_at.elapsed()
        );
        Some(client)
    }

    /// Looks up a watched session by handle
    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.get(&id)
    }

    pub fn get_mut(&mut self, id: ClientId) -> Option<&mut Client> {
        self.clients.get_mut(&id)
    }

    /// Which collection a session is in, or `None` for unknown handles
    ///
    /// The dispatcher uses this to route input: roster members get the
    /// guessing flow, lobby members the name registration flow.
    pub fn membership(&self, id: ClientId) -> Option<Membership> {
        self.clients.get(&id).map(Client::membership)
    }

    /// True while the connection is still registered
    ///
    /// Becomes false as soon as the session is removed, which callers check
    /// after sends that may have failed.
    pub fn is_watched(&self, id: ClientId) -> bool {
        self.clients.contains_key(&id)
    }

    /// Roster members in turn order
    ///
    /// Broadcasts copy this slice before sending, since a failed send
    /// removes the member from it.
    pub fn roster(&self) -> &[ClientId] {
        &self.roster
    }

    /// Lobby members in ascending handle order
    pub fn lobby(&self) -> Vec<ClientId> {
        self.clients
            .values()
            .filter(|client| client.membership == Membership::Lobby)
            .map(|client| client.id)
            .collect()
    }

    /// Display name of a roster member; lobby sessions have none yet
    pub fn name_of(&self, id: ClientId) -> Option<&str> {
        self.clients.get(&id).and_then(Client::name)
    }

    /// True if a roster member already uses `name`
    pub fn name_taken(&self, name: &str) -> bool {
        self.roster
            .iter()
            .any(|id| self.name_of(*id) == Some(name))
    }

    /// Returns the number of watched connections
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl Default for ClientManager {
    fn default() -> Self {
        Self::new()
    }
}
