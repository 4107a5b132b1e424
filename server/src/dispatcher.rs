//! Interprets connection events as protocol actions
//!
//! The [`Dispatcher`] owns the connection registry, the game state and the
//! word source. It is purely synchronous: the network layer turns socket
//! activity into [`ClientEvent`]s and feeds them in one at a time, always
//! from the same task, so no locking is involved.

use crate::client_manager::{Client, ClientId, ClientManager, Membership};
use crate::dictionary::WordSource;
use crate::game::{GameState, GuessOutcome, RoundEnd};
use crate::lobby;
use crate::messages;
use crate::messaging::{
    announce_turn, broadcast, broadcast_except_turn_holder, prompt_turn_holder, send_to,
};
use log::{debug, info, warn};

/// Activity on a watched connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Bytes arrived from the peer
    Data { id: ClientId, bytes: Vec<u8> },
    /// The peer went away or its socket failed
    Closed { id: ClientId },
}

impl ClientEvent {
    pub fn client_id(&self) -> ClientId {
        match self {
            ClientEvent::Data { id, .. } | ClientEvent::Closed { id } => *id,
        }
    }
}

pub struct Dispatcher {
    clients: ClientManager,
    game: GameState,
    words: Box<dyn WordSource>,
}

impl Dispatcher {
    pub fn new(mut words: Box<dyn WordSource>, max_guesses: u32) -> Self {
        let game = GameState::new(words.choose(), max_guesses);
        Self {
            clients: ClientManager::new(),
            game,
            words,
        }
    }

    pub fn clients(&self) -> &ClientManager {
        &self.clients
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn next_client_id(&mut self) -> ClientId {
        self.clients.next_client_id()
    }

    /// Registers a freshly accepted connection and greets it
    pub fn client_connected(&mut self, client: Client) {
        let id = self.clients.register(client);
        debug!(
            "{} waiting in the lobby, {} on the roster",
            self.clients.lobby().len(),
            self.clients.roster().len()
        );
        send_to(&mut self.clients, &mut self.game, id, messages::WELCOME);
    }

    /// Processes one event from the network layer.
    ///
    /// Roster members are looked up before lobby members. After any event
    /// from a roster member, complete line or not, the current turn is
    /// announced to the others and the holder is prompted again. Events for
    /// handles that are no longer watched are dropped.
    pub fn handle_event(&mut self, event: ClientEvent) {
        let id = event.client_id();
        let Some(membership) = self.clients.membership(id) else {
            debug!("Ignoring event for unknown client {}", id);
            return;
        };

        match membership {
            Membership::Roster => {
                if let Some(line) = self.read_line(event) {
                    self.handle_guess(id, &line);
                }
                announce_turn(&mut self.clients, &mut self.game);
                prompt_turn_holder(&mut self.clients, &mut self.game);
            }
            Membership::Lobby => {
                if let Some(line) = self.read_line(event) {
                    lobby::handle_name(&mut self.clients, &mut self.game, id, &line);
                }
            }
        }
    }

    /// Removes a session as if its connection had dropped
    pub fn disconnect(&mut self, id: ClientId) {
        self.clients.remove(id, &mut self.game);
    }

    /// Feeds an event through the session's line buffer.
    ///
    /// Closed connections and overflowing input remove the session.
    fn read_line(&mut self, event: ClientEvent) -> Option<String> {
        let (id, bytes) = match event {
            ClientEvent::Data { id, bytes } => (id, bytes),
            ClientEvent::Closed { id } => {
                self.disconnect(id);
                return None;
            }
        };

        let client = self.clients.get_mut(id)?;
        debug!("[{}] Reads {} bytes", id, bytes.len());
        match client.receive(&bytes) {
            Ok(Some(frame)) => {
                if frame.discarded > 0 {
                    debug!("[{}] Discarding {} bytes after line", id, frame.discarded);
                }
                Some(frame.line)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Client {}: {}, disconnecting", id, e);
                self.disconnect(id);
                None
            }
        }
    }

    /// Evaluates a line from a roster member as a guess
    fn handle_guess(&mut self, id: ClientId, line: &str) {
        let clients = &mut self.clients;
        let game = &mut self.game;

        if game.turn() != Some(id) {
            send_to(clients, game, id, messages::NOT_YOUR_TURN);
            return;
        }

        let Some(letter) = GameState::parse_guess(line) else {
            send_to(clients, game, id, messages::BAD_GUESS);
            return;
        };

        let name = clients.name_of(id).unwrap_or_default().to_string();
        let result = game.apply_guess(letter);
        if result.outcome == GuessOutcome::Miss {
            send_to(clients, game, id, &messages::not_in_word(letter));
        }
        send_to(clients, game, id, &messages::guessed(&name, letter));

        match result.round_end {
            Some(RoundEnd::Won) => {
                info!("{} guessed the word {}", name, game.word());
                let reveal = messages::word_was(game.word());
                send_to(clients, game, id, &reveal);
                send_to(clients, game, id, messages::YOU_WIN);
                if game.turn() == Some(id) {
                    broadcast_except_turn_holder(clients, game, &messages::winner(&name));
                } else {
                    broadcast(clients, game, &messages::winner(&name));
                }
                game.start_round(self.words.choose());
            }
            Some(RoundEnd::OutOfGuesses) => {
                info!("Round lost, the word was {}", game.word());
                let reveal = messages::word_was(game.word());
                broadcast(clients, game, &reveal);
                broadcast(clients, game, messages::NO_GUESSES_LEFT);
                game.start_round(self.words.choose());
            }
            None => {}
        }

        let status = game.status_message();
        broadcast(clients, game, &status);

        // A removed guesser has already handed the turn on.
        if game.turn() == Some(id) {
            game.advance_turn(clients.roster());
        }
    }
}
