//! Name registration for connections that have not joined the game yet

use crate::client_manager::{ClientId, ClientManager};
use crate::game::GameState;
use crate::messages;
use crate::messaging::{announce_turn, broadcast, prompt_turn_holder, send_to};
use shared::MAX_NAME_LEN;

/// Outcome of checking a requested display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameCheck {
    Accepted(String),
    Empty,
    Taken(String),
}

/// Truncates the requested name and checks it against the roster
pub fn check_name(clients: &ClientManager, line: &str) -> NameCheck {
    let name: String = line.chars().take(MAX_NAME_LEN).collect();
    if name.is_empty() {
        NameCheck::Empty
    } else if clients.name_taken(&name) {
        NameCheck::Taken(name)
    } else {
        NameCheck::Accepted(name)
    }
}

/// Handles a complete line from a lobby session.
///
/// A valid, unused name moves the session onto the roster; anything else gets
/// a re-prompt and the session stays in the lobby.
pub fn handle_name(clients: &mut ClientManager, game: &mut GameState, id: ClientId, line: &str) {
    let name = match check_name(clients, line) {
        NameCheck::Accepted(name) => name,
        NameCheck::Empty => {
            send_to(clients, game, id, messages::EMPTY_NAME);
            return;
        }
        NameCheck::Taken(name) => {
            send_to(clients, game, id, &messages::name_taken(&name));
            return;
        }
    };

    if !clients.promote(id, name.clone()) {
        return;
    }

    broadcast(clients, game, &messages::joined(&name));

    if game.turn().is_none() {
        game.advance_turn(clients.roster());
    }

    let status = game.status_message();
    send_to(clients, game, id, &status);
    prompt_turn_holder(clients, game);
    announce_turn(clients, game);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client_manager::Client;
    use tokio::sync::mpsc;

    #[test]
    fn test_check_name() {
        let mut clients = ClientManager::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = clients.next_client_id();
        clients.register(Client::new(id, "127.0.0.1:9000".parse().unwrap(), tx));
        clients.promote(id, "alice".to_string());

        assert_eq!(check_name(&clients, ""), NameCheck::Empty);
        assert_eq!(
            check_name(&clients, "alice"),
            NameCheck::Taken("alice".to_string())
        );
        assert_eq!(
            check_name(&clients, "bob"),
            NameCheck::Accepted("bob".to_string())
        );
    }

    #[test]
    fn test_long_name_is_truncated() {
        let clients = ClientManager::new();
        let long = "x".repeat(MAX_NAME_LEN + 10);

        match check_name(&clients, &long) {
            NameCheck::Accepted(name) => assert_eq!(name.chars().count(), MAX_NAME_LEN),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_truncated_name_collides_with_existing() {
        let mut clients = ClientManager::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = clients.next_client_id();
        clients.register(Client::new(id, "127.0.0.1:9000".parse().unwrap(), tx));
        clients.promote(id, "y".repeat(MAX_NAME_LEN));

        let requested = "y".repeat(MAX_NAME_LEN + 3);
        assert!(matches!(check_name(&clients, &requested), NameCheck::Taken(_)));
    }
}
