//! Delivery helpers for roster-wide messages
//!
//! A failed delivery removes the recipient on the spot, which may also move
//! the turn. Broadcasts iterate over a snapshot of the roster so removals
//! never disturb the remaining deliveries.

use crate::client_manager::{ClientId, ClientManager};
use crate::game::GameState;
use crate::messages;
use log::warn;

/// Sends to one session, removing it if the write side is gone.
///
/// Returns false when the session is (now) disconnected.
pub fn send_to(clients: &mut ClientManager, game: &mut GameState, id: ClientId, message: &str) -> bool {
    let delivered = match clients.get(id) {
        Some(client) => client.send(message).is_ok(),
        None => return false,
    };

    if !delivered {
        warn!("Write to client {} failed", id);
        clients.remove(id, game);
    }
    delivered
}

/// Delivers `message` to every roster member
pub fn broadcast(clients: &mut ClientManager, game: &mut GameState, message: &str) {
    broadcast_except(clients, game, message, None);
}

/// Delivers `message` to every roster member except the current turn holder
pub fn broadcast_except_turn_holder(clients: &mut ClientManager, game: &mut GameState, message: &str) {
    let holder = game.turn();
    broadcast_except(clients, game, message, holder);
}

pub fn broadcast_except(
    clients: &mut ClientManager,
    game: &mut GameState,
    message: &str,
    skip: Option<ClientId>,
) {
    let recipients: Vec<ClientId> = clients.roster().to_vec();
    for id in recipients {
        if Some(id) == skip {
            continue;
        }
        send_to(clients, game, id, message);
    }
}

/// Tells everyone but the turn holder whose turn it is
pub fn announce_turn(clients: &mut ClientManager, game: &mut GameState) {
    let Some(holder) = game.turn() else {
        return;
    };
    let Some(name) = clients.name_of(holder) else {
        return;
    };

    let message = messages::turn_of(name);
    broadcast_except_turn_holder(clients, game, &message);
}

/// Asks the turn holder for a guess
pub fn prompt_turn_holder(clients: &mut ClientManager, game: &mut GameState) {
    if let Some(holder) = game.turn() {
        send_to(clients, game, holder, messages::YOUR_GUESS);
    }
}
