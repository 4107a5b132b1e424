//! Performance benchmarks for the server's hot paths

use server::client_manager::{Client, ClientManager};
use server::game::GameState;
use shared::LineBuffer;
use std::time::Instant;
use tokio::sync::mpsc;

/// Benchmarks line framing of small guesses
#[test]
fn benchmark_line_framing() {
    let mut buffer = LineBuffer::new();

    let iterations = 100_000;
    let start = Instant::now();

    for _ in 0..iterations {
        assert!(buffer.push(b"q").unwrap().is_none());
        let frame = buffer.push(b"\r\n").unwrap();
        assert!(frame.is_some());
    }

    let duration = start.elapsed();
    println!(
        "Line framing: {} lines in {:?} ({:.2} ns/line)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    assert!(duration.as_millis() < 1000);
}

/// Benchmarks guess evaluation across whole rounds
#[test]
fn benchmark_guess_evaluation() {
    let word = "pneumonoultramicroscopicsilicovolcanoconiosis";
    let mut state = GameState::new(word.to_string(), 26);

    let rounds = 10_000;
    let start = Instant::now();

    for _ in 0..rounds {
        for letter in 'a'..='z' {
            if state.apply_guess(letter).round_end.is_some() {
                break;
            }
        }
        state.start_round(word.to_string());
    }

    let duration = start.elapsed();
    println!(
        "Guess evaluation: {} rounds in {:?} ({:.2} μs/round)",
        rounds,
        duration,
        duration.as_micros() as f64 / rounds as f64
    );

    assert!(duration.as_millis() < 5000);
}

/// Benchmarks turn rotation over a large roster
#[test]
fn benchmark_turn_rotation() {
    let mut clients = ClientManager::new();
    let mut receivers = Vec::new();
    for i in 0..100 {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = clients.next_client_id();
        clients.register(Client::new(id, "127.0.0.1:9000".parse().unwrap(), tx));
        clients.promote(id, format!("player{}", i));
        receivers.push(rx);
    }
    let mut state = GameState::new("cat".to_string(), 5);

    let iterations = 100_000;
    let start = Instant::now();

    for _ in 0..iterations {
        state.advance_turn(clients.roster());
    }

    let duration = start.elapsed();
    println!(
        "Turn rotation: {} advances over {} players in {:?}",
        iterations,
        clients.roster().len(),
        duration
    );

    // 100_000 is a multiple of the roster size, so the last seat holds the turn
    assert_eq!(state.turn(), clients.roster().last().copied());
    assert!(duration.as_millis() < 2000);
}
