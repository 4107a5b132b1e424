//! Text the server sends to players

pub const WELCOME: &str = "Welcome to our word game. What is your name? ";
pub const EMPTY_NAME: &str = "empty name, what's your name: ";
pub const YOUR_GUESS: &str = "You Guess?\r\n";
pub const NOT_YOUR_TURN: &str = "It is not your turn to guess\r\n";
pub const BAD_GUESS: &str = "You can only guess one letter from a-z! Your Guess?\r\n";
pub const YOU_WIN: &str = "Game over! You win!\r\n";
pub const NO_GUESSES_LEFT: &str = "No guesses left. Game over.\r\n";

pub fn name_taken(name: &str) -> String {
    format!("{} already exists, enter another name: ", name)
}

pub fn joined(name: &str) -> String {
    format!("{} has just joined.\r\n", name)
}

pub fn turn_of(name: &str) -> String {
    format!("It's {}'s turn.\r\n", name)
}

pub fn guessed(name: &str, letter: char) -> String {
    format!("{} guess {}\r\n", name, letter)
}

pub fn not_in_word(letter: char) -> String {
    format!("{} is not in the word\r\n", letter)
}

pub fn word_was(word: &str) -> String {
    format!("The word was {}.\r\n", word)
}

pub fn winner(name: &str) -> String {
    format!("Game over! {} win!\r\n", name)
}
