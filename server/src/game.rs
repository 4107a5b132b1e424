use crate::client_manager::ClientId;
use log::info;

/// Marks a position of the target word that has not been revealed yet
pub const PLACEHOLDER: char = '-';

/// Whether the guessed letter occurs in the target word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Hit,
    Miss,
}

/// Why a round finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Won,
    OutOfGuesses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessResult {
    pub letter: char,
    pub outcome: GuessOutcome,
    pub round_end: Option<RoundEnd>,
}

/// Shared state of the current round plus whose turn it is
///
/// The turn reference survives round resets; only roster changes and
/// [`GameState::advance_turn`] move it.
#[derive(Debug, Clone)]
pub struct GameState {
    word: String,
    masked: String,
    guessed: [bool; 26],
    guesses_left: u32,
    max_guesses: u32,
    round: u32,
    turn: Option<ClientId>,
}

impl GameState {
    /// Creates the game with its first round already started
    ///
    /// Every round starts with `max_guesses` misses allowed. Nobody holds
    /// the turn until the first player joins.
    pub fn new(word: String, max_guesses: u32) -> Self {
        let mut state = Self {
            word: String::new(),
            masked: String::new(),
            guessed: [false; 26],
            guesses_left: max_guesses,
            max_guesses,
            round: 0,
            turn: None,
        };
        state.start_round(word);
        state
    }

    /// Resets word, progress and budget for a new round; the turn is kept
    pub fn start_round(&mut self, word: String) {
        self.masked = word.chars().map(|_| PLACEHOLDER).collect();
        self.word = word;
        self.guessed = [false; 26];
        self.guesses_left = self.max_guesses;
        self.round += 1;
        info!(
            "Round {} started with a {} letter word",
            self.round,
            self.word.len()
        );
    }

    /// The target word of the current round
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Reveal progress, always as long as the target word
    ///
    /// Revealed positions hold their letter, all others [`PLACEHOLDER`].
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Misses still allowed before the round is lost
    pub fn guesses_left(&self) -> u32 {
        self.guesses_left
    }

    /// Number of the current round, starting at 1
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Roster member allowed to guess next
    ///
    /// `None` exactly when the roster is empty; the registry and
    /// [`GameState::advance_turn`] keep it pointing at a live member.
    pub fn turn(&self) -> Option<ClientId> {
        self.turn
    }

    /// Whether `letter` was guessed this round, hit or miss
    pub fn has_guessed(&self, letter: char) -> bool {
        letter_index(letter).is_some_and(|i| self.guessed[i])
    }

    /// Guessed letters in alphabetical order
    pub fn letters_guessed(&self) -> Vec<char> {
        ('a'..='z').filter(|&c| self.has_guessed(c)).collect()
    }

    /// True once every position has been revealed
    pub fn is_solved(&self) -> bool {
        self.masked == self.word
    }

    /// Accepts exactly one lowercase ASCII letter
    pub fn parse_guess(line: &str) -> Option<char> {
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => Some(c),
            _ => None,
        }
    }

    /// Applies a validated letter guess.
    ///
    /// A hit reveals every occurrence and leaves the budget alone, a miss costs
    /// one guess. The letter is recorded either way. The caller is responsible
    /// for starting a new round when `round_end` is set.
    pub fn apply_guess(&mut self, letter: char) -> GuessResult {
        let outcome = if self.word.contains(letter) {
            self.masked = self
                .word
                .chars()
                .zip(self.masked.chars())
                .map(|(w, m)| if w == letter { w } else { m })
                .collect();
            GuessOutcome::Hit
        } else {
            self.guesses_left = self.guesses_left.saturating_sub(1);
            GuessOutcome::Miss
        };

        if let Some(i) = letter_index(letter) {
            self.guessed[i] = true;
        }

        let round_end = if self.is_solved() {
            Some(RoundEnd::Won)
        } else if self.guesses_left == 0 {
            Some(RoundEnd::OutOfGuesses)
        } else {
            None
        };

        GuessResult {
            letter,
            outcome,
            round_end,
        }
    }

    /// Moves the turn to the next roster member in cyclic order.
    ///
    /// Seats the first member when nobody holds the turn, wraps around after
    /// the last one and clears the turn when the roster is empty. A holder that
    /// is no longer on the roster is treated like no holder at all.
    pub fn advance_turn(&mut self, roster: &[ClientId]) {
        self.turn = match self.turn {
            _ if roster.is_empty() => None,
            None => roster.first().copied(),
            Some(current) => match roster.iter().position(|&id| id == current) {
                Some(pos) => roster.get(pos + 1).or(roster.first()).copied(),
                None => roster.first().copied(),
            },
        };
    }

    /// Leaves nobody holding the turn
    ///
    /// Used when the last holder leaves and nobody else is on the roster.
    pub fn clear_turn(&mut self) {
        self.turn = None;
    }

    /// Status block sent after joins and guesses
    pub fn status_message(&self) -> String {
        let letters: String = self
            .letters_guessed()
            .iter()
            .map(|c| format!("{} ", c))
            .collect();
        format!(
            "***************\r\n\
             Word to guess: {}\r\n\
             Guesses remaining: {}\r\n\
             Letters guessed: {}\r\n\
             ***************\r\n",
            self.masked,
            self.guesses_left,
            letters.trim_end()
        )
    }
}

fn letter_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| (letter as u8 - b'a') as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(word: &str, budget: u32) -> GameState {
        GameState::new(word.to_string(), budget)
    }

    #[test]
    fn test_new_round_is_fully_masked() {
        let state = game("otter", 5);

        assert_eq!(state.masked(), "-----");
        assert_eq!(state.masked().len(), state.word().len());
        assert_eq!(state.guesses_left(), 5);
        assert!(state.letters_guessed().is_empty());
        assert_eq!(state.turn(), None);
        assert_eq!(state.round(), 1);
    }

    #[test]
    fn test_hit_reveals_every_occurrence() {
        let mut state = game("otter", 5);

        let result = state.apply_guess('t');

        assert_eq!(result.outcome, GuessOutcome::Hit);
        assert_eq!(result.round_end, None);
        assert_eq!(state.masked(), "-tt--");
        assert_eq!(state.guesses_left(), 5);
        assert!(state.has_guessed('t'));
    }

    #[test]
    fn test_miss_costs_one_guess() {
        let mut state = game("otter", 5);

        let result = state.apply_guess('z');

        assert_eq!(result.outcome, GuessOutcome::Miss);
        assert_eq!(state.masked(), "-----");
        assert_eq!(state.guesses_left(), 4);
        assert!(state.has_guessed('z'));
    }

    #[test]
    fn test_repeated_miss_costs_again() {
        let mut state = game("cat", 5);

        state.apply_guess('q');
        state.apply_guess('q');

        assert_eq!(state.guesses_left(), 3);
        assert_eq!(state.letters_guessed(), vec!['q']);
    }

    #[test]
    fn test_cat_scenario() {
        let mut state = game("cat", 5);

        state.apply_guess('c');
        assert_eq!(state.masked(), "c--");
        assert_eq!(state.guesses_left(), 5);

        state.apply_guess('x');
        assert_eq!(state.masked(), "c--");
        assert_eq!(state.guesses_left(), 4);

        assert_eq!(state.apply_guess('a').round_end, None);
        let result = state.apply_guess('t');
        assert_eq!(result.round_end, Some(RoundEnd::Won));
        assert!(state.is_solved());
    }

    #[test]
    fn test_running_out_of_guesses() {
        let mut state = game("cat", 2);

        assert_eq!(state.apply_guess('x').round_end, None);
        let result = state.apply_guess('y');

        assert_eq!(result.round_end, Some(RoundEnd::OutOfGuesses));
        assert_eq!(state.guesses_left(), 0);
    }

    #[test]
    fn test_start_round_keeps_turn() {
        let mut state = game("cat", 3);
        state.advance_turn(&[4, 7]);
        state.apply_guess('x');
        state.apply_guess('c');

        state.start_round("dog".to_string());

        assert_eq!(state.word(), "dog");
        assert_eq!(state.masked(), "---");
        assert_eq!(state.guesses_left(), 3);
        assert!(state.letters_guessed().is_empty());
        assert_eq!(state.turn(), Some(4));
        assert_eq!(state.round(), 2);
    }

    #[test]
    fn test_parse_guess() {
        assert_eq!(GameState::parse_guess("a"), Some('a'));
        assert_eq!(GameState::parse_guess("z"), Some('z'));
        assert_eq!(GameState::parse_guess(""), None);
        assert_eq!(GameState::parse_guess("ab"), None);
        assert_eq!(GameState::parse_guess("A"), None);
        assert_eq!(GameState::parse_guess("1"), None);
        assert_eq!(GameState::parse_guess(" a"), None);
        assert_eq!(GameState::parse_guess("é"), None);
    }

    #[test]
    fn test_advance_turn_seats_first_member() {
        let mut state = game("cat", 5);

        state.advance_turn(&[3, 1, 2]);
        assert_eq!(state.turn(), Some(3));
    }

    #[test]
    fn test_advance_turn_cycles_and_wraps() {
        let mut state = game("cat", 5);
        let roster = [3, 1, 2];

        state.advance_turn(&roster);
        state.advance_turn(&roster);
        assert_eq!(state.turn(), Some(1));
        state.advance_turn(&roster);
        assert_eq!(state.turn(), Some(2));
        state.advance_turn(&roster);
        assert_eq!(state.turn(), Some(3));
    }

    #[test]
    fn test_advance_turn_on_empty_roster_clears() {
        let mut state = game("cat", 5);
        state.advance_turn(&[1]);

        state.advance_turn(&[]);
        assert_eq!(state.turn(), None);
    }

    #[test]
    fn test_advance_turn_with_stale_holder() {
        let mut state = game("cat", 5);
        state.advance_turn(&[9]);

        state.advance_turn(&[1, 2]);
        assert_eq!(state.turn(), Some(1));
    }

    #[test]
    fn test_single_member_keeps_turn() {
        let mut state = game("cat", 5);
        state.advance_turn(&[5]);
        state.advance_turn(&[5]);

        assert_eq!(state.turn(), Some(5));
    }

    #[test]
    fn test_status_message() {
        let mut state = game("cat", 5);
        state.apply_guess('x');
        state.apply_guess('a');

        let status = state.status_message();

        assert!(status.contains("Word to guess: -a-\r\n"));
        assert!(status.contains("Guesses remaining: 4\r\n"));
        assert!(status.contains("Letters guessed: a x\r\n"));
        assert!(status.ends_with("***************\r\n"));
    }
}
