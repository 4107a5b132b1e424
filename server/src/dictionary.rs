//! Word list used to pick the target word for each round

use crate::error::DictionaryError;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::Path;

/// Source of target words, consulted once per round
pub trait WordSource: Send {
    /// Picks the word for the next round
    fn choose(&mut self) -> String;

    /// Total number of entries available
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory word list with uniform random selection
#[derive(Debug)]
pub struct Dictionary {
    words: Vec<String>,
    rng: StdRng,
}

impl Dictionary {
    /// Loads a word list with one word per line.
    ///
    /// Lines that are blank or contain anything other than `a-z` are skipped,
    /// since no sequence of valid guesses could ever reveal them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dictionary = Self::from_words(content.lines())
            .map_err(|_| DictionaryError::Empty(path.display().to_string()))?;
        info!(
            "Loaded {} words from {}",
            dictionary.words.len(),
            path.display()
        );
        Ok(dictionary)
    }

    pub fn from_words<I, S>(words: I) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_words_with_rng(words, StdRng::from_entropy())
    }

    /// Same as [`Dictionary::from_words`] but with a reproducible selection order
    pub fn from_words_seeded<I, S>(words: I, seed: u64) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_words_with_rng(words, StdRng::seed_from_u64(seed))
    }

    fn from_words_with_rng<I, S>(words: I, rng: StdRng) -> Result<Self, DictionaryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0usize;
        let words: Vec<String> = words
            .into_iter()
            .filter_map(|entry| {
                let trimmed = entry.as_ref().trim();
                if is_playable(trimmed) {
                    Some(trimmed.to_string())
                } else {
                    if !trimmed.is_empty() {
                        skipped += 1;
                    }
                    None
                }
            })
            .collect();

        if skipped > 0 {
            warn!("Skipped {} word list entries that are not lowercase a-z", skipped);
        }
        if words.is_empty() {
            return Err(DictionaryError::Empty("<memory>".to_string()));
        }

        Ok(Self { words, rng })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

impl WordSource for Dictionary {
    fn choose(&mut self) -> String {
        let index = self.rng.gen_range(0..self.words.len());
        self.words[index].clone()
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

fn is_playable(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_lowercase())
}
