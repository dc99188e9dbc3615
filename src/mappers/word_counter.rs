//! src/mappers/word_counter.rs
use crate::functions::{Key, KeyCount, MapEmitter, Mapper};

/// Strips every character that is not a Unicode letter or digit and
/// lowercases what is left. Returns `None` when nothing survives.
///
/// Lowercasing can expand a letter into a letter plus a combining mark
/// (`'İ'` becomes `"i\u{307}"`), so the result is filtered again.
pub fn normalize(token: &str) -> Option<Key> {
    let key: Key = token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric())
        .collect();
    (!key.is_empty()).then_some(key)
}

/// Emits `(word, 1)` for every whitespace-delimited token of a line, in order.
pub struct WordCounter<E> {
    emitter: E,
    tokens_emitted: u64,
    tokens_dropped: u64,
}

impl<E> WordCounter<E> {
    pub fn tokens_emitted(&self) -> u64 {
        self.tokens_emitted
    }

    /// Tokens whose normalized form was empty, e.g. `"--"` or `"..."`.
    pub fn tokens_dropped(&self) -> u64 {
        self.tokens_dropped
    }
}

impl<E: MapEmitter> Mapper for WordCounter<E> {
    type Emitter = E;

    fn build(emitter: E) -> Self {
        Self {
            emitter,
            tokens_emitted: 0,
            tokens_dropped: 0,
        }
    }

    fn map(&mut self, line: &str) -> std::io::Result<()> {
        for token in line.trim().split_whitespace() {
            match normalize(token) {
                Some(word) => {
                    self.emitter.emit(KeyCount::new(word, 1))?;
                    self.tokens_emitted += 1;
                }
                None => {
                    tracing::trace!(token, "Dropping token with no letters or digits");
                    self.tokens_dropped += 1;
                }
            }
        }
        Ok(())
    }

    fn into_emitter(self) -> E {
        self.emitter
    }
}
