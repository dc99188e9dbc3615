//! src/mappers/mod.rs
mod word_counter;

pub use word_counter::{WordCounter, normalize};
