//! Domain models for the rhyme service.

pub mod rhyme;
pub mod word;

pub use rhyme::RhymeResult;
pub use word::{Difficulty, InvalidDifficulty, WordResult};
