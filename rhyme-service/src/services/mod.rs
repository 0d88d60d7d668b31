pub mod metrics;
pub mod providers;
pub mod rhyme_lookup;
pub mod word_generator;

pub use rhyme_lookup::RhymeLookup;
pub use word_generator::WordGenerator;
