//! rhyme-service: random words by rhyme difficulty, and rhymes for a word.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
