// src/core.rs
pub mod cards;
pub mod clock;
pub mod deck;
pub mod extract;
pub mod patterns;
pub mod queue;
pub mod serialize;
