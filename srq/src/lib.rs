// src/lib.rs
pub mod cli;
pub mod config;
pub mod core;
pub mod ignore;
pub mod models;
pub mod utils;
pub mod vault;

pub use cli::{Args, Command, run};
pub use config::Config;
pub use crate::core::deck::{Decks, ReviewDeck};
pub use crate::core::extract::{Extraction, extract};
pub use crate::core::queue::{BucketLabel, ReviewQueue, build_queue};
pub use crate::core::serialize::{SerializeError, reschedule, serialize};
