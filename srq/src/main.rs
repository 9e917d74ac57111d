// src/main.rs
use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use srq::{Args, run};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    run(Args::parse())
}
