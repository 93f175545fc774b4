//! CLI module for Signup Gate
//!
//! Provides subcommands:
//! - `serve`: HTTP signup API
//! - `check`: evaluate a form file offline

pub mod check;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Signup Gate - registration form validation and submission
#[derive(Parser)]
#[command(name = "signup-gate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the signup HTTP API
    Serve(serve::ServeArgs),

    /// Evaluate a form against a user directory without starting a server
    Check(check::CheckArgs),
}

/// Load `.env` and layered configuration, then install logging
pub(crate) fn bootstrap() -> AppConfig {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();

    if let Err(e) = logging::init_logging(&config.logging) {
        eprintln!("Logging already initialized: {}", e);
    }

    config
}
