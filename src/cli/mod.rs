//! CLI module - command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations

pub mod args;

pub use args::{Cli, Commands};
