//! CLI module for regressivos - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for the HTTP server, the
//! one-shot serverless handler, and a few admin conveniences.

pub mod commands;

pub use commands::Cli;
