//! market-pulse: crypto news sentiment monitor.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod news;
pub mod sentiment;
pub mod prices;
pub mod engine;
