// ABOUTME: Library root for ongoku - exposes the deploy pipeline for the og binary and tests.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod output;
pub mod runner;
pub mod types;
