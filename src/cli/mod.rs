//! Command-line interface for training grid-world agents
//!
//! The CLI is the configuration and reporting layer around the library:
//! it builds a run configuration, attaches observers, and prints or writes
//! the results.

pub mod commands;
pub mod config;
pub mod output;
