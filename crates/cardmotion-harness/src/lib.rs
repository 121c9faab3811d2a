#![forbid(unsafe_code)]

//! Command-line harness for cardmotion.
//!
//! `replay` drives a [`Card`](cardmotion_runtime::Card) from a JSONL input
//! script at a fixed frame rate and prints one JSONL record per frame.
//! `check-config` loads and validates a TOML or JSON card configuration.

pub mod cli;
pub mod error;
pub mod replay;
pub mod trace;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{HarnessError, Result};
