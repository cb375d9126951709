//! autoentry library
//!
//! Discovers page modules under a directory tree and turns them into named
//! bundle entry points, each loading its ancestor pages first.

pub mod cli;
pub mod config;
pub mod entries;
pub mod output;
pub mod utils;
pub mod watch;

pub use cli::Cli;
pub use config::Config;
pub use entries::{build, EntryBuild, EntryError, EntryMap, EntryMapBuilder};
