//! CLI subcommand implementations.

pub mod input;
pub mod parse;
pub mod summary;
pub mod sync;
