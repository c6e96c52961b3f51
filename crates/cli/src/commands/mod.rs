//! CLI subcommands.

pub mod migrate;
