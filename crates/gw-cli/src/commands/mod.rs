//! CLI subcommand implementations.

pub mod emit;
pub mod report;
pub mod serve;
