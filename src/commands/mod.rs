//! CLI subcommands that print content instead of serving it

pub mod list;
pub mod show;
