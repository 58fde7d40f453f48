//! Subcommand implementations. Each module exposes an `execute` entry point.

pub mod archive;
pub mod ecard;
pub mod history;
pub mod idea;
pub mod init;
pub mod milestone;
pub mod person;
pub mod shopping;
pub mod status;
pub mod task;
pub mod writing;
