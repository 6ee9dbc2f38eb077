//! Command handlers behind the CLI

pub mod update;

pub use update::handle_update_command;
