//! Internals of the Lobby command-line client.
//!
//! Argument parsing, logging setup and the command runner used by the
//! `lobby_client` binary.

pub mod app;
pub mod cli;
pub mod logging;
