//! tltctl library - exposes modules for testing

pub mod bridge;
pub mod cli;
pub mod commands;
pub mod errors;
pub mod logging;
pub mod terminal;
