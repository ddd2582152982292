//! Terminal client for the educational portal.
//!
//! Drives the same controllers as the browser front-end, with the session
//! token kept in a JSON file and notices printed to the terminal.

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod shell;
