//! Internal modules for the Teen Patti text client.
//!
//! This library provides command parsing, configuration, text views and
//! the command loop used by the tp_client binary.

pub mod app;
pub mod commands;
pub mod config;
pub mod view;
