//! deskhint library
//!
//! Fetches AI-generated reply suggestions for support tickets from a remote
//! suggestion function and normalizes the outcome into view state the CLI
//! (or any other front-end) can render.

pub mod assistant;
pub mod backend;
pub mod config;
pub mod error;
pub mod notification;
pub mod session;
pub mod suggestion;
