//! Core domain + application logic for the file relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram lives behind the
//! relay port (trait) implemented in the adapter crate.

pub mod audit;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod links;
pub mod logging;
pub mod relay;

pub use errors::{Error, Result};
