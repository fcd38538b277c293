// trading-bot library: CLI surface, settings and order pipeline
// Venue, signing and validation live in trading-common

pub mod app;
pub mod cli;
pub mod error;
pub mod orchestrator;
pub mod report;
pub mod settings;

pub use error::BotError;
