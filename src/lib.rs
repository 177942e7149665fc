pub mod cli;
pub mod commands;
pub mod config;
pub mod index;
pub mod logging;
pub mod mcp;
pub mod metrics;
pub mod registry;
pub mod scanner;
pub mod script;
pub mod search;
pub mod validate;
pub mod watcher;
pub mod web;

pub use config::Config;
pub use index::{Anchor, SearchEntry, SearchIndex};
