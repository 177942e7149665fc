//! MCP front-end exposing the search table to agent clients.

pub mod server;

pub use server::DocdexServer;
