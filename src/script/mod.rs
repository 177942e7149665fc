//! Reading and writing search index shards.
//!
//! The documentation generator emits its search table as JavaScript files
//! (`search/functions_8.js` and friends), each assigning an array literal
//! to `searchData`. This module is the codec for that format: a strict
//! parser with positioned errors, a canonical writer that round-trips
//! losslessly, and the entity escaping rules shared by both.

pub mod entities;
pub mod parser;
pub mod writer;

pub use parser::{parse, ScriptError};
pub use writer::write_table;
