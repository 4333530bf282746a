//! # privopt
//!
//! Application layer for the privopt policy engine: the CLI, the HTTP API
//! and fleet file loading. All policy decisions live in `privopt-core`.

pub mod api;
pub mod cli;
pub mod fleet;
