//! Common utilities for the tagtree workspace.
//!
//! This crate provides shared infrastructure used by the parser, the
//! element model, and the command-line wrapper:
//! - **Warning System** - deduplicated, colored stderr output for
//!   recoverable oddities in the input

pub mod warning;
