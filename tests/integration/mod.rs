//! Integration tests for specgraph
//!
//! These run against real spec directories on disk and real git
//! repositories, covering loading, graph building, validation, inference
//! and the command-line binary.

pub mod cli;
pub mod corpus;
pub mod git_history;
pub mod helpers;
