//! Spec metadata, relationship graph and sub-document validation.
//!
//! A spec is a directory holding a primary markdown document with a `---`
//! header plus optional sibling sub-documents. This crate parses the headers,
//! links specs into a dependency graph, checks sub-document quality, and
//! recovers metadata for documents written before headers existed.

pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod git;
pub mod graph;
pub mod infer;
pub mod parser;
pub mod spec;
pub mod validate;
