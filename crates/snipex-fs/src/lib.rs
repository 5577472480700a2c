//! Filesystem collaborators for the snipex engine.
//!
//! The engine itself is I/O-free. This crate supplies the two surfaces
//! around it: the [`Scanner`] that turns a source root into a stable,
//! deterministic list of input files, and the [`Writer`] that puts the
//! materialized snippets on disk, one file per snippet name.

mod scanner;
mod writer;

pub use scanner::Scanner;
pub use writer::{WriteFailure, Writer};
