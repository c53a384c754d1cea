//! # sage-worker
//!
//! Wires configuration, the built-in engines, the route operator, and the
//! fusion orchestrator into a [`SageRuntime`], and exposes the
//! `sage-worker` command-line entry point.

pub mod cli;
pub mod runtime;

pub use runtime::SageRuntime;
