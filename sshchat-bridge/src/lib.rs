//! SSH Chat bridge library target.
//!
//! Exposes the front-end modules for integration tests. The binary entry
//! point is in `main.rs`.

pub mod app;
pub mod cli;
pub mod local;
pub mod render;
