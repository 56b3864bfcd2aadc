//! Library half of the `exprc` command-line tool.
//!
//! The binary in `main.rs` only dispatches arguments; everything it does
//! lives here so the integration tests can drive it directly. The core
//! crates expose token and error data; this crate owns input selection
//! (files, `-`, stdin), diagnostic rendering, and exit codes.

pub mod commands;
pub mod render;
pub mod trace;
