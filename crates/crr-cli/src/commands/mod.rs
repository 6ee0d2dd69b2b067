//! CLI command implementations
//!
//! Each submodule implements one subcommand. Console output happens here
//! and nowhere else in the workspace.

pub mod batch;
pub mod price;
pub mod timing;
