//! mdl-preview library
//!
//! Command-line plumbing for rendering studio model previews.

pub mod cli;
pub mod commands;
pub mod utils;
