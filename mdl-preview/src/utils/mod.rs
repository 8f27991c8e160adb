//! Shared utilities for the mdl-preview CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
