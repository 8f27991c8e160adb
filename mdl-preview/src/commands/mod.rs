//! Command implementations for mdl-preview

pub mod render;
