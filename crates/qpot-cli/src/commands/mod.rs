//! CLI command implementations.

pub mod circuit;
pub mod common;
pub mod list;
pub mod matrix;
pub mod verify;
pub mod version;
