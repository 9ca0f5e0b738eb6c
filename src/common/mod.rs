//! Shared helpers used across the shell

pub mod color;
pub mod debug;
pub mod types;
