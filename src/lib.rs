//! Minimal application shell: a window, a font directory cache, and a text
//! renderer whose native resources are owned by scoped handles.

#![deny(unsafe_code)]

pub mod app;
pub mod common;
pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod graphics;
pub mod handle;
pub mod platform;
pub mod x11;

pub use error::{PlatformError, ShellError, ShellResult};
