//! Configuration management
//!
//! Compiled defaults from `constants`, optionally overridden by a JSON file in
//! the user's config directory.

pub mod app;

pub use app::AppConfig;
