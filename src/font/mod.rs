//! Font discovery, loading and rasterization

pub mod cache;
pub mod loader;
pub mod rendering;

pub use cache::FontDirectoryCache;
pub use loader::FontLoader;
pub use rendering::{LoadedFont, RenderedText};
