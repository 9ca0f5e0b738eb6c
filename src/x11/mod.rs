//! X11 backend
//!
//! Implements the platform traits on top of an x11rb connection using the
//! RENDER extension for drawing and fontdue for text rasterization.

mod context;
mod platform;
mod resources;

pub use context::{CachedAtoms, CachedFormats};
pub use platform::X11Platform;
pub use resources::{BackBuffer, XRenderer, XTexture, XWindow};
