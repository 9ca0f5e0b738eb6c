//! Window and text drawing on top of the platform layer

pub mod text;
pub mod window;

pub use text::TextRenderer;
pub use window::Window;
