//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// X11 protocol and rendering constants
pub mod x11 {
    /// Standard 32-bit color depth required for ARGB textures
    pub const ARGB_DEPTH: u8 = 32;

    /// Bytes per pixel of a BGRA pixel buffer
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Class name written to WM_CLASS (instance\0class\0)
    pub const WM_CLASS: &[u8] = b"dxball-shell\0dxball-shell\0";
}

/// Font discovery constants
pub mod fonts {
    /// File extensions (lowercase, without dot) treated as font files
    pub const EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

    /// Directory name holding bundled assets
    pub const ASSETS_DIR: &str = "assets";

    /// Source tree directory that may contain an assets bundle
    pub const SOURCE_DIR: &str = "src";
}

/// Window defaults
pub mod window {
    pub const TITLE: &str = "DX-Ball";
    pub const WIDTH: u32 = 800;
    pub const HEIGHT: u32 = 600;

    /// Clear color (#AARRGGBB)
    pub const CLEAR_COLOR: &str = "#FF000000";

    /// Pause between frames so the loop does not spin a core
    pub const FRAME_INTERVAL: std::time::Duration = std::time::Duration::from_millis(16);
}

/// Text overlay defaults
pub mod text {
    pub const FONT_NAME: &str = "OpenSans-Regular.ttf";
    pub const FONT_SIZE: f32 = 36.0;
    pub const CONTENT: &str = "Hello World!";

    /// Text color (#AARRGGBB)
    pub const COLOR: &str = "#FFFFFFFF";
}

/// Configuration file location
pub mod config {
    /// Directory under the user's config dir
    pub const APP_DIR: &str = "dxball-shell";

    pub const FILENAME: &str = "config.json";
}
