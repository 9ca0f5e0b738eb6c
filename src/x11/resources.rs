//! Raw X11 resource bundles handed to the shell core as opaque values

use std::cell::Cell;

use x11rb::protocol::render::Picture;
use x11rb::protocol::xproto::{Pixmap, Window};

use crate::common::color::Rgba;
use crate::common::types::Dimensions;

/// Top-level window
#[derive(Debug)]
pub struct XWindow {
    pub id: Window,
}

/// Off-screen pixmap the renderer draws into before `present`
#[derive(Debug, Clone, Copy)]
pub struct BackBuffer {
    pub pixmap: Pixmap,
    pub picture: Picture,
    pub size: Dimensions,
}

/// Drawing context for one window.
///
/// Draws land in the back buffer; `present` copies it onto the window picture.
/// The back buffer is recreated when the window size changes.
#[derive(Debug)]
pub struct XRenderer {
    pub window: Window,
    pub window_picture: Picture,
    pub back: Cell<BackBuffer>,
    pub draw_color: Cell<Rgba>,
}

/// ARGB pixmap plus the Render picture wrapping it
#[derive(Debug)]
pub struct XTexture {
    pub pixmap: Pixmap,
    pub picture: Picture,
    pub size: Dimensions,
}
