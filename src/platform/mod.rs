//! Narrow interfaces to the windowing system and the font rasterizer
//!
//! The shell core only talks to native resources through these traits. Every
//! `create_*`/`open_*` has a matching release call that consumes the raw value;
//! release calls report failures through logging only.

use std::path::Path;

use crate::common::color::Rgba;
use crate::common::types::{Dimensions, Rect};
use crate::error::PlatformError;

#[cfg(test)]
pub mod fake;

/// Input events the frame loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// The user asked to close the window
    Quit,
    /// The window was resized by the user or window manager
    Resized(Dimensions),
}

/// Opens fonts and rasterizes text into client-side pixel buffers
pub trait FontRasterizer {
    /// Opened font at a fixed point size
    type Font;
    /// Uncompressed pixel buffer produced by `render_text`
    type Surface;

    fn open_font(&self, path: &Path, point_size: f32) -> Result<Self::Font, PlatformError>;
    fn close_font(&self, font: Self::Font);

    /// Rasterize `text` in a single line. Empty text yields a 0×0 surface.
    fn render_text(
        &self,
        font: &Self::Font,
        text: &str,
        color: Rgba,
    ) -> Result<Self::Surface, PlatformError>;
    fn surface_size(&self, surface: &Self::Surface) -> Dimensions;
    fn destroy_surface(&self, surface: Self::Surface);
}

/// Window, drawing context and texture primitives
pub trait Platform: FontRasterizer {
    /// On-screen surface target
    type Window;
    /// Drawing context bound to one window
    type Renderer;
    /// Device-resident image bound to one renderer
    type Texture;

    fn create_window(&self, title: &str, size: Dimensions) -> Result<Self::Window, PlatformError>;
    fn destroy_window(&self, window: Self::Window);
    fn window_size(&self, window: &Self::Window) -> Result<Dimensions, PlatformError>;

    fn create_renderer(&self, window: &Self::Window) -> Result<Self::Renderer, PlatformError>;
    fn destroy_renderer(&self, renderer: Self::Renderer);
    fn set_draw_color(&self, renderer: &Self::Renderer, color: Rgba) -> Result<(), PlatformError>;
    fn clear(&self, renderer: &Self::Renderer) -> Result<(), PlatformError>;
    fn present(&self, renderer: &Self::Renderer) -> Result<(), PlatformError>;

    fn create_texture(
        &self,
        renderer: &Self::Renderer,
        surface: &Self::Surface,
    ) -> Result<Self::Texture, PlatformError>;
    fn destroy_texture(&self, texture: Self::Texture);
    fn draw_texture(
        &self,
        renderer: &Self::Renderer,
        texture: &Self::Texture,
        dest: Rect,
    ) -> Result<(), PlatformError>;

    /// Drain every pending event without blocking
    fn poll_events(&self) -> Result<Vec<PlatformEvent>, PlatformError>;

    /// Called once per frame after `present`
    fn frame_pause(&self) {}
}
