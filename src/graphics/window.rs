//! Window and its paired drawing context

use tracing::info;

use crate::common::color::Rgba;
use crate::common::types::{Dimensions, Rect};
use crate::error::{ShellError, ShellResult};
use crate::handle::{Handle, RendererHandle, WindowHandle};
use crate::platform::Platform;

/// Owns the surface target and the drawing context created for it.
///
/// The renderer is declared first so it is released before the window.
pub struct Window<'p, P: Platform> {
    renderer: RendererHandle<'p, P>,
    window: WindowHandle<'p, P>,
    platform: &'p P,
    title: String,
}

impl<'p, P: Platform> Window<'p, P> {
    /// Creates the window, then its renderer.
    ///
    /// # Errors
    /// `ResourceCreation` if either step fails; a window created before a
    /// failed renderer is released before the error is returned.
    pub fn new(platform: &'p P, title: &str, size: Dimensions) -> ShellResult<Self> {
        let window: WindowHandle<'p, P> = Handle::new(
            platform,
            platform
                .create_window(title, size)
                .map_err(ShellError::creation("window"))?,
        );

        let renderer_raw = match window.get() {
            Some(raw) => platform
                .create_renderer(raw)
                .map_err(ShellError::creation("renderer"))?,
            None => unreachable!("freshly created window handle is never null"),
        };
        let renderer = Handle::new(platform, renderer_raw);

        info!(
            title = title,
            width = size.width,
            height = size.height,
            "Created window"
        );

        Ok(Self {
            renderer,
            window,
            platform,
            title: title.to_string(),
        })
    }

    /// Live window size; may differ from the creation size after a resize
    pub fn size(&self) -> ShellResult<Dimensions> {
        self.platform
            .window_size(self.raw_window())
            .map_err(ShellError::render("window size query"))
    }

    /// Set the color used by subsequent `clear` calls
    pub fn set_clear_color(&self, color: Rgba) -> ShellResult<()> {
        self.platform
            .set_draw_color(self.raw_renderer(), color)
            .map_err(ShellError::render("draw color"))
    }

    pub fn clear(&self) -> ShellResult<()> {
        self.platform
            .clear(self.raw_renderer())
            .map_err(ShellError::render("clear"))
    }

    pub fn present(&self) -> ShellResult<()> {
        self.platform
            .present(self.raw_renderer())
            .map_err(ShellError::render("present"))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn platform(&self) -> &'p P {
        self.platform
    }

    pub(crate) fn raw_renderer(&self) -> &P::Renderer {
        match self.renderer.get() {
            Some(raw) => raw,
            None => unreachable!("window renderer is only released on drop"),
        }
    }

    fn raw_window(&self) -> &P::Window {
        match self.window.get() {
            Some(raw) => raw,
            None => unreachable!("window handle is only released on drop"),
        }
    }

    pub(crate) fn draw_texture(&self, texture: &P::Texture, dest: Rect) -> ShellResult<()> {
        self.platform
            .draw_texture(self.raw_renderer(), texture, dest)
            .map_err(ShellError::render("texture draw"))
    }
}
