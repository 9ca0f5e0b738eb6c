//! Single-line text drawn from a cached texture

use tracing::debug;

use super::window::Window;
use crate::common::color::Rgba;
use crate::common::types::{Dimensions, Position, Rect};
use crate::error::{ShellError, ShellResult};
use crate::font::FontLoader;
use crate::handle::{FontHandle, Handle, SurfaceHandle, TextureHandle};
use crate::platform::Platform;

/// Owns a font and the texture last rasterized from it.
///
/// Starts without a texture; `set_text` produces one and replaces it wholesale
/// on every call. Borrowing the window keeps the texture from outliving the
/// renderer it was uploaded to.
pub struct TextRenderer<'w, 'p, P: Platform> {
    texture: TextureHandle<'p, P>,
    font: FontHandle<'p, P>,
    window: &'w Window<'p, P>,
    dimensions: Dimensions,
}

impl<'w, 'p, P: Platform> TextRenderer<'w, 'p, P> {
    /// Bind an already opened font
    pub fn with_font(window: &'w Window<'p, P>, font: FontHandle<'p, P>) -> Self {
        Self {
            texture: Handle::null(window.platform()),
            font,
            window,
            dimensions: Dimensions::default(),
        }
    }

    /// Load `font_name` at `point_size` through `loader` and bind it
    pub fn load(
        window: &'w Window<'p, P>,
        loader: &mut FontLoader<'p, P>,
        font_name: &str,
        point_size: f32,
    ) -> ShellResult<Self> {
        let font = loader.load(font_name, point_size)?;
        Ok(Self::with_font(window, font))
    }

    /// Rasterize `text` and upload it as the new texture.
    ///
    /// On failure the previous texture and dimensions stay in place. Empty text
    /// releases the texture and records `(0, 0)`.
    pub fn set_text(&mut self, text: &str, color: Rgba) -> ShellResult<()> {
        let platform = self.window.platform();
        let font = match self.font.get() {
            Some(font) => font,
            None => unreachable!("text renderer font is only released on drop"),
        };

        let surface: SurfaceHandle<'p, P> = Handle::new(
            platform,
            platform
                .render_text(font, text, color)
                .map_err(ShellError::render("text rasterization"))?,
        );
        let Some(surface_raw) = surface.get() else {
            unreachable!("freshly rendered surface handle is never null")
        };
        let size = platform.surface_size(surface_raw);

        if size.is_empty() {
            debug!(text = text, "Empty text, dropping texture");
            self.texture.release();
            self.dimensions = Dimensions::default();
            return Ok(());
        }

        let texture = platform
            .create_texture(self.window.raw_renderer(), surface_raw)
            .map_err(ShellError::render("texture upload"))?;
        // The pixel buffer is never retained past the upload
        drop(surface);

        self.texture.reset(Some(texture));
        self.dimensions = size;
        debug!(
            text = text,
            width = size.width,
            height = size.height,
            "Rasterized text"
        );
        Ok(())
    }

    /// Draw at `(x, y)` (top-left) at the texture's native size.
    /// Draws nothing until `set_text` has produced a texture.
    pub fn render(&self, x: f32, y: f32) -> ShellResult<()> {
        match self.texture.get() {
            Some(texture) => self
                .window
                .draw_texture(texture, Rect::at(Position::new(x, y), self.dimensions)),
            None => Ok(()),
        }
    }

    /// Last recorded size; `(0, 0)` before any successful `set_text`
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{FakePlatform, GLYPH_WIDTH};
    use std::fs;

    fn text_renderer<'w, 'p>(
        window: &'w Window<'p, FakePlatform>,
        platform: &'p FakePlatform,
    ) -> TextRenderer<'w, 'p, FakePlatform> {
        TextRenderer::with_font(window, Handle::new(platform, platform.fake_font(36.0)))
    }

    #[test]
    fn test_uninitialized_state() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let text = text_renderer(&window, &platform);

        assert_eq!(text.dimensions(), Dimensions::new(0, 0));
        text.render(10.0, 10.0).unwrap();
        assert!(platform.draws().is_empty());
    }

    #[test]
    fn test_set_text_records_dimensions_and_frees_buffer() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let mut text = text_renderer(&window, &platform);

        text.set_text("X", Rgba::WHITE).unwrap();
        let dims = text.dimensions();
        assert!(dims.width > 0 && dims.height > 0);
        assert_eq!(dims, Dimensions::new(GLYPH_WIDTH, 36));
        assert_eq!(platform.live("pixel buffer"), 0);
        assert_eq!(platform.live("texture"), 1);
    }

    #[test]
    fn test_set_text_replaces_texture() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let mut text = text_renderer(&window, &platform);

        text.set_text("Hello", Rgba::WHITE).unwrap();
        text.set_text("Hello World!", Rgba::BLACK).unwrap();

        assert_eq!(platform.created("texture"), 2);
        assert_eq!(platform.live("texture"), 1);
        assert_eq!(text.dimensions().width, GLYPH_WIDTH * 12);
    }

    #[test]
    fn test_empty_text_is_zero_size_no_op() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let mut text = text_renderer(&window, &platform);

        text.set_text("abc", Rgba::WHITE).unwrap();
        text.set_text("", Rgba::WHITE).unwrap();

        assert_eq!(text.dimensions(), Dimensions::new(0, 0));
        assert_eq!(platform.live("texture"), 0);
        assert_eq!(platform.live("pixel buffer"), 0);
        text.render(0.0, 0.0).unwrap();
        assert!(platform.draws().is_empty());
    }

    #[test]
    fn test_render_uses_native_size() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let mut text = text_renderer(&window, &platform);

        text.set_text("abcd", Rgba::WHITE).unwrap();
        text.render(12.4, 30.0).unwrap();

        assert_eq!(
            platform.draws(),
            vec![Rect {
                x: 12,
                y: 30,
                width: GLYPH_WIDTH * 4,
                height: 36
            }]
        );
    }

    #[test]
    fn test_rasterize_failure_keeps_previous_texture() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let mut text = text_renderer(&window, &platform);
        text.set_text("ok", Rgba::WHITE).unwrap();

        platform.fail_next("pixel buffer");
        let err = text.set_text("broken", Rgba::WHITE).unwrap_err();
        assert!(matches!(
            err,
            ShellError::Render {
                stage: "text rasterization",
                ..
            }
        ));
        assert_eq!(text.dimensions().width, GLYPH_WIDTH * 2);
        assert_eq!(platform.live("texture"), 1);
    }

    #[test]
    fn test_upload_failure_releases_pixel_buffer() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let mut text = text_renderer(&window, &platform);
        text.set_text("ok", Rgba::WHITE).unwrap();

        platform.fail_next("texture");
        let err = text.set_text("broken", Rgba::WHITE).unwrap_err();
        assert!(err.to_string().contains("texture upload"));
        assert_eq!(platform.live("pixel buffer"), 0);
        assert_eq!(platform.live("texture"), 1);
        assert_eq!(text.dimensions().width, GLYPH_WIDTH * 2);
    }

    #[test]
    fn test_drop_releases_texture_before_font() {
        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        {
            let mut text = text_renderer(&window, &platform);
            text.set_text("x", Rgba::WHITE).unwrap();
        }
        assert_eq!(
            platform.release_order(),
            vec!["pixel buffer", "texture", "font"]
        );
        drop(window);
        assert_eq!(platform.live_total(), 0);
    }

    #[test]
    fn test_load_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        fs::create_dir_all(assets.join("fonts")).unwrap();
        fs::write(assets.join("fonts/OpenSans-Regular.ttf"), b"font-bytes").unwrap();

        let platform = FakePlatform::new();
        let window = Window::new(&platform, "t", Dimensions::new(800, 600)).unwrap();
        let mut loader = FontLoader::new(
            &platform,
            crate::font::FontDirectoryCache::with_search_paths(vec![assets]),
        );

        let mut text = TextRenderer::load(&window, &mut loader, "OpenSans-Regular.ttf", 36.0)
            .unwrap();
        text.set_text("Hello World!", Rgba::WHITE).unwrap();
        assert_eq!(text.dimensions(), Dimensions::new(GLYPH_WIDTH * 12, 36));

        let missing = TextRenderer::load(&window, &mut loader, "Missing.ttf", 12.0);
        assert!(matches!(missing, Err(ShellError::FontNotFound { .. })));
    }
}
