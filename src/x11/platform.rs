//! X11 + fontdue implementation of the platform traits
//!
//! Windows are plain InputOutput windows with WM_DELETE_WINDOW registered so
//! the close button arrives as a client message. Drawing goes through the
//! RENDER extension: a back-buffer pixmap per renderer, ARGB pixmaps for text
//! textures.

use std::cell::Cell;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use x11rb::connection::Connection;
use x11rb::protocol::Event;
use x11rb::protocol::render::{ConnectionExt as RenderExt, CreatePictureAux, PictOp};
use x11rb::protocol::xproto::*;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as WrapperExt;

use super::context::{CachedAtoms, CachedFormats};
use super::resources::{BackBuffer, XRenderer, XTexture, XWindow};
use crate::common::color::Rgba;
use crate::common::types::{Dimensions, Rect};
use crate::constants::{window as window_defaults, x11};
use crate::error::PlatformError;
use crate::font::{LoadedFont, RenderedText};
use crate::platform::{FontRasterizer, Platform, PlatformEvent};

/// Flatten an error chain into the single diagnostic string the core carries
fn diagnostic(err: anyhow::Error) -> PlatformError {
    PlatformError::new(format!("{:#}", err))
}

fn to_u16(value: u32, what: &str) -> Result<u16> {
    u16::try_from(value).with_context(|| format!("{} {} exceeds X11 limits", what, value))
}

fn to_i16(value: i32) -> i16 {
    value.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Connection to the X server plus cached atoms and picture formats
pub struct X11Platform {
    conn: RustConnection,
    screen_num: usize,
    atoms: CachedAtoms,
    formats: CachedFormats,
}

impl X11Platform {
    /// Connect to the display named by `$DISPLAY` and verify RENDER support
    pub fn connect() -> Result<Self, PlatformError> {
        Self::try_connect().map_err(diagnostic)
    }

    fn try_connect() -> Result<Self> {
        let (conn, screen_num) = x11rb::connect(None)
            .context("Failed to connect to X11 server. Is DISPLAY set correctly?")?;

        let screen = &conn.setup().roots[screen_num];
        info!(
            screen = screen_num,
            width = screen.width_in_pixels,
            height = screen.height_in_pixels,
            "Connected to X11 server"
        );

        conn.render_query_version(0, 11)
            .context("Failed to query RENDER extension version")?
            .reply()
            .context("RENDER extension is not available")?;

        let atoms = CachedAtoms::new(&conn).context("Failed to cache X11 atoms at startup")?;
        let formats = CachedFormats::new(&conn, screen)
            .context("Failed to cache picture formats at startup")?;
        debug!(?formats, "Picture formats cached");

        Ok(Self {
            conn,
            screen_num,
            atoms,
            formats,
        })
    }

    fn screen(&self) -> &Screen {
        &self.conn.setup().roots[self.screen_num]
    }

    fn try_create_window(&self, title: &str, size: Dimensions) -> Result<XWindow> {
        let width = to_u16(size.width, "Window width")?;
        let height = to_u16(size.height, "Window height")?;
        let screen = self.screen();

        let window = self
            .conn
            .generate_id()
            .context("Failed to generate X11 window ID")?;
        self.conn
            .create_window(
                screen.root_depth,
                window,
                screen.root,
                0,
                0,
                width,
                height,
                0,
                WindowClass::INPUT_OUTPUT,
                screen.root_visual,
                &CreateWindowAux::new()
                    .background_pixel(screen.black_pixel)
                    .event_mask(EventMask::STRUCTURE_NOTIFY | EventMask::EXPOSURE),
            )
            .context(format!("Failed to create window '{}'", title))?;

        // Destroy the window if any later step fails
        struct WindowGuard<'a> {
            conn: &'a RustConnection,
            window: Window,
            should_cleanup: bool,
        }

        impl Drop for WindowGuard<'_> {
            fn drop(&mut self) {
                if self.should_cleanup {
                    if let Err(e) = self.conn.destroy_window(self.window) {
                        error!(
                            window = self.window,
                            error = %e,
                            "Failed to cleanup window after initialization failure"
                        );
                    }
                    let _ = self.conn.flush();
                }
            }
        }

        let mut guard = WindowGuard {
            conn: &self.conn,
            window,
            should_cleanup: true,
        };

        self.conn
            .change_property8(
                PropMode::REPLACE,
                window,
                self.atoms.wm_name,
                AtomEnum::STRING,
                title.as_bytes(),
            )
            .context("Failed to set WM_NAME")?;
        self.conn
            .change_property8(
                PropMode::REPLACE,
                window,
                self.atoms.net_wm_name,
                self.atoms.utf8_string,
                title.as_bytes(),
            )
            .context("Failed to set _NET_WM_NAME")?;
        self.conn
            .change_property8(
                PropMode::REPLACE,
                window,
                self.atoms.wm_class,
                AtomEnum::STRING,
                x11::WM_CLASS,
            )
            .context("Failed to set WM_CLASS")?;
        // Deliver the close button as a client message instead of killing the connection
        self.conn
            .change_property32(
                PropMode::REPLACE,
                window,
                self.atoms.wm_protocols,
                AtomEnum::ATOM,
                &[self.atoms.wm_delete_window],
            )
            .context("Failed to set WM_PROTOCOLS")?;

        self.conn
            .map_window(window)
            .context(format!("Failed to map window '{}'", title))?;
        self.conn
            .flush()
            .context("Failed to flush X11 connection after window creation")?;

        guard.should_cleanup = false;
        debug!(window = window, title = title, "Mapped window");
        Ok(XWindow { id: window })
    }

    fn try_window_size(&self, window: Window) -> Result<Dimensions> {
        let geom = self
            .conn
            .get_geometry(window)
            .context("Failed to send geometry query")?
            .reply()
            .context(format!("Failed to get geometry for window {}", window))?;
        Ok(Dimensions::new(geom.width.into(), geom.height.into()))
    }

    fn create_back_buffer(&self, window: Window, size: Dimensions) -> Result<BackBuffer> {
        let width = to_u16(size.width.max(1), "Back buffer width")?;
        let height = to_u16(size.height.max(1), "Back buffer height")?;

        let pixmap = self
            .conn
            .generate_id()
            .context("Failed to generate ID for back buffer pixmap")?;
        self.conn
            .create_pixmap(self.screen().root_depth, pixmap, window, width, height)
            .context("Failed to create back buffer pixmap")?;

        let picture = match self.conn.generate_id() {
            Ok(id) => id,
            Err(e) => {
                self.free_pixmap(pixmap);
                return Err(e).context("Failed to generate ID for back buffer picture");
            }
        };
        if let Err(e) = self.conn.render_create_picture(
            picture,
            pixmap,
            self.formats.rgb,
            &CreatePictureAux::new(),
        ) {
            self.free_pixmap(pixmap);
            return Err(e).context("Failed to create back buffer picture");
        }

        Ok(BackBuffer {
            pixmap,
            picture,
            size,
        })
    }

    fn free_back_buffer(&self, back: BackBuffer) {
        self.free_picture(back.picture);
        self.free_pixmap(back.pixmap);
    }

    fn free_picture(&self, picture: u32) {
        if let Err(e) = self.conn.render_free_picture(picture) {
            error!(picture = picture, error = %e, "Failed to free picture");
        }
    }

    fn free_pixmap(&self, pixmap: Pixmap) {
        if let Err(e) = self.conn.free_pixmap(pixmap) {
            error!(pixmap = pixmap, error = %e, "Failed to free pixmap");
        }
    }

    fn flush_after_release(&self) {
        if let Err(e) = self.conn.flush() {
            error!(error = %e, "Failed to flush X11 connection during cleanup");
        }
    }

    fn try_create_renderer(&self, window: &XWindow) -> Result<XRenderer> {
        let size = self.try_window_size(window.id)?;

        let window_picture = self
            .conn
            .generate_id()
            .context("Failed to generate ID for window picture")?;
        self.conn
            .render_create_picture(
                window_picture,
                window.id,
                self.formats.rgb,
                &CreatePictureAux::new(),
            )
            .context("Failed to create window picture")?;

        let back = match self.create_back_buffer(window.id, size) {
            Ok(back) => back,
            Err(e) => {
                self.free_picture(window_picture);
                return Err(e);
            }
        };

        Ok(XRenderer {
            window: window.id,
            window_picture,
            back: Cell::new(back),
            draw_color: Cell::new(Rgba::BLACK),
        })
    }

    /// Current back buffer, recreated first if the window was resized
    fn back_buffer(&self, renderer: &XRenderer) -> Result<BackBuffer> {
        let back = renderer.back.get();
        let size = self.try_window_size(renderer.window)?;
        if size == back.size {
            return Ok(back);
        }

        debug!(
            window = renderer.window,
            width = size.width,
            height = size.height,
            "Window resized, recreating back buffer"
        );
        let fresh = self.create_back_buffer(renderer.window, size)?;
        self.free_back_buffer(back);
        renderer.back.set(fresh);
        Ok(fresh)
    }

    fn try_clear(&self, renderer: &XRenderer) -> Result<()> {
        let back = self.back_buffer(renderer)?;
        let rect = Rectangle {
            x: 0,
            y: 0,
            width: to_u16(back.size.width, "Window width")?,
            height: to_u16(back.size.height, "Window height")?,
        };
        self.conn
            .render_fill_rectangles(
                PictOp::SRC,
                back.picture,
                renderer.draw_color.get().to_x11_color(),
                &[rect],
            )
            .context("Failed to fill back buffer")?;
        Ok(())
    }

    fn try_present(&self, renderer: &XRenderer) -> Result<()> {
        let back = renderer.back.get();
        self.conn
            .render_composite(
                PictOp::SRC,
                back.picture,
                0u32,
                renderer.window_picture,
                0,
                0,
                0,
                0,
                0,
                0,
                to_u16(back.size.width, "Window width")?,
                to_u16(back.size.height, "Window height")?,
            )
            .context("Failed to copy back buffer to window")?;
        self.conn
            .flush()
            .context("Failed to flush X11 connection after present")?;
        Ok(())
    }

    fn try_create_texture(&self, surface: &RenderedText) -> Result<XTexture> {
        let size = surface.dimensions();
        let width = to_u16(size.width, "Texture width")?;
        let height = to_u16(size.height, "Texture height")?;
        if width == 0 || height == 0 {
            anyhow::bail!("Texture dimensions must be at least 1x1");
        }

        let pixmap = self
            .conn
            .generate_id()
            .context("Failed to generate ID for texture pixmap")?;
        self.conn
            .create_pixmap(x11::ARGB_DEPTH, pixmap, self.screen().root, width, height)
            .context("Failed to send texture pixmap request")?
            .check()
            .context("Failed to create texture pixmap")?;

        // Each request is checked so server-side errors surface here, not in the event queue
        let upload = || -> Result<u32> {
            let gc = self
                .conn
                .generate_id()
                .context("Failed to generate ID for upload graphics context")?;
            self.conn
                .create_gc(gc, pixmap, &CreateGCAux::new())
                .context("Failed to send upload graphics context request")?
                .check()
                .context("Failed to create upload graphics context")?;
            let put = self
                .conn
                .put_image(
                    ImageFormat::Z_PIXMAP,
                    pixmap,
                    gc,
                    width,
                    height,
                    0,
                    0,
                    0,
                    x11::ARGB_DEPTH,
                    &surface.data,
                )
                .context("Failed to send text image")
                .and_then(|cookie| cookie.check().context("Failed to upload text image"));
            if let Err(e) = self.conn.free_gc(gc) {
                warn!(gc = gc, error = %e, "Failed to free upload graphics context");
            }
            put?;

            let picture = self
                .conn
                .generate_id()
                .context("Failed to generate ID for texture picture")?;
            self.conn
                .render_create_picture(picture, pixmap, self.formats.argb, &CreatePictureAux::new())
                .context("Failed to send texture picture request")?
                .check()
                .context("Failed to create texture picture")?;
            Ok(picture)
        };

        match upload() {
            Ok(picture) => Ok(XTexture {
                pixmap,
                picture,
                size,
            }),
            Err(e) => {
                self.free_pixmap(pixmap);
                Err(e)
            }
        }
    }

    fn try_draw_texture(&self, renderer: &XRenderer, texture: &XTexture, dest: Rect) -> Result<()> {
        let back = renderer.back.get();
        self.conn
            .render_composite(
                PictOp::OVER,
                texture.picture,
                0u32,
                back.picture,
                0,
                0,
                0,
                0,
                to_i16(dest.x),
                to_i16(dest.y),
                to_u16(dest.width, "Texture width")?,
                to_u16(dest.height, "Texture height")?,
            )
            .context("Failed to composite texture onto back buffer")?;
        Ok(())
    }

    fn try_poll_events(&self) -> Result<Vec<PlatformEvent>> {
        let mut events = Vec::new();
        while let Some(event) = self
            .conn
            .poll_for_event()
            .context("Failed to poll for X11 event")?
        {
            match event {
                Event::ClientMessage(message)
                    if message.type_ == self.atoms.wm_protocols
                        && message.data.as_data32()[0] == self.atoms.wm_delete_window =>
                {
                    debug!(window = message.window, "Close requested");
                    events.push(PlatformEvent::Quit);
                }
                Event::ConfigureNotify(configure) => {
                    events.push(PlatformEvent::Resized(Dimensions::new(
                        configure.width.into(),
                        configure.height.into(),
                    )));
                }
                Event::Error(err) => {
                    warn!(error = ?err, "X11 protocol error");
                }
                _ => {}
            }
        }
        Ok(events)
    }
}

impl FontRasterizer for X11Platform {
    type Font = LoadedFont;
    type Surface = RenderedText;

    fn open_font(&self, path: &Path, point_size: f32) -> Result<LoadedFont, PlatformError> {
        LoadedFont::from_path(path, point_size).map_err(diagnostic)
    }

    fn close_font(&self, font: LoadedFont) {
        debug!(size = font.size(), "Closing font");
    }

    fn render_text(
        &self,
        font: &LoadedFont,
        text: &str,
        color: Rgba,
    ) -> Result<RenderedText, PlatformError> {
        Ok(font.render_text(text, color))
    }

    fn surface_size(&self, surface: &RenderedText) -> Dimensions {
        surface.dimensions()
    }

    fn destroy_surface(&self, _surface: RenderedText) {}
}

impl Platform for X11Platform {
    type Window = XWindow;
    type Renderer = XRenderer;
    type Texture = XTexture;

    fn create_window(&self, title: &str, size: Dimensions) -> Result<XWindow, PlatformError> {
        self.try_create_window(title, size).map_err(diagnostic)
    }

    fn destroy_window(&self, window: XWindow) {
        if let Err(e) = self.conn.destroy_window(window.id) {
            error!(window = window.id, error = %e, "Failed to destroy window");
        }
        self.flush_after_release();
    }

    fn window_size(&self, window: &XWindow) -> Result<Dimensions, PlatformError> {
        self.try_window_size(window.id).map_err(diagnostic)
    }

    fn create_renderer(&self, window: &XWindow) -> Result<XRenderer, PlatformError> {
        self.try_create_renderer(window).map_err(diagnostic)
    }

    fn destroy_renderer(&self, renderer: XRenderer) {
        self.free_back_buffer(renderer.back.get());
        self.free_picture(renderer.window_picture);
        self.flush_after_release();
    }

    fn set_draw_color(&self, renderer: &XRenderer, color: Rgba) -> Result<(), PlatformError> {
        renderer.draw_color.set(color);
        Ok(())
    }

    fn clear(&self, renderer: &XRenderer) -> Result<(), PlatformError> {
        self.try_clear(renderer).map_err(diagnostic)
    }

    fn present(&self, renderer: &XRenderer) -> Result<(), PlatformError> {
        self.try_present(renderer).map_err(diagnostic)
    }

    fn create_texture(
        &self,
        _renderer: &XRenderer,
        surface: &RenderedText,
    ) -> Result<XTexture, PlatformError> {
        self.try_create_texture(surface).map_err(diagnostic)
    }

    fn destroy_texture(&self, texture: XTexture) {
        self.free_picture(texture.picture);
        self.free_pixmap(texture.pixmap);
    }

    fn draw_texture(
        &self,
        renderer: &XRenderer,
        texture: &XTexture,
        dest: Rect,
    ) -> Result<(), PlatformError> {
        self.try_draw_texture(renderer, texture, dest)
            .map_err(diagnostic)
    }

    fn poll_events(&self) -> Result<Vec<PlatformEvent>, PlatformError> {
        self.try_poll_events().map_err(diagnostic)
    }

    fn frame_pause(&self) {
        std::thread::sleep(window_defaults::FRAME_INTERVAL);
    }
}
