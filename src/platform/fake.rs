//! Recording platform for tests
//!
//! Counts creates and releases per resource kind, records draw calls and lets
//! tests inject failures into the next call of a given operation.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use super::{FontRasterizer, Platform, PlatformEvent};
use crate::common::color::Rgba;
use crate::common::types::{Dimensions, Rect};
use crate::error::PlatformError;

/// Width of every glyph produced by the fake rasterizer
pub const GLYPH_WIDTH: u32 = 10;

#[derive(Debug)]
pub struct FakeWindow {
    pub id: u32,
}

#[derive(Debug)]
pub struct FakeRenderer {
    pub id: u32,
    pub window: u32,
}

#[derive(Debug)]
pub struct FakeSurface {
    pub id: u32,
    pub size: Dimensions,
}

#[derive(Debug)]
pub struct FakeTexture {
    pub id: u32,
    pub size: Dimensions,
}

#[derive(Debug)]
pub struct FakeFont {
    pub id: u32,
    pub path: PathBuf,
    pub point_size: f32,
}

#[derive(Default)]
pub struct FakePlatform {
    next_id: Cell<u32>,
    created: RefCell<HashMap<&'static str, usize>>,
    released: RefCell<HashMap<&'static str, usize>>,
    release_order: RefCell<Vec<&'static str>>,
    failures: RefCell<HashSet<&'static str>>,
    window_sizes: RefCell<HashMap<u32, Dimensions>>,
    events: RefCell<VecDeque<PlatformEvent>>,
    draws: RefCell<Vec<Rect>>,
    draw_color: Cell<Option<Rgba>>,
    clears: Cell<usize>,
    presents: Cell<usize>,
    quit_after_polls: Cell<Option<usize>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call of `operation` fail
    pub fn fail_next(&self, operation: &'static str) {
        self.failures.borrow_mut().insert(operation);
    }

    pub fn push_event(&self, event: PlatformEvent) {
        self.events.borrow_mut().push_back(event);
    }

    /// Report `Quit` once `polls` event polls have come back without it
    pub fn quit_after_polls(&self, polls: usize) {
        self.quit_after_polls.set(Some(polls));
    }

    /// Simulate a user resize of every open window
    pub fn resize_windows(&self, size: Dimensions) {
        for dims in self.window_sizes.borrow_mut().values_mut() {
            *dims = size;
        }
    }

    pub fn created(&self, kind: &str) -> usize {
        self.created.borrow().get(kind).copied().unwrap_or(0)
    }

    pub fn released(&self, kind: &str) -> usize {
        self.released.borrow().get(kind).copied().unwrap_or(0)
    }

    pub fn live(&self, kind: &str) -> usize {
        self.created(kind) - self.released(kind)
    }

    /// Number of live resources across all kinds
    pub fn live_total(&self) -> usize {
        let created: usize = self.created.borrow().values().sum();
        let released: usize = self.released.borrow().values().sum();
        created - released
    }

    pub fn release_order(&self) -> Vec<&'static str> {
        self.release_order.borrow().clone()
    }

    pub fn draws(&self) -> Vec<Rect> {
        self.draws.borrow().clone()
    }

    pub fn draw_color(&self) -> Option<Rgba> {
        self.draw_color.get()
    }

    pub fn clears(&self) -> usize {
        self.clears.get()
    }

    pub fn presents(&self) -> usize {
        self.presents.get()
    }

    /// A counted font that skips the filesystem
    pub fn fake_font(&self, point_size: f32) -> FakeFont {
        FakeFont {
            id: self.acquire("font"),
            path: PathBuf::from("fake.ttf"),
            point_size,
        }
    }

    fn check(&self, operation: &'static str) -> Result<(), PlatformError> {
        if self.failures.borrow_mut().remove(operation) {
            return Err(PlatformError::new(format!("injected {operation} failure")));
        }
        Ok(())
    }

    fn acquire(&self, kind: &'static str) -> u32 {
        *self.created.borrow_mut().entry(kind).or_default() += 1;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn record_release(&self, kind: &'static str) {
        *self.released.borrow_mut().entry(kind).or_default() += 1;
        self.release_order.borrow_mut().push(kind);
    }
}

impl FontRasterizer for FakePlatform {
    type Font = FakeFont;
    type Surface = FakeSurface;

    fn open_font(&self, path: &Path, point_size: f32) -> Result<FakeFont, PlatformError> {
        self.check("font")?;
        let data = std::fs::read(path).map_err(|e| {
            PlatformError::new(format!("Couldn't open {}: {}", path.display(), e))
        })?;
        if data.is_empty() {
            return Err(PlatformError::new("Font file is empty"));
        }
        Ok(FakeFont {
            id: self.acquire("font"),
            path: path.to_path_buf(),
            point_size,
        })
    }

    fn close_font(&self, _font: FakeFont) {
        self.record_release("font");
    }

    fn render_text(
        &self,
        font: &FakeFont,
        text: &str,
        _color: Rgba,
    ) -> Result<FakeSurface, PlatformError> {
        self.check("pixel buffer")?;
        let size = if text.is_empty() {
            Dimensions::default()
        } else {
            Dimensions::new(
                GLYPH_WIDTH * text.chars().count() as u32,
                font.point_size.ceil() as u32,
            )
        };
        Ok(FakeSurface {
            id: self.acquire("pixel buffer"),
            size,
        })
    }

    fn surface_size(&self, surface: &FakeSurface) -> Dimensions {
        surface.size
    }

    fn destroy_surface(&self, _surface: FakeSurface) {
        self.record_release("pixel buffer");
    }
}

impl Platform for FakePlatform {
    type Window = FakeWindow;
    type Renderer = FakeRenderer;
    type Texture = FakeTexture;

    fn create_window(&self, _title: &str, size: Dimensions) -> Result<FakeWindow, PlatformError> {
        self.check("window")?;
        let id = self.acquire("window");
        self.window_sizes.borrow_mut().insert(id, size);
        Ok(FakeWindow { id })
    }

    fn destroy_window(&self, window: FakeWindow) {
        self.window_sizes.borrow_mut().remove(&window.id);
        self.record_release("window");
    }

    fn window_size(&self, window: &FakeWindow) -> Result<Dimensions, PlatformError> {
        self.window_sizes
            .borrow()
            .get(&window.id)
            .copied()
            .ok_or_else(|| PlatformError::new("Invalid window"))
    }

    fn create_renderer(&self, window: &FakeWindow) -> Result<FakeRenderer, PlatformError> {
        self.check("renderer")?;
        Ok(FakeRenderer {
            id: self.acquire("renderer"),
            window: window.id,
        })
    }

    fn destroy_renderer(&self, _renderer: FakeRenderer) {
        self.record_release("renderer");
    }

    fn set_draw_color(&self, _renderer: &FakeRenderer, color: Rgba) -> Result<(), PlatformError> {
        self.draw_color.set(Some(color));
        Ok(())
    }

    fn clear(&self, _renderer: &FakeRenderer) -> Result<(), PlatformError> {
        self.check("clear")?;
        self.clears.set(self.clears.get() + 1);
        Ok(())
    }

    fn present(&self, _renderer: &FakeRenderer) -> Result<(), PlatformError> {
        self.check("present")?;
        self.presents.set(self.presents.get() + 1);
        Ok(())
    }

    fn create_texture(
        &self,
        _renderer: &FakeRenderer,
        surface: &FakeSurface,
    ) -> Result<FakeTexture, PlatformError> {
        self.check("texture")?;
        if surface.size.is_empty() {
            return Err(PlatformError::new("Texture dimensions are limited to at least 1x1"));
        }
        Ok(FakeTexture {
            id: self.acquire("texture"),
            size: surface.size,
        })
    }

    fn destroy_texture(&self, _texture: FakeTexture) {
        self.record_release("texture");
    }

    fn draw_texture(
        &self,
        _renderer: &FakeRenderer,
        _texture: &FakeTexture,
        dest: Rect,
    ) -> Result<(), PlatformError> {
        self.check("draw")?;
        self.draws.borrow_mut().push(dest);
        Ok(())
    }

    fn poll_events(&self) -> Result<Vec<PlatformEvent>, PlatformError> {
        self.check("poll")?;
        let mut events: Vec<PlatformEvent> = self.events.borrow_mut().drain(..).collect();
        match self.quit_after_polls.get() {
            Some(0) => events.push(PlatformEvent::Quit),
            Some(n) => self.quit_after_polls.set(Some(n - 1)),
            None => {}
        }
        Ok(events)
    }
}
