//! Exclusive ownership of native resources
//!
//! `Handle` owns at most one raw resource and releases it exactly once: on drop,
//! on `reset`/`release`, or never if ownership is handed out with `into_raw`.
//! Handles are not `Clone`; moving one moves the obligation to release.
//!
//! Each handle borrows the platform that created it, so none can outlive it.
//! Composite owners declare inner handles before outer ones (texture before
//! renderer before window) because struct fields drop in declaration order.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::platform::{FontRasterizer, Platform};

/// A kind of native resource and its release action
pub trait Resource<P: Platform + ?Sized> {
    /// Name used in logs and errors
    const KIND: &'static str;
    type Raw;

    fn release(platform: &P, raw: Self::Raw);
}

/// Surface target (OS window)
#[derive(Debug)]
pub enum SurfaceTarget {}

/// Drawing context paired with a surface target
#[derive(Debug)]
pub enum DrawingContext {}

/// Client-side pixel buffer
#[derive(Debug)]
pub enum PixelBuffer {}

/// Renderer-bound texture
#[derive(Debug)]
pub enum Texture {}

/// Opened font at one point size
#[derive(Debug)]
pub enum FontFace {}

impl<P: Platform + ?Sized> Resource<P> for SurfaceTarget {
    const KIND: &'static str = "window";
    type Raw = P::Window;

    fn release(platform: &P, raw: Self::Raw) {
        platform.destroy_window(raw);
    }
}

impl<P: Platform + ?Sized> Resource<P> for DrawingContext {
    const KIND: &'static str = "renderer";
    type Raw = P::Renderer;

    fn release(platform: &P, raw: Self::Raw) {
        platform.destroy_renderer(raw);
    }
}

impl<P: Platform + ?Sized> Resource<P> for PixelBuffer {
    const KIND: &'static str = "pixel buffer";
    type Raw = <P as FontRasterizer>::Surface;

    fn release(platform: &P, raw: Self::Raw) {
        platform.destroy_surface(raw);
    }
}

impl<P: Platform + ?Sized> Resource<P> for Texture {
    const KIND: &'static str = "texture";
    type Raw = P::Texture;

    fn release(platform: &P, raw: Self::Raw) {
        platform.destroy_texture(raw);
    }
}

impl<P: Platform + ?Sized> Resource<P> for FontFace {
    const KIND: &'static str = "font";
    type Raw = <P as FontRasterizer>::Font;

    fn release(platform: &P, raw: Self::Raw) {
        platform.close_font(raw);
    }
}

/// Move-only owner of one native resource of kind `K`
pub struct Handle<'p, P: Platform + ?Sized, K: Resource<P>> {
    platform: &'p P,
    raw: Option<K::Raw>,
    _kind: PhantomData<K>,
}

pub type WindowHandle<'p, P> = Handle<'p, P, SurfaceTarget>;
pub type RendererHandle<'p, P> = Handle<'p, P, DrawingContext>;
pub type SurfaceHandle<'p, P> = Handle<'p, P, PixelBuffer>;
pub type TextureHandle<'p, P> = Handle<'p, P, Texture>;
pub type FontHandle<'p, P> = Handle<'p, P, FontFace>;

impl<'p, P: Platform + ?Sized, K: Resource<P>> Handle<'p, P, K> {
    /// Take ownership of `raw`
    pub fn new(platform: &'p P, raw: K::Raw) -> Self {
        Self {
            platform,
            raw: Some(raw),
            _kind: PhantomData,
        }
    }

    /// A handle that owns nothing
    pub fn null(platform: &'p P) -> Self {
        Self {
            platform,
            raw: None,
            _kind: PhantomData,
        }
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_none()
    }

    pub fn get(&self) -> Option<&K::Raw> {
        self.raw.as_ref()
    }

    /// Release the current resource (if any) and take ownership of `raw`
    pub fn reset(&mut self, raw: Option<K::Raw>) {
        let previous = std::mem::replace(&mut self.raw, raw);
        if let Some(previous) = previous {
            trace!(kind = K::KIND, "Releasing native resource");
            K::release(self.platform, previous);
        }
    }

    /// Release now. A no-op on a null handle.
    pub fn release(&mut self) {
        self.reset(None);
    }

    /// Move ownership into a new handle, leaving this one null
    pub fn take(&mut self) -> Self {
        Self {
            platform: self.platform,
            raw: self.raw.take(),
            _kind: PhantomData,
        }
    }

    /// Give up ownership without releasing; the caller becomes responsible
    pub fn into_raw(mut self) -> Option<K::Raw> {
        self.raw.take()
    }
}

impl<P: Platform + ?Sized, K: Resource<P>> Drop for Handle<'_, P, K> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<P: Platform + ?Sized, K: Resource<P>> fmt::Debug for Handle<'_, P, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &K::KIND)
            .field("null", &self.is_null())
            .finish()
    }
}
