//! TrueType loading and rasterization via fontdue

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::common::color::Rgba;
use crate::common::types::Dimensions;
use crate::constants::x11::BYTES_PER_PIXEL;

/// Rendered text as BGRA bitmap (optimized for X11)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedText {
    pub width: usize,
    pub height: usize,
    /// Premultiplied little-endian ARGB (BGRA in memory): Blue, Green, Red, Alpha
    pub data: Vec<u8>,
}

impl RenderedText {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width as u32, self.height as u32)
    }
}

/// A parsed font bound to one pixel size
#[derive(Debug)]
pub struct LoadedFont {
    font: Font,
    size: f32,
}

impl LoadedFont {
    /// Read and parse a TrueType/OpenType file
    pub fn from_path(path: &Path, size: f32) -> Result<Self> {
        debug!(path = %path.display(), size = size, "Attempting to load font from path");

        let font_data = fs::read(path).with_context(|| {
            format!(
                "Failed to read font file: {}. Check that the file exists and is readable.",
                path.display()
            )
        })?;

        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!(
                "Failed to parse font file '{}': {}. Font may be corrupt or in an unsupported format.",
                path.display(),
                e
            ))?;

        debug!(path = %path.display(), "Successfully loaded font from path");
        Ok(Self { font, size })
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Render a single line of text to a BGRA bitmap.
    ///
    /// The bitmap is at least one line tall for any non-empty text (whitespace
    /// included); empty text yields a 0×0 bitmap.
    pub fn render_text(&self, text: &str, color: Rgba) -> RenderedText {
        if text.is_empty() {
            return RenderedText::default();
        }

        let mut glyphs = Vec::new();
        let mut x = 0.0f32;
        let mut max_ascent = 0i32;
        let mut max_descent = 0i32;
        let mut right_edge = 0i32;
        let mut left_edge = 0i32;

        if let Some(line) = self.font.horizontal_line_metrics(self.size) {
            max_ascent = line.ascent.ceil() as i32;
            max_descent = (-line.descent).ceil() as i32;
        }

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.size);
            let ascent = metrics.height as i32 + metrics.ymin;
            let descent = -metrics.ymin;
            max_ascent = max_ascent.max(ascent);
            max_descent = max_descent.max(descent);

            let x_offset = x as i32 + metrics.xmin;
            left_edge = left_edge.min(x_offset);
            right_edge = right_edge.max(x_offset + metrics.width as i32);
            glyphs.push((x_offset, metrics, bitmap));
            x += metrics.advance_width;
        }

        // Shift everything right so glyphs with a negative left bearing are not clipped
        let shift = -left_edge;
        let width = ((x.ceil() as i32).max(right_edge) + shift).max(0) as usize;
        let height = (max_ascent + max_descent).max(0) as usize;

        if width == 0 || height == 0 {
            return RenderedText::default();
        }

        let mut data = vec![0u8; width * height * BYTES_PER_PIXEL];

        let fg_a = color.a as u32;
        let fg_r = color.r as u32;
        let fg_g = color.g as u32;
        let fg_b = color.b as u32;

        for (x_offset, metrics, bitmap) in glyphs {
            let x_offset = x_offset + shift;
            let baseline_y = max_ascent - (metrics.height as i32 + metrics.ymin);

            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let px = x_offset + gx as i32;
                    let py = baseline_y + gy as i32;

                    if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                        continue;
                    }

                    let coverage = bitmap[gy * metrics.width + gx] as u32;
                    if coverage == 0 {
                        continue;
                    }

                    // Premultiplied: channel * alpha * coverage
                    let alpha = (fg_a * coverage) / 255;
                    let idx = ((py as usize) * width + (px as usize)) * BYTES_PER_PIXEL;

                    // Overlapping glyphs keep the stronger coverage
                    if alpha as u8 <= data[idx + 3] {
                        continue;
                    }
                    data[idx] = ((fg_b * alpha) / 255) as u8;
                    data[idx + 1] = ((fg_g * alpha) / 255) as u8;
                    data[idx + 2] = ((fg_r * alpha) / 255) as u8;
                    data[idx + 3] = alpha as u8;
                }
            }
        }

        RenderedText {
            width,
            height,
            data,
        }
    }
}
