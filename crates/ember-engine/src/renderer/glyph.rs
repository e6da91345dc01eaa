//! Glyph rasterization and the RGBA staging buffer glyphs are copied into.

use std::path::Path;

use glam::Vec2;

use crate::error::{RenderError, Result};

/// One rasterized character.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the bitmap's top-left, Y down.
    pub bearing: Vec2,
    /// Horizontal pen advance in whole pixels.
    pub advance: f32,
    /// `width * height` coverage values, row-major.
    pub coverage: Vec<u8>,
}

/// Produces coverage bitmaps for characters.
pub trait GlyphRasterizer {
    fn rasterize(&mut self, ch: char) -> Result<Glyph>;
}

/// [`GlyphRasterizer`] backed by a `fontdue` font at a fixed pixel size.
pub struct FontdueRasterizer {
    font: fontdue::Font,
    px: f32,
}

impl FontdueRasterizer {
    pub fn from_bytes(bytes: &[u8], px: f32) -> Result<Self> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| RenderError::Font(e.to_string()))?;
        Ok(Self { font, px })
    }

    pub fn load(path: impl AsRef<Path>, px: f32) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, px)
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn rasterize(&mut self, ch: char) -> Result<Glyph> {
        if self.font.lookup_glyph_index(ch) == 0 && !ch.is_whitespace() {
            return Err(RenderError::Font(format!("no glyph for {ch:?}")));
        }
        let (metrics, coverage) = self.font.rasterize(ch, self.px);
        Ok(Glyph {
            width: metrics.width as u32,
            height: metrics.height as u32,
            // fontdue reports the bottom edge relative to the baseline, Y up.
            bearing: Vec2::new(
                metrics.xmin as f32,
                -((metrics.ymin + metrics.height as i32) as f32),
            ),
            advance: metrics.advance_width.trunc(),
            coverage,
        })
    }
}

/// Fixed-size RGBA buffer a glyph is expanded into before upload.
#[derive(Debug, Clone)]
pub struct GlyphStaging {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl GlyphStaging {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Clears the buffer and writes `glyph` at the top-left as white pixels
    /// whose alpha is the coverage. Parts outside the buffer are clipped.
    pub fn write(&mut self, glyph: &Glyph) {
        self.pixels.fill(0);
        if glyph.coverage.len() < glyph.width as usize * glyph.height as usize {
            log::warn!("glyph coverage shorter than {}x{}", glyph.width, glyph.height);
            return;
        }
        let rows = glyph.height.min(self.height) as usize;
        let cols = glyph.width.min(self.width) as usize;
        let src_stride = glyph.width as usize;
        let dst_stride = self.width as usize * 4;

        for row in 0..rows {
            let src = &glyph.coverage[row * src_stride..][..cols];
            let dst = &mut self.pixels[row * dst_stride..][..cols * 4];
            for (px, &alpha) in dst.chunks_exact_mut(4).zip(src) {
                px.copy_from_slice(&[255, 255, 255, alpha]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(width: u32, height: u32) -> Glyph {
        Glyph {
            width,
            height,
            bearing: Vec2::ZERO,
            advance: width as f32,
            coverage: (0..width * height).map(|i| (i % 251) as u8 + 1).collect(),
        }
    }

    fn px(staging: &GlyphStaging, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * staging.width() + x) * 4) as usize;
        staging.pixels()[i..i + 4].try_into().unwrap()
    }

    // ── staging ───────────────────────────────────────────────────────────

    #[test]
    fn write_expands_coverage_to_white_alpha() {
        let mut staging = GlyphStaging::new(8, 8);
        let g = glyph(3, 2);
        staging.write(&g);

        assert_eq!(px(&staging, 0, 0), [255, 255, 255, g.coverage[0]]);
        assert_eq!(px(&staging, 2, 1), [255, 255, 255, g.coverage[5]]);
        assert_eq!(px(&staging, 3, 0), [0, 0, 0, 0]);
        assert_eq!(px(&staging, 0, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn write_clears_previous_glyph() {
        let mut staging = GlyphStaging::new(8, 8);
        staging.write(&glyph(8, 8));
        staging.write(&glyph(1, 1));
        assert_eq!(px(&staging, 7, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn oversized_glyph_is_clipped() {
        let mut staging = GlyphStaging::new(4, 4);
        let g = glyph(10, 6);
        staging.write(&g);
        assert_eq!(staging.pixels().len(), 4 * 4 * 4);
        assert_eq!(px(&staging, 3, 3), [255, 255, 255, g.coverage[3 * 10 + 3]]);
    }

    #[test]
    fn empty_glyph_leaves_buffer_clear() {
        let mut staging = GlyphStaging::new(2, 2);
        staging.write(&glyph(0, 0));
        assert!(staging.pixels().iter().all(|&b| b == 0));
    }

    // ── fontdue ───────────────────────────────────────────────────────────

    #[test]
    fn garbage_font_bytes_are_rejected() {
        assert!(matches!(
            FontdueRasterizer::from_bytes(&[0u8; 16], 32.0),
            Err(RenderError::Font(_))
        ));
    }

    #[test]
    fn missing_font_file_is_io_error() {
        assert!(matches!(
            FontdueRasterizer::load("./assets/fonts/missing.ttf", 32.0),
            Err(RenderError::Io { .. })
        ));
    }
}
