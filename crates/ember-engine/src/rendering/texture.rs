//! Textures and texture atlases.

use std::path::Path;

use glam::{IVec2, Vec2};

use crate::error::{RenderError, Result};

use super::backend::GpuTexture;
use super::handles::TextureId;

/// Decoded pixels ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// 3 for RGB8, 4 for RGBA8.
    pub channels: u32,
    pub pixels: Vec<u8>,
}

impl TextureData {
    pub fn new(width: u32, height: u32, channels: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            pixels,
        }
    }

    /// A single opaque white RGBA pixel.
    pub fn white_pixel() -> Self {
        Self::new(1, 1, 4, vec![255; 4])
    }

    /// Zero-filled pixels.
    pub fn blank(width: u32, height: u32, channels: u32) -> Self {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![0; len])
    }

    /// Decodes an image file into RGB8 or RGBA8, depending on whether the
    /// source carries alpha.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| match source {
            image::ImageError::IoError(source) => RenderError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => RenderError::ImageDecode {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let data = if image.color().has_alpha() {
            let rgba = image.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self::new(width, height, 4, rgba.into_raw())
        } else {
            let rgb = image.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self::new(width, height, 3, rgb.into_raw())
        };

        log::debug!(
            "decoded {} ({}x{}, {} channels)",
            path.display(),
            data.width,
            data.height,
            data.channels
        );
        Ok(data)
    }

    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }

    /// Checks the channel count and that `pixels` covers the whole image.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.channels, 3 | 4) {
            return Err(RenderError::UnsupportedChannelCount(self.channels));
        }
        if self.pixels.len() != self.expected_len() {
            return Err(RenderError::TextureDataSize {
                expected: self.expected_len(),
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }
}

/// Sub-rectangle of a texture in pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TextureRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A 2D texture owned by the resource arena.
pub struct Texture {
    gpu: Box<dyn GpuTexture>,
    width: u32,
    height: u32,
    channels: u32,
}

impl Texture {
    pub(crate) fn new(gpu: Box<dyn GpuTexture>, width: u32, height: u32, channels: u32) -> Self {
        Self {
            gpu,
            width,
            height,
            channels,
        }
    }

    pub fn render_id(&self) -> u32 {
        self.gpu.render_id()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    pub fn height_f(&self) -> f32 {
        self.height as f32
    }

    pub fn size_f(&self) -> Vec2 {
        Vec2::new(self.width_f(), self.height_f())
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Replaces a sub-region of the texture.
    ///
    /// Silently does nothing when the channel count is not 3 or 4, when
    /// `data` is shorter than `width * height * channels`, or when the region
    /// leaves the texture.
    pub fn edit(&mut self, x: u32, y: u32, width: u32, height: u32, data: &[u8]) {
        if !matches!(self.channels, 3 | 4) {
            return;
        }
        let needed = width as usize * height as usize * self.channels as usize;
        if data.len() < needed {
            return;
        }
        if x.saturating_add(width) > self.width || y.saturating_add(height) > self.height {
            return;
        }
        let region = TextureRegion {
            x,
            y,
            width,
            height,
        };
        self.gpu.edit(region, self.channels, &data[..needed]);
    }

    pub fn bind(&self, unit: u32) {
        self.gpu.bind(unit);
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("render_id", &self.render_id())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .finish()
    }
}

/// A UV sub-rectangle of an atlas texture.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SubTexture {
    texture: TextureId,
    uv_start: Vec2,
    uv_end: Vec2,
    size: IVec2,
}

impl SubTexture {
    pub fn new(texture: TextureId, atlas: &Texture, uv_start: Vec2, uv_end: Vec2) -> Self {
        let extent = (uv_end - uv_start) * atlas.size_f();
        Self {
            texture,
            uv_start,
            uv_end,
            size: IVec2::new(extent.x as i32, extent.y as i32),
        }
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    pub fn uv_start(&self) -> Vec2 {
        self.uv_start
    }

    pub fn uv_end(&self) -> Vec2 {
        self.uv_end
    }

    /// Size in pixels.
    pub fn size(&self) -> IVec2 {
        self.size
    }

    pub fn size_f(&self) -> Vec2 {
        self.size.as_vec2()
    }

    pub fn width(&self) -> u32 {
        self.size.x.max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.size.y.max(0) as u32
    }

    pub fn uv_width_f(&self) -> f32 {
        self.uv_end.x - self.uv_start.x
    }

    pub fn uv_height_f(&self) -> f32 {
        self.uv_end.y - self.uv_start.y
    }

    /// Maps a local U in `[0, 1]` into the atlas.
    pub fn transform_u(&self, u: f32) -> f32 {
        self.uv_start.x + self.uv_width_f() * u
    }

    pub fn transform_v(&self, v: f32) -> f32 {
        self.uv_start.y + self.uv_height_f() * v
    }

    pub fn transform_uv(&self, uv: Vec2) -> Vec2 {
        self.uv_start + (self.uv_end - self.uv_start) * uv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Call, RecordingBackend};
    use crate::rendering::Backend;
    use slotmap::KeyData;

    fn texture(backend: &RecordingBackend, data: &TextureData) -> Texture {
        let gpu = backend.create_texture(data).unwrap();
        Texture::new(gpu, data.width, data.height, data.channels)
    }

    fn edits(backend: &RecordingBackend) -> usize {
        backend
            .log()
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::EditTexture { .. }))
            .count()
    }

    // ── texture data ──────────────────────────────────────────────────────

    #[test]
    fn validate_rejects_two_channels() {
        let data = TextureData::blank(2, 2, 2);
        assert!(matches!(
            data.validate(),
            Err(RenderError::UnsupportedChannelCount(2))
        ));
    }

    #[test]
    fn validate_rejects_short_pixels() {
        let data = TextureData::new(2, 2, 4, vec![0; 15]);
        assert!(matches!(
            data.validate(),
            Err(RenderError::TextureDataSize {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn white_pixel_is_valid_rgba() {
        let data = TextureData::white_pixel();
        assert!(data.validate().is_ok());
        assert_eq!(data.pixels, vec![255, 255, 255, 255]);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = TextureData::load("./does/not/exist.png").unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }

    // ── edit ──────────────────────────────────────────────────────────────

    #[test]
    fn edit_uploads_region() {
        let backend = RecordingBackend::new();
        let mut tex = texture(&backend, &TextureData::blank(4, 4, 4));
        tex.edit(1, 1, 2, 2, &[7; 16]);
        assert_eq!(edits(&backend), 1);
    }

    #[test]
    fn edit_with_unsupported_channels_is_silent_noop() {
        let backend = RecordingBackend::new();
        let mut tex = texture(&backend, &TextureData::blank(4, 4, 1));
        tex.edit(0, 0, 4, 4, &[0; 64]);
        assert_eq!(edits(&backend), 0);
    }

    #[test]
    fn edit_with_short_data_is_silent_noop() {
        let backend = RecordingBackend::new();
        let mut tex = texture(&backend, &TextureData::blank(4, 4, 3));
        tex.edit(0, 0, 4, 4, &[0; 10]);
        assert_eq!(edits(&backend), 0);
    }

    #[test]
    fn edit_outside_texture_is_silent_noop() {
        let backend = RecordingBackend::new();
        let mut tex = texture(&backend, &TextureData::blank(4, 4, 4));
        tex.edit(3, 0, 2, 1, &[0; 8]);
        assert_eq!(edits(&backend), 0);
    }

    // ── sub texture ───────────────────────────────────────────────────────

    #[test]
    fn sub_texture_size_and_transforms() {
        let backend = RecordingBackend::new();
        let atlas = texture(&backend, &TextureData::blank(256, 128, 4));
        let id = TextureId::from(KeyData::from_ffi(1));
        let sub = SubTexture::new(id, &atlas, Vec2::new(0.25, 0.5), Vec2::new(0.5, 1.0));

        assert_eq!(sub.size(), IVec2::new(64, 64));
        assert_eq!(sub.width(), 64);
        assert_eq!(sub.uv_width_f(), 0.25);
        assert_eq!(sub.uv_height_f(), 0.5);
        assert_eq!(sub.transform_u(0.0), 0.25);
        assert_eq!(sub.transform_v(1.0), 1.0);
        assert_eq!(sub.transform_uv(Vec2::new(0.5, 0.5)), Vec2::new(0.375, 0.75));
    }
}
