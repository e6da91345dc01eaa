use std::rc::Rc;

use glow::{HasContext, PixelUnpackData};

use crate::error::Result;
use crate::rendering::{GpuTexture, TextureData, TextureRegion};

use super::gl_error;

pub(super) struct GlTexture {
    gl: Rc<glow::Context>,
    texture: glow::NativeTexture,
}

fn pixel_format(channels: u32) -> u32 {
    if channels == 3 { glow::RGB } else { glow::RGBA }
}

impl GlTexture {
    pub(super) fn new(gl: Rc<glow::Context>, data: &TextureData) -> Result<Self> {
        let format = pixel_format(data.channels);
        let texture = unsafe {
            let texture = gl
                .create_texture()
                .map_err(|e| gl_error("create texture", e))?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));

            let clamp = glow::CLAMP_TO_EDGE as i32;
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, clamp);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, clamp);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);

            // RGB rows are not 4-byte aligned in general.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                data.width as i32,
                data.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(data.pixels.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            texture
        };
        Ok(Self { gl, texture })
    }
}

impl GpuTexture for GlTexture {
    fn render_id(&self) -> u32 {
        self.texture.0.get()
    }

    fn edit(&mut self, region: TextureRegion, channels: u32, data: &[u8]) {
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                region.x as i32,
                region.y as i32,
                region.width as i32,
                region.height as i32,
                pixel_format(channels),
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(data)),
            );
        }
    }

    fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
        }
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.texture) };
    }
}
