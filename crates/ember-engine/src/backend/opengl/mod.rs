//! OpenGL backend on top of `glow`.
//!
//! The caller creates the window and the GL context and hands the loaded
//! `glow::Context` over; everything here only issues GL calls on it. All
//! objects keep an `Rc` to the context and delete their GL name on drop.

mod buffers;
mod command;
mod shader;
mod texture;
mod uniform_buffer;

use std::cell::Cell;
use std::num::NonZeroU32;
use std::rc::Rc;

use glow::HasContext;

use crate::error::{RenderError, Result};
use crate::rendering::{
    Backend, GpuIndexBuffer, GpuShader, GpuTexture, GpuUniformBuffer, GpuVertexArray,
    GpuVertexBuffer, Primitive, RenderCommand, RenderCommandKind, ShaderDataType, ShaderSources,
    TextureData,
};

use buffers::{GlIndexBuffer, GlVertexArray, GlVertexBuffer};
use command::GlCommand;
use shader::GlShader;
use texture::GlTexture;
use uniform_buffer::GlUniformBuffer;

pub struct OpenGlBackend {
    gl: Rc<glow::Context>,
    next_binding: Cell<u32>,
}

impl OpenGlBackend {
    pub fn new(gl: Rc<glow::Context>) -> Self {
        unsafe {
            let version = gl.get_parameter_string(glow::VERSION);
            let renderer = gl.get_parameter_string(glow::RENDERER);
            log::info!("OpenGL {version} on {renderer}");
        }
        Self {
            gl,
            next_binding: Cell::new(0),
        }
    }

    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }
}

impl Backend for OpenGlBackend {
    fn name(&self) -> &'static str {
        "opengl"
    }

    fn create_vertex_buffer(&self, data: &[u8]) -> Result<Box<dyn GpuVertexBuffer>> {
        Ok(Box::new(GlVertexBuffer::new(Rc::clone(&self.gl), data)?))
    }

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Box<dyn GpuIndexBuffer>> {
        Ok(Box::new(GlIndexBuffer::new(Rc::clone(&self.gl), indices)?))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn GpuVertexArray>> {
        Ok(Box::new(GlVertexArray::new(Rc::clone(&self.gl))?))
    }

    fn create_texture(&self, data: &TextureData) -> Result<Box<dyn GpuTexture>> {
        Ok(Box::new(GlTexture::new(Rc::clone(&self.gl), data)?))
    }

    fn create_shader(&self, sources: &ShaderSources) -> Result<Box<dyn GpuShader>> {
        Ok(Box::new(GlShader::new(Rc::clone(&self.gl), sources)?))
    }

    fn create_uniform_buffer(&self, size: u32) -> Result<Box<dyn GpuUniformBuffer>> {
        let binding = self.next_binding.get();
        let buffer = GlUniformBuffer::new(Rc::clone(&self.gl), size, binding)?;
        self.next_binding.set(binding + 1);
        Ok(Box::new(buffer))
    }

    fn create_command(&self, kind: RenderCommandKind) -> Box<dyn RenderCommand> {
        Box::new(GlCommand::new(Rc::clone(&self.gl), kind))
    }

    fn draw_indexed(&self, primitive: Primitive, count: u32) {
        unsafe {
            self.gl
                .draw_elements(primitive_mode(primitive), count as i32, glow::UNSIGNED_INT, 0);
        }
    }
}

fn primitive_mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::Triangles => glow::TRIANGLES,
        Primitive::TriangleFan => glow::TRIANGLE_FAN,
    }
}

/// GL scalar type for a vertex attribute, `None` for types that cannot be
/// fed through a single attribute pointer.
pub(crate) fn to_gl_type(ty: ShaderDataType) -> Option<u32> {
    match ty {
        ShaderDataType::Short
        | ShaderDataType::Short2
        | ShaderDataType::Short3
        | ShaderDataType::Short4 => Some(glow::SHORT),
        ShaderDataType::Float
        | ShaderDataType::Float2
        | ShaderDataType::Float3
        | ShaderDataType::Float4 => Some(glow::FLOAT),
        ShaderDataType::Byte4 => Some(glow::UNSIGNED_BYTE),
        ShaderDataType::Int => Some(glow::INT),
        ShaderDataType::Mat3 | ShaderDataType::Mat4 | ShaderDataType::None => None,
    }
}

// glow names are non-zero u32s on native targets; render ids are those u32s.

fn buffer_id(render_id: u32) -> Option<glow::NativeBuffer> {
    NonZeroU32::new(render_id).map(glow::NativeBuffer)
}

fn program_id(render_id: u32) -> Option<glow::NativeProgram> {
    NonZeroU32::new(render_id).map(glow::NativeProgram)
}

fn gl_error(what: &str, err: String) -> RenderError {
    RenderError::Backend(format!("{what}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_types() {
        assert_eq!(to_gl_type(ShaderDataType::Short3), Some(glow::SHORT));
        assert_eq!(to_gl_type(ShaderDataType::Float4), Some(glow::FLOAT));
        assert_eq!(to_gl_type(ShaderDataType::Byte4), Some(glow::UNSIGNED_BYTE));
        assert_eq!(to_gl_type(ShaderDataType::Int), Some(glow::INT));
        assert_eq!(to_gl_type(ShaderDataType::Mat4), None);
    }

    #[test]
    fn quad_draws_as_fan() {
        assert_eq!(primitive_mode(Primitive::TriangleFan), glow::TRIANGLE_FAN);
        assert_eq!(primitive_mode(Primitive::Triangles), glow::TRIANGLES);
    }

    #[test]
    fn zero_is_not_a_gl_name() {
        assert!(buffer_id(0).is_none());
        assert!(program_id(7).is_some());
    }
}
