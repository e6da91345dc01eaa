//! Backend contracts.
//!
//! A [`Backend`] creates the GPU-side half of every resource. The
//! API-agnostic wrappers in this module tree own one boxed `Gpu*` object each
//! and forward to it.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::Result;

use super::command::{RenderCommand, RenderCommandKind};
use super::layout::VertexBufferLayout;
use super::shader::ShaderSources;
use super::texture::{TextureData, TextureRegion};

/// Primitive topology for indexed draws.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleFan,
}

/// A value uploaded to a named shader uniform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Float2(Vec2),
    Float3(Vec3),
    Float4(Vec4),
    Mat4(Mat4),
}

/// Factory for one graphics API.
pub trait Backend {
    /// Human readable name used in logs.
    fn name(&self) -> &'static str;

    fn create_vertex_buffer(&self, data: &[u8]) -> Result<Box<dyn GpuVertexBuffer>>;

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Box<dyn GpuIndexBuffer>>;

    fn create_vertex_array(&self) -> Result<Box<dyn GpuVertexArray>>;

    fn create_texture(&self, data: &TextureData) -> Result<Box<dyn GpuTexture>>;

    fn create_shader(&self, sources: &ShaderSources) -> Result<Box<dyn GpuShader>>;

    /// Allocates `size` bytes of uniform storage bound to a fresh binding point.
    fn create_uniform_buffer(&self, size: u32) -> Result<Box<dyn GpuUniformBuffer>>;

    fn create_command(&self, kind: RenderCommandKind) -> Box<dyn RenderCommand>;

    /// Issues an indexed draw with whatever vertex array is bound.
    fn draw_indexed(&self, primitive: Primitive, count: u32);
}

pub trait GpuVertexBuffer {
    fn render_id(&self) -> u32;

    fn edit(&mut self, offset: u32, data: &[u8]);
}

pub trait GpuIndexBuffer {
    fn render_id(&self) -> u32;

    fn edit(&mut self, offset: u32, indices: &[u32]);
}

pub trait GpuVertexArray {
    fn render_id(&self) -> u32;

    /// Binds `buffer` and enables one attribute per layout element.
    fn add_vertex_buffer(&mut self, buffer: &dyn GpuVertexBuffer, layout: &VertexBufferLayout);

    fn set_index_buffer(&mut self, buffer: &dyn GpuIndexBuffer);

    fn bind(&self, index_buffer: Option<&dyn GpuIndexBuffer>);
}

pub trait GpuTexture {
    fn render_id(&self) -> u32;

    /// `channels` is 3 or 4; callers reject anything else before getting here.
    fn edit(&mut self, region: TextureRegion, channels: u32, data: &[u8]);

    fn bind(&self, unit: u32);
}

pub trait GpuShader {
    fn render_id(&self) -> u32;

    fn bind(&self);

    /// Uploads to the named uniform. Unknown names are ignored.
    fn upload(&self, name: &str, value: UniformValue);
}

pub trait GpuUniformBuffer {
    fn render_id(&self) -> u32;

    fn binding_point(&self) -> u32;

    /// Points the shader's named block at this buffer's binding point.
    fn attach_shader_block(&self, shader: &dyn GpuShader, block_name: &str);

    fn write(&mut self, offset: u32, data: &[u8]);
}
