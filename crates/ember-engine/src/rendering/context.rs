//! The render context.
//!
//! Owns the selected API, the backend providers and the resource arena.
//! Every factory and every resource mutation goes through it; there is no
//! process-wide state.

use std::path::Path;

use bytemuck::Pod;

use crate::error::{RenderError, Result};

use super::api::RenderApi;
use super::backend::{Backend, Primitive};
use super::buffers::{IndexBuffer, VertexArray, VertexBuffer};
use super::command::{RenderCommand, RenderCommandKind};
use super::handles::{
    IndexBufferId, ShaderId, TextureId, UniformBufferId, VertexArrayId, VertexBufferId,
};
use super::layout::{UniformBufferLayout, VertexBufferLayout};
use super::registry::BackendRegistry;
use super::resources::Resources;
use super::shader::{Shader, ShaderSources};
use super::texture::{Texture, TextureData};
use super::uniform_buffer::UniformBuffer;

pub struct RenderContext {
    api: RenderApi,
    registry: BackendRegistry,
    resources: Resources,
}

fn logged<T>(what: &str, result: Result<T>) -> Result<T> {
    result.inspect_err(|err| log::error!("{what}: {err}"))
}

fn lookup<T>(what: &'static str, found: Option<T>) -> Result<T> {
    logged("lookup", found.ok_or(RenderError::InvalidHandle(what)))
}

impl RenderContext {
    /// Builds a context dispatching to `api`.
    ///
    /// A missing backend is not fatal here; every factory call fails instead.
    pub fn new(api: RenderApi, registry: BackendRegistry) -> Self {
        match registry.get(api) {
            Some(backend) => log::info!("render context: {api} via '{}'", backend.name()),
            None => log::error!("render context: no backend registered for {api}"),
        }
        Self {
            api,
            registry,
            resources: Resources::default(),
        }
    }

    pub fn api(&self) -> RenderApi {
        self.api
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    fn backend(&self) -> Result<&dyn Backend> {
        self.registry
            .get(self.api)
            .ok_or(RenderError::UnsupportedApi(self.api))
    }

    // ── factories ─────────────────────────────────────────────────────────

    pub fn create_vertex_buffer(
        &mut self,
        data: &[u8],
        layout: VertexBufferLayout,
    ) -> Result<VertexBufferId> {
        let gpu = logged(
            "vertex buffer",
            self.backend().and_then(|b| b.create_vertex_buffer(data)),
        )?;
        let buffer = VertexBuffer::new(gpu, layout, data.len() as u32);
        Ok(self.resources.vertex_buffers.insert(buffer))
    }

    /// Typed convenience over [`Self::create_vertex_buffer`].
    pub fn create_vertex_buffer_from<V: Pod>(
        &mut self,
        vertices: &[V],
        layout: VertexBufferLayout,
    ) -> Result<VertexBufferId> {
        self.create_vertex_buffer(bytemuck::cast_slice(vertices), layout)
    }

    pub fn create_index_buffer(&mut self, indices: &[u32]) -> Result<IndexBufferId> {
        let gpu = logged(
            "index buffer",
            self.backend().and_then(|b| b.create_index_buffer(indices)),
        )?;
        let buffer = IndexBuffer::new(gpu, indices.len() as u32);
        Ok(self.resources.index_buffers.insert(buffer))
    }

    pub fn create_vertex_array(&mut self) -> Result<VertexArrayId> {
        let gpu = logged("vertex array", self.backend().and_then(|b| b.create_vertex_array()))?;
        Ok(self.resources.vertex_arrays.insert(VertexArray::new(gpu)))
    }

    pub fn create_texture(&mut self, data: &TextureData) -> Result<TextureId> {
        let gpu = logged(
            "texture",
            data.validate()
                .and_then(|()| self.backend())
                .and_then(|b| b.create_texture(data)),
        )?;
        let texture = Texture::new(gpu, data.width, data.height, data.channels);
        Ok(self.resources.textures.insert(texture))
    }

    /// Decodes an image file and uploads it.
    pub fn load_texture(&mut self, path: impl AsRef<Path>) -> Result<TextureId> {
        let data = logged("texture", TextureData::load(path))?;
        self.create_texture(&data)
    }

    pub fn create_shader(&mut self, sources: &ShaderSources) -> Result<ShaderId> {
        let gpu = logged(
            "shader",
            sources
                .validate()
                .and_then(|()| self.backend())
                .and_then(|b| b.create_shader(sources)),
        )?;
        Ok(self.resources.shaders.insert(Shader::new(gpu)))
    }

    /// Builds a shader from one file split by `#region` tags.
    pub fn load_shader(&mut self, path: impl AsRef<Path>) -> Result<ShaderId> {
        let sources = logged("shader", ShaderSources::from_file(path))?;
        self.create_shader(&sources)
    }

    /// Builds a shader from separate vertex and fragment files.
    pub fn load_shader_pair(
        &mut self,
        vertex: impl AsRef<Path>,
        fragment: impl AsRef<Path>,
    ) -> Result<ShaderId> {
        let sources = logged("shader", ShaderSources::from_files(vertex, fragment))?;
        self.create_shader(&sources)
    }

    pub fn create_uniform_buffer(
        &mut self,
        layout: UniformBufferLayout,
    ) -> Result<UniformBufferId> {
        let gpu = logged(
            "uniform buffer",
            self.backend().and_then(|b| b.create_uniform_buffer(layout.stride())),
        )?;
        Ok(self.resources.uniform_buffers.insert(UniformBuffer::new(gpu, layout)))
    }

    // ── commands ──────────────────────────────────────────────────────────

    pub fn command(&self, kind: RenderCommandKind) -> Result<Box<dyn RenderCommand>> {
        logged("render command", self.backend().map(|b| b.create_command(kind)))
    }

    pub fn clear_depth_colour_command(&self) -> Result<Box<dyn RenderCommand>> {
        self.command(RenderCommandKind::ClearDepthColour)
    }

    pub fn clear_depth_command(&self) -> Result<Box<dyn RenderCommand>> {
        self.command(RenderCommandKind::ClearDepth)
    }

    pub fn set_clear_colour_command(
        &self,
        r: f32,
        g: f32,
        b: f32,
        a: f32,
    ) -> Result<Box<dyn RenderCommand>> {
        self.command(RenderCommandKind::SetClearColour([r, g, b, a]))
    }

    pub fn set_depth_test_command(&self, enabled: bool) -> Result<Box<dyn RenderCommand>> {
        self.command(RenderCommandKind::SetDepthTest(enabled))
    }

    pub fn set_backface_culling_command(&self, enabled: bool) -> Result<Box<dyn RenderCommand>> {
        self.command(RenderCommandKind::SetBackfaceCulling(enabled))
    }

    pub fn set_blend_command(&self, enabled: bool) -> Result<Box<dyn RenderCommand>> {
        self.command(RenderCommandKind::SetBlend(enabled))
    }

    // ── lookup ────────────────────────────────────────────────────────────

    pub fn vertex_buffer(&self, id: VertexBufferId) -> Result<&VertexBuffer> {
        lookup("vertex buffer", self.resources.vertex_buffers.get(id))
    }

    pub fn vertex_buffer_mut(&mut self, id: VertexBufferId) -> Result<&mut VertexBuffer> {
        lookup("vertex buffer", self.resources.vertex_buffers.get_mut(id))
    }

    pub fn index_buffer(&self, id: IndexBufferId) -> Result<&IndexBuffer> {
        lookup("index buffer", self.resources.index_buffers.get(id))
    }

    pub fn index_buffer_mut(&mut self, id: IndexBufferId) -> Result<&mut IndexBuffer> {
        lookup("index buffer", self.resources.index_buffers.get_mut(id))
    }

    pub fn vertex_array(&self, id: VertexArrayId) -> Result<&VertexArray> {
        lookup("vertex array", self.resources.vertex_arrays.get(id))
    }

    pub fn texture(&self, id: TextureId) -> Result<&Texture> {
        lookup("texture", self.resources.textures.get(id))
    }

    pub fn texture_mut(&mut self, id: TextureId) -> Result<&mut Texture> {
        lookup("texture", self.resources.textures.get_mut(id))
    }

    pub fn shader(&self, id: ShaderId) -> Result<&Shader> {
        lookup("shader", self.resources.shaders.get(id))
    }

    pub fn uniform_buffer(&self, id: UniformBufferId) -> Result<&UniformBuffer> {
        lookup("uniform buffer", self.resources.uniform_buffers.get(id))
    }

    pub fn uniform_buffer_mut(&mut self, id: UniformBufferId) -> Result<&mut UniformBuffer> {
        lookup("uniform buffer", self.resources.uniform_buffers.get_mut(id))
    }

    // ── linking ───────────────────────────────────────────────────────────

    /// Appends a vertex buffer to a vertex array, enabling its attributes.
    pub fn add_vertex_buffer(
        &mut self,
        array: VertexArrayId,
        buffer: VertexBufferId,
    ) -> Result<()> {
        let Resources {
            vertex_buffers,
            vertex_arrays,
            ..
        } = &mut self.resources;
        let vbo = lookup("vertex buffer", vertex_buffers.get(buffer))?;
        lookup("vertex array", vertex_arrays.get_mut(array))?.add_vertex_buffer(buffer, vbo);
        Ok(())
    }

    /// Sets the array's index buffer; its count becomes the draw count.
    pub fn set_index_buffer(&mut self, array: VertexArrayId, buffer: IndexBufferId) -> Result<()> {
        let Resources {
            index_buffers,
            vertex_arrays,
            ..
        } = &mut self.resources;
        let ibo = lookup("index buffer", index_buffers.get(buffer))?;
        lookup("vertex array", vertex_arrays.get_mut(array))?.set_index_buffer(buffer, ibo);
        Ok(())
    }

    /// Binds the array and its index buffer.
    pub fn bind_vertex_array(&self, array: VertexArrayId) -> Result<()> {
        let vao = self.vertex_array(array)?;
        let ibo = match vao.index_buffer() {
            Some(id) => Some(self.index_buffer(id)?),
            None => None,
        };
        vao.bind(ibo);
        Ok(())
    }

    /// Attaches a uniform buffer to the named block of a shader.
    pub fn attach_uniform_buffer(
        &self,
        buffer: UniformBufferId,
        shader: ShaderId,
        block_name: &str,
    ) -> Result<()> {
        let ubo = self.uniform_buffer(buffer)?;
        let shader = self.shader(shader)?;
        ubo.attach_shader_block(shader, block_name);
        Ok(())
    }

    /// Issues an indexed draw of `count` indices with the currently bound array.
    pub fn draw_indexed(&self, primitive: Primitive, count: u32) -> Result<()> {
        let backend = logged("draw", self.backend())?;
        backend.draw_indexed(primitive, count);
        Ok(())
    }

    /// Binds `array` and draws its full index count.
    pub fn draw_vertex_array(&self, array: VertexArrayId, primitive: Primitive) -> Result<()> {
        self.bind_vertex_array(array)?;
        let count = self.vertex_array(array)?.draw_count();
        self.draw_indexed(primitive, count)
    }

    // ── destruction ───────────────────────────────────────────────────────

    pub fn destroy_vertex_buffer(&mut self, id: VertexBufferId) -> bool {
        self.resources.vertex_buffers.remove(id).is_some()
    }

    pub fn destroy_index_buffer(&mut self, id: IndexBufferId) -> bool {
        self.resources.index_buffers.remove(id).is_some()
    }

    pub fn destroy_vertex_array(&mut self, id: VertexArrayId) -> bool {
        self.resources.vertex_arrays.remove(id).is_some()
    }

    pub fn destroy_texture(&mut self, id: TextureId) -> bool {
        self.resources.textures.remove(id).is_some()
    }

    pub fn destroy_shader(&mut self, id: ShaderId) -> bool {
        self.resources.shaders.remove(id).is_some()
    }

    pub fn destroy_uniform_buffer(&mut self, id: UniformBufferId) -> bool {
        self.resources.uniform_buffers.remove(id).is_some()
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("api", &self.api)
            .field("registry", &self.registry)
            .field("resources", &self.resources)
            .finish()
    }
}
