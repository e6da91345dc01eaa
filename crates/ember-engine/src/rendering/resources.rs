use slotmap::SlotMap;

use super::buffers::{IndexBuffer, VertexArray, VertexBuffer};
use super::handles::{
    IndexBufferId, ShaderId, TextureId, UniformBufferId, VertexArrayId, VertexBufferId,
};
use super::shader::Shader;
use super::texture::Texture;
use super::uniform_buffer::UniformBuffer;

/// Arena owning every GPU resource of a context.
///
/// Dropping an entry drops its GPU object, which releases the native handle.
#[derive(Default)]
pub struct Resources {
    pub(crate) vertex_buffers: SlotMap<VertexBufferId, VertexBuffer>,
    pub(crate) index_buffers: SlotMap<IndexBufferId, IndexBuffer>,
    pub(crate) vertex_arrays: SlotMap<VertexArrayId, VertexArray>,
    pub(crate) textures: SlotMap<TextureId, Texture>,
    pub(crate) shaders: SlotMap<ShaderId, Shader>,
    pub(crate) uniform_buffers: SlotMap<UniformBufferId, UniformBuffer>,
}

impl Resources {
    /// Total number of live resources.
    pub fn len(&self) -> usize {
        self.vertex_buffers.len()
            + self.index_buffers.len()
            + self.vertex_arrays.len()
            + self.textures.len()
            + self.shaders.len()
            + self.uniform_buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.vertex_arrays.clear();
        self.vertex_buffers.clear();
        self.index_buffers.clear();
        self.textures.clear();
        self.uniform_buffers.clear();
        self.shaders.clear();
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("vertex_buffers", &self.vertex_buffers.len())
            .field("index_buffers", &self.index_buffers.len())
            .field("vertex_arrays", &self.vertex_arrays.len())
            .field("textures", &self.textures.len())
            .field("shaders", &self.shaders.len())
            .field("uniform_buffers", &self.uniform_buffers.len())
            .finish()
    }
}
