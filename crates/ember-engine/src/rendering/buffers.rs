//! Vertex buffers, index buffers and vertex arrays.

use super::backend::{GpuIndexBuffer, GpuVertexArray, GpuVertexBuffer};
use super::handles::{IndexBufferId, VertexBufferId};
use super::layout::VertexBufferLayout;

/// Raw vertex bytes plus the layout describing them.
pub struct VertexBuffer {
    gpu: Box<dyn GpuVertexBuffer>,
    layout: VertexBufferLayout,
    size: u32,
}

impl VertexBuffer {
    pub(crate) fn new(
        gpu: Box<dyn GpuVertexBuffer>,
        layout: VertexBufferLayout,
        size: u32,
    ) -> Self {
        Self { gpu, layout, size }
    }

    pub fn render_id(&self) -> u32 {
        self.gpu.render_id()
    }

    pub fn layout(&self) -> &VertexBufferLayout {
        &self.layout
    }

    /// Size in bytes at creation.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Overwrites `data.len()` bytes starting at `offset`.
    ///
    /// Silently does nothing when the range runs past the buffer.
    pub fn edit(&mut self, offset: u32, data: &[u8]) {
        if offset as usize + data.len() > self.size as usize {
            return;
        }
        self.gpu.edit(offset, data);
    }

    pub(crate) fn gpu(&self) -> &dyn GpuVertexBuffer {
        self.gpu.as_ref()
    }
}

/// 32-bit indices. The count is the draw count of any array using it.
pub struct IndexBuffer {
    gpu: Box<dyn GpuIndexBuffer>,
    count: u32,
}

impl IndexBuffer {
    pub(crate) fn new(gpu: Box<dyn GpuIndexBuffer>, count: u32) -> Self {
        Self { gpu, count }
    }

    pub fn render_id(&self) -> u32 {
        self.gpu.render_id()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Overwrites indices starting at index `offset`.
    ///
    /// Silently does nothing when the range runs past the last index.
    pub fn edit(&mut self, offset: u32, indices: &[u32]) {
        if offset as usize + indices.len() > self.count as usize {
            return;
        }
        self.gpu.edit(offset, indices);
    }

    pub(crate) fn gpu(&self) -> &dyn GpuIndexBuffer {
        self.gpu.as_ref()
    }
}

/// Ordered vertex buffers plus at most one index buffer.
///
/// Linking buffers goes through the context, which owns them.
pub struct VertexArray {
    gpu: Box<dyn GpuVertexArray>,
    vertex_buffers: Vec<VertexBufferId>,
    index_buffer: Option<IndexBufferId>,
    draw_count: u32,
}

impl VertexArray {
    pub(crate) fn new(gpu: Box<dyn GpuVertexArray>) -> Self {
        Self {
            gpu,
            vertex_buffers: Vec::new(),
            index_buffer: None,
            draw_count: 0,
        }
    }

    pub fn render_id(&self) -> u32 {
        self.gpu.render_id()
    }

    pub fn vertex_buffers(&self) -> &[VertexBufferId] {
        &self.vertex_buffers
    }

    pub fn index_buffer(&self) -> Option<IndexBufferId> {
        self.index_buffer
    }

    /// Index count of the attached index buffer, or 0 without one.
    pub fn draw_count(&self) -> u32 {
        self.draw_count
    }

    pub(crate) fn add_vertex_buffer(&mut self, id: VertexBufferId, buffer: &VertexBuffer) {
        self.gpu.add_vertex_buffer(buffer.gpu(), buffer.layout());
        self.vertex_buffers.push(id);
    }

    pub(crate) fn set_index_buffer(&mut self, id: IndexBufferId, buffer: &IndexBuffer) {
        self.gpu.set_index_buffer(buffer.gpu());
        self.index_buffer = Some(id);
        self.draw_count = buffer.count();
    }

    pub(crate) fn bind(&self, index_buffer: Option<&IndexBuffer>) {
        self.gpu.bind(index_buffer.map(IndexBuffer::gpu));
    }
}

macro_rules! debug_render_id {
    ($($ty:ident),*) => {$(
        impl std::fmt::Debug for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($ty))
                    .field("render_id", &self.render_id())
                    .finish_non_exhaustive()
            }
        }
    )*};
}

debug_render_id!(VertexBuffer, IndexBuffer, VertexArray);
