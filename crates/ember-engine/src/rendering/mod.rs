//! API-agnostic GPU resource model.
//!
//! Data types and layouts describe buffer contents; the `Backend` traits are
//! the seam a concrete graphics API plugs into; `RenderContext` ties a chosen
//! API to an arena of resources addressed by typed handles.

mod api;
mod backend;
mod buffers;
mod command;
mod context;
mod data_type;
mod handles;
mod layout;
mod registry;
mod resources;
mod shader;
mod texture;
mod uniform_buffer;

pub use api::RenderApi;
pub use backend::{
    Backend, GpuIndexBuffer, GpuShader, GpuTexture, GpuUniformBuffer, GpuVertexArray,
    GpuVertexBuffer, Primitive, UniformValue,
};
pub use buffers::{IndexBuffer, VertexArray, VertexBuffer};
pub use command::{action_command, RenderCommand, RenderCommandKind};
pub use context::RenderContext;
pub use data_type::ShaderDataType;
pub use handles::{
    IndexBufferId, ShaderId, TextureId, UniformBufferId, VertexArrayId, VertexBufferId,
};
pub use layout::{
    BufferLayout, LayoutElement, UniformBufferElement, UniformBufferLayout, VertexBufferElement,
    VertexBufferLayout,
};
pub use registry::BackendRegistry;
pub use resources::Resources;
pub use shader::{Shader, ShaderSources, ShaderStage};
pub use texture::{SubTexture, Texture, TextureData, TextureRegion};
pub use uniform_buffer::UniformBuffer;
