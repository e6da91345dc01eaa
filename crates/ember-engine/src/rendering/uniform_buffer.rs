use std::collections::HashMap;

use glam::{Mat4, Vec2, Vec3, Vec4};

use super::backend::GpuUniformBuffer;
use super::layout::UniformBufferLayout;
use super::shader::Shader;

/// A uniform block's storage.
///
/// Member offsets and sizes are cached from the layout by name; uploads
/// write only that member's byte range. Unknown names are ignored.
pub struct UniformBuffer {
    gpu: Box<dyn GpuUniformBuffer>,
    layout: UniformBufferLayout,
    cache: HashMap<String, (u32, u32)>,
}

impl UniformBuffer {
    pub(crate) fn new(gpu: Box<dyn GpuUniformBuffer>, layout: UniformBufferLayout) -> Self {
        let cache = layout
            .iter()
            .map(|e| (e.name.clone(), (e.offset, e.size)))
            .collect();
        Self { gpu, layout, cache }
    }

    pub fn render_id(&self) -> u32 {
        self.gpu.render_id()
    }

    pub fn binding_point(&self) -> u32 {
        self.gpu.binding_point()
    }

    pub fn layout(&self) -> &UniformBufferLayout {
        &self.layout
    }

    /// Cached `(offset, size)` of a member.
    pub fn member(&self, name: &str) -> Option<(u32, u32)> {
        self.cache.get(name).copied()
    }

    pub fn attach_shader_block(&self, shader: &Shader, block_name: &str) {
        self.gpu.attach_shader_block(shader.gpu(), block_name);
    }

    /// Writes `data` into the named member, truncated to the member's size.
    pub fn upload(&mut self, name: &str, data: &[u8]) {
        let Some((offset, size)) = self.member(name) else {
            return;
        };
        let len = data.len().min(size as usize);
        self.gpu.write(offset, &data[..len]);
    }

    pub fn upload_mat4(&mut self, name: &str, value: &Mat4) {
        self.upload(name, bytemuck::bytes_of(value));
    }

    pub fn upload_float4(&mut self, name: &str, value: Vec4) {
        self.upload(name, bytemuck::bytes_of(&value));
    }

    pub fn upload_float3(&mut self, name: &str, value: Vec3) {
        self.upload(name, bytemuck::bytes_of(&value));
    }

    pub fn upload_float2(&mut self, name: &str, value: Vec2) {
        self.upload(name, bytemuck::bytes_of(&value));
    }

    pub fn upload_float(&mut self, name: &str, value: f32) {
        self.upload(name, bytemuck::bytes_of(&value));
    }

    pub fn upload_int(&mut self, name: &str, value: i32) {
        self.upload(name, bytemuck::bytes_of(&value));
    }
}

impl std::fmt::Debug for UniformBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformBuffer")
            .field("render_id", &self.render_id())
            .field("binding_point", &self.binding_point())
            .field("stride", &self.layout.stride())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Call, RecordingBackend};
    use crate::rendering::{Backend, ShaderDataType as T, UniformBufferElement};

    fn camera_buffer(backend: &RecordingBackend) -> UniformBuffer {
        let layout = UniformBufferLayout::new([
            UniformBufferElement::new("u_projection", T::Mat4),
            UniformBufferElement::new("u_view", T::Mat4),
            UniformBufferElement::new("u_viewPos", T::Float3),
        ]);
        let gpu = backend.create_uniform_buffer(layout.stride()).unwrap();
        UniformBuffer::new(gpu, layout)
    }

    fn writes(backend: &RecordingBackend) -> Vec<(u32, usize)> {
        backend
            .log()
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::WriteUniformBuffer { offset, data, .. } => Some((offset, data.len())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn cache_holds_offsets_and_sizes() {
        let backend = RecordingBackend::new();
        let ubo = camera_buffer(&backend);
        assert_eq!(ubo.member("u_projection"), Some((0, 64)));
        assert_eq!(ubo.member("u_view"), Some((64, 64)));
        assert_eq!(ubo.member("u_viewPos"), Some((128, 16)));
    }

    #[test]
    fn upload_writes_member_range() {
        let backend = RecordingBackend::new();
        let mut ubo = camera_buffer(&backend);
        ubo.upload_mat4("u_view", &Mat4::IDENTITY);
        ubo.upload_float3("u_viewPos", Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(writes(&backend), vec![(64, 64), (128, 12)]);
    }

    #[test]
    fn upload_unknown_name_is_silent_noop() {
        let backend = RecordingBackend::new();
        let mut ubo = camera_buffer(&backend);
        ubo.upload_float4("u_missing", Vec4::ONE);
        assert!(writes(&backend).is_empty());
    }

    #[test]
    fn oversized_upload_is_truncated() {
        let backend = RecordingBackend::new();
        let mut ubo = camera_buffer(&backend);
        ubo.upload("u_viewPos", &[0u8; 64]);
        assert_eq!(writes(&backend), vec![(128, 16)]);
    }

    #[test]
    fn binding_points_are_sequential() {
        let backend = RecordingBackend::new();
        let a = camera_buffer(&backend);
        let b = camera_buffer(&backend);
        assert_eq!(b.binding_point(), a.binding_point() + 1);
    }
}
