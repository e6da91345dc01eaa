//! CPU-only backend that records every GPU-visible action.
//!
//! Used headless: ids are handed out from a counter, shader sources are
//! scanned for declared uniforms and blocks so uploads can be marked as
//! resolved or not, and each action is appended to a shared [`CallLog`].

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::error::Result;
use crate::rendering::{
    Backend, GpuIndexBuffer, GpuShader, GpuTexture, GpuUniformBuffer, GpuVertexArray,
    GpuVertexBuffer, LayoutElement, Primitive, RenderCommand, RenderCommandKind, ShaderDataType,
    ShaderSources, ShaderStage, TextureData, TextureRegion, UniformValue, VertexBufferLayout,
};

/// One recorded action.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateVertexBuffer { id: u32, data: Vec<u8> },
    EditVertexBuffer { id: u32, offset: u32, data: Vec<u8> },
    CreateIndexBuffer { id: u32, indices: Vec<u32> },
    EditIndexBuffer { id: u32, offset: u32, indices: Vec<u32> },
    CreateVertexArray { id: u32 },
    AddVertexBuffer { array: u32, buffer: u32, attributes: Vec<(u32, ShaderDataType, u32)> },
    SetIndexBuffer { array: u32, buffer: u32 },
    BindVertexArray { id: u32, index_buffer: Option<u32> },
    CreateTexture { id: u32, width: u32, height: u32, channels: u32 },
    EditTexture { id: u32, region: TextureRegion, data: Vec<u8> },
    BindTexture { id: u32, unit: u32 },
    CreateShader { id: u32, stages: Vec<ShaderStage> },
    BindShader { id: u32 },
    Upload { shader: u32, name: String, value: UniformValue, resolved: bool },
    CreateUniformBuffer { id: u32, size: u32, binding_point: u32 },
    AttachUniformBlock { buffer: u32, shader: u32, block: String, resolved: bool },
    WriteUniformBuffer { id: u32, offset: u32, data: Vec<u8> },
    Command(RenderCommandKind),
    DrawIndexed { primitive: Primitive, count: u32 },
}

/// Shared, append-only list of calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Snapshot of every call so far.
    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    /// Returns and clears the recorded calls.
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Debug, Default)]
struct Declarations {
    uniforms: HashSet<String>,
    blocks: HashSet<String>,
}

impl Declarations {
    fn scan(sources: &ShaderSources) -> Self {
        let mut decls = Self::default();
        for (_, src) in sources.stages() {
            for line in src.lines() {
                let code = line.split("//").next().unwrap_or_default();
                let Some(at) = code.find("uniform ") else { continue };
                let rest = &code[at + "uniform ".len()..];
                let words: Vec<&str> = rest
                    .split(|c: char| c.is_whitespace() || matches!(c, ';' | '{' | '}'))
                    .filter(|w| !w.is_empty())
                    .collect();
                match words.as_slice() {
                    [block] => {
                        decls.blocks.insert((*block).to_string());
                    }
                    [block, ..] if rest.contains('{') => {
                        decls.blocks.insert((*block).to_string());
                    }
                    [_, name, ..] => {
                        let name = name.split('[').next().unwrap_or_default();
                        decls.uniforms.insert(name.to_string());
                    }
                    [] => {}
                }
            }
        }
        decls
    }
}

#[derive(Debug, Default)]
struct State {
    log: CallLog,
    next_id: Cell<u32>,
    next_binding: Cell<u32>,
    shaders: RefCell<HashMap<u32, Declarations>>,
}

impl State {
    fn id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

/// Headless [`Backend`]. Clones share one log and one id space.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    state: Rc<State>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CallLog {
        self.state.log.clone()
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn create_vertex_buffer(&self, data: &[u8]) -> Result<Box<dyn GpuVertexBuffer>> {
        let id = self.state.id();
        self.state.log.push(Call::CreateVertexBuffer {
            id,
            data: data.to_vec(),
        });
        Ok(Box::new(Resource::new(id, &self.state)))
    }

    fn create_index_buffer(&self, indices: &[u32]) -> Result<Box<dyn GpuIndexBuffer>> {
        let id = self.state.id();
        self.state.log.push(Call::CreateIndexBuffer {
            id,
            indices: indices.to_vec(),
        });
        Ok(Box::new(Resource::new(id, &self.state)))
    }

    fn create_vertex_array(&self) -> Result<Box<dyn GpuVertexArray>> {
        let id = self.state.id();
        self.state.log.push(Call::CreateVertexArray { id });
        Ok(Box::new(RecordingVertexArray {
            inner: Resource::new(id, &self.state),
            attribute_index: 0,
        }))
    }

    fn create_texture(&self, data: &TextureData) -> Result<Box<dyn GpuTexture>> {
        let id = self.state.id();
        self.state.log.push(Call::CreateTexture {
            id,
            width: data.width,
            height: data.height,
            channels: data.channels,
        });
        Ok(Box::new(Resource::new(id, &self.state)))
    }

    fn create_shader(&self, sources: &ShaderSources) -> Result<Box<dyn GpuShader>> {
        let id = self.state.id();
        self.state
            .shaders
            .borrow_mut()
            .insert(id, Declarations::scan(sources));
        self.state.log.push(Call::CreateShader {
            id,
            stages: sources.stages().map(|(stage, _)| stage).collect(),
        });
        Ok(Box::new(Resource::new(id, &self.state)))
    }

    fn create_uniform_buffer(&self, size: u32) -> Result<Box<dyn GpuUniformBuffer>> {
        let id = self.state.id();
        let binding_point = self.state.next_binding.get();
        self.state.next_binding.set(binding_point + 1);
        self.state.log.push(Call::CreateUniformBuffer {
            id,
            size,
            binding_point,
        });
        Ok(Box::new(RecordingUniformBuffer {
            inner: Resource::new(id, &self.state),
            binding_point,
        }))
    }

    fn create_command(&self, kind: RenderCommandKind) -> Box<dyn RenderCommand> {
        Box::new(RecordingCommand {
            kind,
            log: self.state.log.clone(),
        })
    }

    fn draw_indexed(&self, primitive: Primitive, count: u32) {
        self.state.log.push(Call::DrawIndexed { primitive, count });
    }
}

struct Resource {
    id: u32,
    state: Rc<State>,
}

impl Resource {
    fn new(id: u32, state: &Rc<State>) -> Self {
        Self {
            id,
            state: Rc::clone(state),
        }
    }

    fn push(&self, call: Call) {
        self.state.log.push(call);
    }
}

impl GpuVertexBuffer for Resource {
    fn render_id(&self) -> u32 {
        self.id
    }

    fn edit(&mut self, offset: u32, data: &[u8]) {
        self.push(Call::EditVertexBuffer {
            id: self.id,
            offset,
            data: data.to_vec(),
        });
    }
}

impl GpuIndexBuffer for Resource {
    fn render_id(&self) -> u32 {
        self.id
    }

    fn edit(&mut self, offset: u32, indices: &[u32]) {
        self.push(Call::EditIndexBuffer {
            id: self.id,
            offset,
            indices: indices.to_vec(),
        });
    }
}

impl GpuTexture for Resource {
    fn render_id(&self) -> u32 {
        self.id
    }

    fn edit(&mut self, region: TextureRegion, _channels: u32, data: &[u8]) {
        self.push(Call::EditTexture {
            id: self.id,
            region,
            data: data.to_vec(),
        });
    }

    fn bind(&self, unit: u32) {
        self.push(Call::BindTexture { id: self.id, unit });
    }
}

impl GpuShader for Resource {
    fn render_id(&self) -> u32 {
        self.id
    }

    fn bind(&self) {
        self.push(Call::BindShader { id: self.id });
    }

    fn upload(&self, name: &str, value: UniformValue) {
        let resolved = self
            .state
            .shaders
            .borrow()
            .get(&self.id)
            .is_some_and(|d| d.uniforms.contains(name));
        self.push(Call::Upload {
            shader: self.id,
            name: name.to_string(),
            value,
            resolved,
        });
    }
}

impl Drop for Resource {
    fn drop(&mut self) {
        self.state.shaders.borrow_mut().remove(&self.id);
    }
}

struct RecordingVertexArray {
    inner: Resource,
    attribute_index: u32,
}

impl GpuVertexArray for RecordingVertexArray {
    fn render_id(&self) -> u32 {
        self.inner.id
    }

    fn add_vertex_buffer(&mut self, buffer: &dyn GpuVertexBuffer, layout: &VertexBufferLayout) {
        let mut attributes = Vec::with_capacity(layout.len());
        for element in layout {
            attributes.push((self.attribute_index, element.data_type(), element.offset()));
            self.attribute_index += 1;
        }
        self.inner.push(Call::AddVertexBuffer {
            array: self.inner.id,
            buffer: buffer.render_id(),
            attributes,
        });
    }

    fn set_index_buffer(&mut self, buffer: &dyn GpuIndexBuffer) {
        self.inner.push(Call::SetIndexBuffer {
            array: self.inner.id,
            buffer: buffer.render_id(),
        });
    }

    fn bind(&self, index_buffer: Option<&dyn GpuIndexBuffer>) {
        self.inner.push(Call::BindVertexArray {
            id: self.inner.id,
            index_buffer: index_buffer.map(|b| b.render_id()),
        });
    }
}

struct RecordingUniformBuffer {
    inner: Resource,
    binding_point: u32,
}

impl GpuUniformBuffer for RecordingUniformBuffer {
    fn render_id(&self) -> u32 {
        self.inner.id
    }

    fn binding_point(&self) -> u32 {
        self.binding_point
    }

    fn attach_shader_block(&self, shader: &dyn GpuShader, block_name: &str) {
        let shader = shader.render_id();
        let resolved = self
            .inner
            .state
            .shaders
            .borrow()
            .get(&shader)
            .is_some_and(|d| d.blocks.contains(block_name));
        self.inner.push(Call::AttachUniformBlock {
            buffer: self.inner.id,
            shader,
            block: block_name.to_string(),
            resolved,
        });
    }

    fn write(&mut self, offset: u32, data: &[u8]) {
        self.inner.push(Call::WriteUniformBuffer {
            id: self.inner.id,
            offset,
            data: data.to_vec(),
        });
    }
}

struct RecordingCommand {
    kind: RenderCommandKind,
    log: CallLog,
}

impl RenderCommand for RecordingCommand {
    fn kind(&self) -> RenderCommandKind {
        self.kind
    }

    fn action(self: Box<Self>) {
        self.log.push(Call::Command(self.kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_finds_uniforms_and_blocks() {
        let sources = ShaderSources::parse(
            "#region Vertex\n\
             layout(std140) uniform b_camera\n{\n mat4 u_projection;\n};\n\
             uniform b_lights { vec3 u_lightPos; };\n\
             uniform mat4 u_model;\n\
             #region Fragment\n\
             uniform sampler2D u_texData;\n\
             uniform vec4 u_tint; // tint\n\
             uniform float u_weights[4];\n",
        );
        let decls = Declarations::scan(&sources);
        for block in ["b_camera", "b_lights"] {
            assert!(decls.blocks.contains(block), "{block}");
        }
        for name in ["u_model", "u_texData", "u_tint", "u_weights"] {
            assert!(decls.uniforms.contains(name), "{name}");
        }
        assert!(!decls.uniforms.contains("u_projection"));
    }

    #[test]
    fn ids_are_unique_across_clones() {
        let a = RecordingBackend::new();
        let b = a.clone();
        let x = a.create_vertex_array().unwrap();
        let y = b.create_vertex_array().unwrap();
        assert_ne!(x.render_id(), y.render_id());
        assert_eq!(a.log().len(), 2);
    }

    #[test]
    fn attribute_indices_continue_across_buffers() {
        let backend = RecordingBackend::new();
        let mut vao = backend.create_vertex_array().unwrap();
        let vbo = backend.create_vertex_buffer(&[0; 32]).unwrap();
        let pos_uv = VertexBufferLayout::from_types(&[ShaderDataType::Float2, ShaderDataType::Float2]);
        let colour = VertexBufferLayout::from_types(&[ShaderDataType::Byte4]);
        vao.add_vertex_buffer(vbo.as_ref(), &pos_uv);
        vao.add_vertex_buffer(vbo.as_ref(), &colour);

        let indices: Vec<u32> = backend
            .log()
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::AddVertexBuffer { attributes, .. } => Some(attributes),
                _ => None,
            })
            .flatten()
            .map(|(index, _, _)| index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
