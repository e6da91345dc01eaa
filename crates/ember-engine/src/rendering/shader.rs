//! Shader sources and the shader resource.
//!
//! A combined source file is split into stages by `#region <Stage>` lines.
//! Lines before the first tag are dropped.

use std::collections::BTreeMap;
use std::path::Path;

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::error::{RenderError, Result};

use super::backend::{GpuShader, UniformValue};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    TessellationControl,
    TessellationEvaluation,
    Compute,
}

impl ShaderStage {
    pub const ALL: [ShaderStage; 6] = [
        Self::Vertex,
        Self::Fragment,
        Self::Geometry,
        Self::TessellationControl,
        Self::TessellationEvaluation,
        Self::Compute,
    ];

    /// Region tag name as written after `#region`.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Vertex => "Vertex",
            Self::Fragment => "Fragment",
            Self::Geometry => "Geometry",
            Self::TessellationControl => "TessellationControl",
            Self::TessellationEvaluation => "TessellationEvaluation",
            Self::Compute => "Compute",
        }
    }

    fn from_region_line(line: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|stage| line.contains(&format!("#region {}", stage.tag())))
    }
}

/// Source text per shader stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    stages: BTreeMap<ShaderStage, String>,
}

impl ShaderSources {
    /// Splits a combined source into stage regions.
    pub fn parse(text: &str) -> Self {
        let mut sources = Self::default();
        let mut current: Option<ShaderStage> = None;

        for line in text.lines() {
            if let Some(stage) = ShaderStage::from_region_line(line) {
                current = Some(stage);
                continue;
            }
            let Some(stage) = current else { continue };
            let src = sources.stages.entry(stage).or_default();
            src.push_str(line);
            src.push('\n');
        }

        sources
    }

    /// Reads and parses a combined shader file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = read_source(path.as_ref())?;
        Ok(Self::parse(&text))
    }

    /// Reads a vertex and a fragment shader from separate files.
    pub fn from_files(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Result<Self> {
        let vertex = read_source(vertex.as_ref())?;
        let fragment = read_source(fragment.as_ref())?;
        Ok(Self::default()
            .with_stage(ShaderStage::Vertex, vertex)
            .with_stage(ShaderStage::Fragment, fragment))
    }

    pub fn with_stage(mut self, stage: ShaderStage, source: impl Into<String>) -> Self {
        self.stages.insert(stage, source.into());
        self
    }

    pub fn get(&self, stage: ShaderStage) -> Option<&str> {
        self.stages.get(&stage).map(String::as_str)
    }

    /// Stages present, in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = (ShaderStage, &str)> {
        self.stages.iter().map(|(stage, src)| (*stage, src.as_str()))
    }

    /// Vertex and fragment regions are required.
    pub fn validate(&self) -> Result<()> {
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            if !self.stages.contains_key(&stage) {
                return Err(RenderError::MissingShaderStage(stage));
            }
        }
        Ok(())
    }
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// A linked shader program owned by the resource arena.
///
/// Uploads to names the program does not declare are ignored.
pub struct Shader {
    gpu: Box<dyn GpuShader>,
}

impl Shader {
    pub(crate) fn new(gpu: Box<dyn GpuShader>) -> Self {
        Self { gpu }
    }

    pub fn render_id(&self) -> u32 {
        self.gpu.render_id()
    }

    pub fn bind(&self) {
        self.gpu.bind();
    }

    pub fn upload(&self, name: &str, value: UniformValue) {
        self.gpu.upload(name, value);
    }

    pub fn upload_int(&self, name: &str, value: i32) {
        self.upload(name, UniformValue::Int(value));
    }

    pub fn upload_float(&self, name: &str, value: f32) {
        self.upload(name, UniformValue::Float(value));
    }

    pub fn upload_float2(&self, name: &str, value: Vec2) {
        self.upload(name, UniformValue::Float2(value));
    }

    pub fn upload_float3(&self, name: &str, value: Vec3) {
        self.upload(name, UniformValue::Float3(value));
    }

    pub fn upload_float4(&self, name: &str, value: Vec4) {
        self.upload(name, UniformValue::Float4(value));
    }

    pub fn upload_mat4(&self, name: &str, value: &Mat4) {
        self.upload(name, UniformValue::Mat4(*value));
    }

    pub(crate) fn gpu(&self) -> &dyn GpuShader {
        self.gpu.as_ref()
    }
}

impl std::fmt::Debug for Shader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shader")
            .field("render_id", &self.render_id())
            .finish()
    }
}
