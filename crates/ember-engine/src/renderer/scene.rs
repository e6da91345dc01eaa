use std::collections::HashMap;

use crate::rendering::UniformBufferId;

/// Uniform buffers shared by every draw in a scene, keyed by block name.
///
/// Names are case-sensitive and match the block names in shader source
/// (e.g. `"Camera"`, `"Light"`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneWideUniforms {
    blocks: HashMap<String, UniformBufferId>,
}

impl SceneWideUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the buffer for `block_name`.
    pub fn insert(
        &mut self,
        block_name: impl Into<String>,
        buffer: UniformBufferId,
    ) -> Option<UniformBufferId> {
        self.blocks.insert(block_name.into(), buffer)
    }

    pub fn with(mut self, block_name: impl Into<String>, buffer: UniformBufferId) -> Self {
        self.insert(block_name, buffer);
        self
    }

    pub fn get(&self, block_name: &str) -> Option<UniformBufferId> {
        self.blocks.get(block_name).copied()
    }

    pub fn remove(&mut self, block_name: &str) -> Option<UniformBufferId> {
        self.blocks.remove(block_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, UniformBufferId)> {
        self.blocks.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}
