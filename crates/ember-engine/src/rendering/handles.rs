//! Typed keys into the resource arena.
//!
//! Keys are `Copy` and can be stored anywhere; the arena stays the only owner
//! of the GPU objects. A key whose resource was destroyed is rejected.

use slotmap::new_key_type;

new_key_type! {
    pub struct VertexBufferId;
    pub struct IndexBufferId;
    pub struct VertexArrayId;
    pub struct TextureId;
    pub struct ShaderId;
    pub struct UniformBufferId;
}
