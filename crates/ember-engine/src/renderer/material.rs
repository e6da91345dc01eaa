use glam::Vec4;

use crate::rendering::{ShaderId, TextureId};

/// Which optional fields of a [`Material`] are set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MaterialFlags(u32);

impl MaterialFlags {
    pub const TEXTURE: Self = Self(1 << 0);
    pub const TINT: Self = Self(1 << 1);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }
}

impl std::ops::BitOr for MaterialFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Shader plus optional texture and tint.
///
/// The shader is fixed for the material's lifetime; a different shader needs
/// a new material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    shader: ShaderId,
    texture: Option<TextureId>,
    tint: Vec4,
    flags: MaterialFlags,
}

impl Material {
    pub fn new(shader: ShaderId) -> Self {
        Self {
            shader,
            texture: None,
            tint: Vec4::ONE,
            flags: MaterialFlags::default(),
        }
    }

    pub fn with_texture(shader: ShaderId, texture: TextureId) -> Self {
        let mut m = Self::new(shader);
        m.set_texture(texture);
        m
    }

    pub fn with_tint(shader: ShaderId, tint: Vec4) -> Self {
        let mut m = Self::new(shader);
        m.set_tint(tint);
        m
    }

    pub fn with_texture_and_tint(shader: ShaderId, texture: TextureId, tint: Vec4) -> Self {
        let mut m = Self::with_texture(shader, texture);
        m.set_tint(tint);
        m
    }

    pub fn shader(&self) -> ShaderId {
        self.shader
    }

    /// The texture, if the texture flag is set.
    pub fn texture(&self) -> Option<TextureId> {
        self.texture.filter(|_| self.is_set(MaterialFlags::TEXTURE))
    }

    /// The tint, if the tint flag is set.
    pub fn tint(&self) -> Option<Vec4> {
        self.is_set(MaterialFlags::TINT).then_some(self.tint)
    }

    pub fn flags(&self) -> MaterialFlags {
        self.flags
    }

    pub fn is_set(&self, flag: MaterialFlags) -> bool {
        self.flags.contains(flag)
    }

    pub fn set_texture(&mut self, texture: TextureId) {
        self.texture = Some(texture);
        self.flags.insert(MaterialFlags::TEXTURE);
    }

    pub fn set_tint(&mut self, tint: Vec4) {
        self.tint = tint;
        self.flags.insert(MaterialFlags::TINT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn shader() -> ShaderId {
        ShaderId::from(KeyData::from_ffi(3))
    }

    fn texture() -> TextureId {
        TextureId::from(KeyData::from_ffi(5))
    }

    #[test]
    fn bare_material_has_no_flags() {
        let m = Material::new(shader());
        assert_eq!(m.flags().bits(), 0);
        assert!(m.texture().is_none());
        assert!(m.tint().is_none());
    }

    #[test]
    fn setters_raise_flags() {
        let m = Material::with_texture_and_tint(shader(), texture(), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(m.flags(), MaterialFlags::TEXTURE | MaterialFlags::TINT);
        assert_eq!(m.texture(), Some(texture()));
        assert_eq!(m.tint(), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn tint_only() {
        let m = Material::with_tint(shader(), Vec4::splat(0.5));
        assert!(m.is_set(MaterialFlags::TINT));
        assert!(!m.is_set(MaterialFlags::TEXTURE));
        assert_eq!(m.flags().bits(), 2);
    }
}
