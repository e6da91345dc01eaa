//! Shader data type registry.
//!
//! Maps a logical data type to its byte size, component count and the
//! std140-style size used when laying out uniform blocks.

/// Logical data type of a vertex attribute or uniform block member.
///
/// `None` stands for an absent/unsupported tag; every query returns 0 for it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ShaderDataType {
    #[default]
    None,
    Float,
    Float2,
    Float3,
    Float4,
    Short,
    Short2,
    Short3,
    Short4,
    Byte4,
    Mat4,
    Mat3,
    Int,
}

impl ShaderDataType {
    /// Size in bytes when tightly packed.
    pub const fn size(self) -> u32 {
        match self {
            Self::Float => 4,
            Self::Float2 => 4 * 2,
            Self::Float3 => 4 * 3,
            Self::Float4 => 4 * 4,
            Self::Short => 2,
            Self::Short2 => 2 * 2,
            Self::Short3 => 2 * 3,
            Self::Short4 => 2 * 4,
            Self::Byte4 => 4,
            Self::Mat4 => 4 * 4 * 4,
            Self::Mat3 => 4 * 3 * 3,
            Self::Int => 4,
            Self::None => 0,
        }
    }

    /// Number of scalar components.
    pub const fn component_count(self) -> u32 {
        match self {
            Self::Float | Self::Short | Self::Int => 1,
            Self::Float2 | Self::Short2 => 2,
            Self::Float3 | Self::Short3 => 3,
            Self::Float4 | Self::Short4 | Self::Byte4 => 4,
            Self::Mat4 => 16,
            Self::Mat3 => 9,
            Self::None => 0,
        }
    }

    /// Size occupied by the type inside a std140 uniform block.
    ///
    /// Three-component types round up to four components.
    pub const fn std140_align(self) -> u32 {
        match self {
            Self::Int => 4,
            Self::Short => 2,
            Self::Short2 => 4,
            Self::Short3 => 8,
            Self::Short4 => 8,
            Self::Float => 4,
            Self::Float2 => 8,
            Self::Float3 => 16,
            Self::Float4 => 16,
            Self::Byte4 => 4,
            Self::Mat4 => 64,
            Self::Mat3 => 36,
            Self::None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ShaderDataType as T;

    const ALL: [T; 12] = [
        T::Float,
        T::Float2,
        T::Float3,
        T::Float4,
        T::Short,
        T::Short2,
        T::Short3,
        T::Short4,
        T::Byte4,
        T::Mat4,
        T::Mat3,
        T::Int,
    ];

    // ── size ──────────────────────────────────────────────────────────────

    #[test]
    fn sizes_match_table() {
        let expected = [4, 8, 12, 16, 2, 4, 6, 8, 4, 64, 36, 4];
        for (ty, size) in ALL.iter().zip(expected) {
            assert_eq!(ty.size(), size, "{ty:?}");
        }
    }

    // ── component count ───────────────────────────────────────────────────

    #[test]
    fn component_counts_match_table() {
        let expected = [1, 2, 3, 4, 1, 2, 3, 4, 4, 16, 9, 1];
        for (ty, count) in ALL.iter().zip(expected) {
            assert_eq!(ty.component_count(), count, "{ty:?}");
        }
    }

    #[test]
    fn float2_is_eight_bytes_two_components() {
        assert_eq!(T::Float2.size(), 8);
        assert_eq!(T::Float2.component_count(), 2);
    }

    // ── std140 ────────────────────────────────────────────────────────────

    #[test]
    fn std140_rounds_three_component_types_up() {
        assert_eq!(T::Float3.std140_align(), 16);
        assert_eq!(T::Short3.std140_align(), 8);
        assert_eq!(T::Float4.std140_align(), 16);
        assert_eq!(T::Mat4.std140_align(), 64);
        assert_eq!(T::Mat3.std140_align(), 36);
    }

    // ── absent tag ────────────────────────────────────────────────────────

    #[test]
    fn none_is_zero_everywhere() {
        assert_eq!(T::None.size(), 0);
        assert_eq!(T::None.component_count(), 0);
        assert_eq!(T::None.std140_align(), 0);
    }
}
