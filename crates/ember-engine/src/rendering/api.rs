/// Graphics API a [`RenderContext`](super::RenderContext) dispatches to.
///
/// Fixed when the context is built. `None` never has a backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum RenderApi {
    #[default]
    None,
    OpenGL,
    Direct3D,
    Vulkan,
}

impl RenderApi {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::OpenGL => "OpenGL",
            Self::Direct3D => "Direct3D",
            Self::Vulkan => "Vulkan",
        }
    }
}

impl std::fmt::Display for RenderApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
