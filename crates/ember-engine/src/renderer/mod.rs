//! Scene renderers.
//!
//! Both renderers follow `init` → (`begin` → `submit`* → `end`)*. Draws are
//! issued immediately, one per submission, through the [`RenderContext`].

mod glyph;
mod material;
mod quad;
mod renderer2d;
mod renderer3d;
mod scene;

pub use glyph::{FontdueRasterizer, Glyph, GlyphRasterizer, GlyphStaging};
pub use material::{Material, MaterialFlags};
pub use quad::Quad;
pub use renderer2d::{Angle, Renderer2D, Renderer2DConfig, QUAD_SHADER};
pub use renderer3d::Renderer3D;
pub use scene::SceneWideUniforms;

use crate::error::Result;
use crate::rendering::{RenderContext, ShaderId};

/// Per-draw uniform names shared by the built-in shaders.
pub mod uniforms {
    pub const MODEL: &str = "u_model";
    pub const TINT: &str = "u_tint";
    pub const TEXTURE: &str = "u_texData";
}

/// Where a renderer is in its begin/submit/end cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RendererState {
    #[default]
    Uninitialized,
    Ready,
    InScene,
}

fn attach_scene(ctx: &RenderContext, shader: ShaderId, scene: &SceneWideUniforms) -> Result<()> {
    for (block, buffer) in scene.iter() {
        ctx.attach_uniform_buffer(buffer, shader, block)?;
    }
    Ok(())
}
