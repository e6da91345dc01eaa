use glam::{Mat4, Vec4};

use crate::error::{RenderError, Result};
use crate::rendering::{Primitive, RenderContext, TextureData, TextureId, VertexArrayId};

use super::material::Material;
use super::scene::SceneWideUniforms;
use super::{attach_scene, uniforms, RendererState};

/// Unbatched renderer for indexed triangle geometry.
///
/// Every `submit` binds the material's shader, attaches the scene-wide
/// uniform blocks, uploads the per-draw uniforms and issues one draw.
/// Materials without a texture or tint fall back to a 1x1 white texture and
/// an opaque white tint.
#[derive(Debug, Default)]
pub struct Renderer3D {
    state: RendererState,
    default_texture: Option<TextureId>,
    default_tint: Vec4,
    scene: SceneWideUniforms,
}

impl Renderer3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn default_texture(&self) -> Option<TextureId> {
        self.default_texture
    }

    pub fn default_tint(&self) -> Vec4 {
        self.default_tint
    }

    /// Creates the default texture. Calling it again replaces the defaults.
    pub fn init(&mut self, ctx: &mut RenderContext) -> Result<()> {
        if let Some(old) = self.default_texture.take() {
            ctx.destroy_texture(old);
        }
        self.default_texture = Some(ctx.create_texture(&TextureData::white_pixel())?);
        self.default_tint = Vec4::ONE;
        self.scene.clear();
        self.state = RendererState::Ready;
        log::debug!("Renderer3D initialized");
        Ok(())
    }

    /// Starts a scene. Only stores the uniform map; no GPU work happens here.
    pub fn begin(&mut self, scene: &SceneWideUniforms) -> Result<()> {
        match self.state {
            RendererState::Uninitialized => {
                log::error!("Renderer3D::begin before init");
                return Err(RenderError::NotInitialized("Renderer3D"));
            }
            RendererState::InScene => log::warn!("Renderer3D::begin inside a scene; restarting it"),
            RendererState::Ready => {}
        }
        self.scene = scene.clone();
        self.state = RendererState::InScene;
        Ok(())
    }

    pub fn submit(
        &mut self,
        ctx: &RenderContext,
        geometry: VertexArrayId,
        material: &Material,
        model: &Mat4,
    ) -> Result<()> {
        if self.state != RendererState::InScene {
            log::error!("Renderer3D::submit outside begin/end");
            return Err(RenderError::NotInScene("Renderer3D::submit"));
        }
        let default_texture = self
            .default_texture
            .ok_or(RenderError::NotInitialized("Renderer3D"))?;

        let shader_id = material.shader();
        let shader = ctx.shader(shader_id)?;
        shader.bind();
        attach_scene(ctx, shader_id, &self.scene)?;

        shader.upload_mat4(uniforms::MODEL, model);

        let texture = material.texture().unwrap_or(default_texture);
        ctx.texture(texture)?.bind(0);
        shader.upload_int(uniforms::TEXTURE, 0);

        shader.upload_float4(uniforms::TINT, material.tint().unwrap_or(self.default_tint));

        ctx.bind_vertex_array(geometry)?;
        let count = ctx.vertex_array(geometry)?.draw_count();
        ctx.draw_indexed(Primitive::Triangles, count)
    }

    /// Ends the scene and forgets its uniform map.
    pub fn end(&mut self) -> Result<()> {
        if self.state != RendererState::InScene {
            log::error!("Renderer3D::end without begin");
            return Err(RenderError::NotInScene("Renderer3D::end"));
        }
        self.scene.clear();
        self.state = RendererState::Ready;
        Ok(())
    }
}
