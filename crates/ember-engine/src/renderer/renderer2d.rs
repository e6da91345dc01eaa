//! Quad and text renderer.
//!
//! One unit quad is shared by every submission; it is bound once per scene.
//! Text goes through the same quad path: each character is rasterized into a
//! shared staging buffer, uploaded to a shared font texture and drawn before
//! the next character overwrites both.

use std::path::PathBuf;

use glam::{Mat4, Vec2, Vec4};

use crate::error::{RenderError, Result};
use crate::rendering::{
    IndexBufferId, Primitive, RenderContext, ShaderDataType, ShaderId, ShaderSources, TextureData,
    TextureId, VertexArrayId, VertexBufferId, VertexBufferLayout,
};

use super::glyph::{FontdueRasterizer, GlyphRasterizer, GlyphStaging};
use super::quad::Quad;
use super::scene::SceneWideUniforms;
use super::{attach_scene, uniforms, RendererState};

/// Built-in textured, tinted quad shader.
pub const QUAD_SHADER: &str = include_str!("shaders/quad.glsl");

#[rustfmt::skip]
const QUAD_VERTICES: [f32; 16] = [
    // position     uv
    -0.5, -0.5,     0.0, 0.0,
    -0.5,  0.5,     0.0, 1.0,
     0.5,  0.5,     1.0, 1.0,
     0.5, -0.5,     1.0, 0.0,
];

const QUAD_INDICES: [u32; 4] = [0, 1, 2, 3];

/// Renderer2D settings.
#[derive(Debug, Clone)]
pub struct Renderer2DConfig {
    /// Combined `#region` shader file; the built-in quad shader when `None`.
    pub shader_path: Option<PathBuf>,
    pub font_path: PathBuf,
    /// Glyph height in pixels.
    pub char_size: f32,
    /// Staging buffer and font texture size.
    pub glyph_buffer_size: (u32, u32),
}

impl Default for Renderer2DConfig {
    fn default() -> Self {
        Self {
            shader_path: None,
            font_path: PathBuf::from("./assets/fonts/cour.ttf"),
            char_size: 100.0,
            glyph_buffer_size: (256, 256),
        }
    }
}

/// Rotation about the Z axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Angle {
    Degrees(f32),
    Radians(f32),
}

impl Angle {
    pub fn radians(self) -> f32 {
        match self {
            Self::Degrees(d) => d.to_radians(),
            Self::Radians(r) => r,
        }
    }
}

struct Data {
    shader: ShaderId,
    quad: VertexArrayId,
    quad_vertices: VertexBufferId,
    quad_indices: IndexBufferId,
    default_texture: TextureId,
    default_tint: Vec4,
    font_texture: TextureId,
    staging: GlyphStaging,
    rasterizer: Option<Box<dyn GlyphRasterizer>>,
}

impl Data {
    fn release(self, ctx: &mut RenderContext) {
        ctx.destroy_texture(self.default_texture);
        ctx.destroy_texture(self.font_texture);
        ctx.destroy_shader(self.shader);
        ctx.destroy_vertex_array(self.quad);
        ctx.destroy_vertex_buffer(self.quad_vertices);
        ctx.destroy_index_buffer(self.quad_indices);
    }
}

struct Built {
    shader: ShaderId,
    array: VertexArrayId,
    vertices: VertexBufferId,
    indices: IndexBufferId,
    default_texture: TextureId,
    font_texture: TextureId,
}

/// Everything `init_with` has put in the arena so far.
#[derive(Default)]
struct Created {
    textures: Vec<TextureId>,
    shader: Option<ShaderId>,
    array: Option<VertexArrayId>,
    vertices: Option<VertexBufferId>,
    indices: Option<IndexBufferId>,
}

impl Created {
    fn build(
        &mut self,
        ctx: &mut RenderContext,
        shader: &ShaderSources,
        (w, h): (u32, u32),
    ) -> Result<Built> {
        let shader = *self.shader.insert(ctx.create_shader(shader)?);

        let default_texture = ctx.create_texture(&TextureData::white_pixel())?;
        self.textures.push(default_texture);
        let font_texture = ctx.create_texture(&TextureData::blank(w, h, 4))?;
        self.textures.push(font_texture);

        let array = *self.array.insert(ctx.create_vertex_array()?);
        let vertices = *self.vertices.insert(ctx.create_vertex_buffer_from(
            &QUAD_VERTICES,
            VertexBufferLayout::from_types(&[ShaderDataType::Float2, ShaderDataType::Float2]),
        )?);
        let indices = *self.indices.insert(ctx.create_index_buffer(&QUAD_INDICES)?);
        ctx.add_vertex_buffer(array, vertices)?;
        ctx.set_index_buffer(array, indices)?;

        Ok(Built {
            shader,
            array,
            vertices,
            indices,
            default_texture,
            font_texture,
        })
    }

    fn release(self, ctx: &mut RenderContext) {
        for texture in self.textures {
            ctx.destroy_texture(texture);
        }
        if let Some(id) = self.shader {
            ctx.destroy_shader(id);
        }
        if let Some(id) = self.array {
            ctx.destroy_vertex_array(id);
        }
        if let Some(id) = self.vertices {
            ctx.destroy_vertex_buffer(id);
        }
        if let Some(id) = self.indices {
            ctx.destroy_index_buffer(id);
        }
    }
}

#[derive(Default)]
pub struct Renderer2D {
    state: RendererState,
    data: Option<Data>,
}

impl Renderer2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    /// Loads the shader and font named by `config` and builds the shared quad.
    ///
    /// A font that fails to load is logged; quads still work and text
    /// submissions draw nothing.
    pub fn init(&mut self, ctx: &mut RenderContext, config: &Renderer2DConfig) -> Result<()> {
        let shader = match &config.shader_path {
            Some(path) => ShaderSources::from_file(path)
                .inspect_err(|err| log::error!("Renderer2D shader: {err}"))?,
            None => ShaderSources::parse(QUAD_SHADER),
        };

        let rasterizer = match FontdueRasterizer::load(&config.font_path, config.char_size) {
            Ok(r) => Some(Box::new(r) as Box<dyn GlyphRasterizer>),
            Err(err) => {
                log::error!("could not load font face {}: {err}", config.font_path.display());
                None
            }
        };

        self.init_with(ctx, &shader, rasterizer, config.glyph_buffer_size)
    }

    /// Same as [`Self::init`] with the shader and rasterizer supplied directly.
    ///
    /// On failure everything created so far is destroyed and any previous
    /// initialization stays in place.
    pub fn init_with(
        &mut self,
        ctx: &mut RenderContext,
        shader: &ShaderSources,
        rasterizer: Option<Box<dyn GlyphRasterizer>>,
        glyph_buffer_size: (u32, u32),
    ) -> Result<()> {
        let (w, h) = glyph_buffer_size;
        let mut created = Created::default();
        let built = match created.build(ctx, shader, glyph_buffer_size) {
            Ok(built) => built,
            Err(err) => {
                created.release(ctx);
                log::error!("Renderer2D init failed: {err}");
                return Err(err);
            }
        };

        if let Some(old) = self.data.take() {
            old.release(ctx);
        }

        self.data = Some(Data {
            shader: built.shader,
            quad: built.array,
            quad_vertices: built.vertices,
            quad_indices: built.indices,
            default_texture: built.default_texture,
            default_tint: Vec4::ONE,
            font_texture: built.font_texture,
            staging: GlyphStaging::new(w, h),
            rasterizer,
        });
        self.state = RendererState::Ready;
        log::debug!("Renderer2D initialized ({w}x{h} glyph buffer)");
        Ok(())
    }

    pub fn default_texture(&self) -> Option<TextureId> {
        self.data.as_ref().map(|d| d.default_texture)
    }

    pub fn font_texture(&self) -> Option<TextureId> {
        self.data.as_ref().map(|d| d.font_texture)
    }

    pub fn shader(&self) -> Option<ShaderId> {
        self.data.as_ref().map(|d| d.shader)
    }

    pub fn has_font(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.rasterizer.is_some())
    }

    /// Binds the shader, attaches the scene blocks and binds the shared quad.
    pub fn begin(&mut self, ctx: &RenderContext, scene: &SceneWideUniforms) -> Result<()> {
        let Some(data) = &self.data else {
            log::error!("Renderer2D::begin before init");
            return Err(RenderError::NotInitialized("Renderer2D"));
        };
        ctx.shader(data.shader)?.bind();
        attach_scene(ctx, data.shader, scene)?;
        ctx.bind_vertex_array(data.quad)?;
        self.state = RendererState::InScene;
        Ok(())
    }

    pub fn submit_tint(&self, ctx: &RenderContext, quad: &Quad, tint: Vec4) -> Result<()> {
        let texture = self.data()?.default_texture;
        self.submit(ctx, quad, tint, texture, None)
    }

    pub fn submit_texture(
        &self,
        ctx: &RenderContext,
        quad: &Quad,
        texture: TextureId,
    ) -> Result<()> {
        let tint = self.data()?.default_tint;
        self.submit(ctx, quad, tint, texture, None)
    }

    pub fn submit_tint_rotated(
        &self,
        ctx: &RenderContext,
        quad: &Quad,
        tint: Vec4,
        angle: Angle,
    ) -> Result<()> {
        let texture = self.data()?.default_texture;
        self.submit(ctx, quad, tint, texture, Some(angle))
    }

    pub fn submit_texture_rotated(
        &self,
        ctx: &RenderContext,
        quad: &Quad,
        texture: TextureId,
        angle: Angle,
    ) -> Result<()> {
        let tint = self.data()?.default_tint;
        self.submit(ctx, quad, tint, texture, Some(angle))
    }

    /// Draws one quad. Every other quad submission ends up here.
    ///
    /// Model = translate × [rotate_z] × scale.
    pub fn submit(
        &self,
        ctx: &RenderContext,
        quad: &Quad,
        tint: Vec4,
        texture: TextureId,
        angle: Option<Angle>,
    ) -> Result<()> {
        let data = self.data()?;
        if self.state != RendererState::InScene {
            log::error!("Renderer2D::submit outside begin/end");
            return Err(RenderError::NotInScene("Renderer2D::submit"));
        }

        ctx.texture(texture)?.bind(0);

        let model = match angle {
            Some(angle) => {
                Mat4::from_translation(quad.translate)
                    * Mat4::from_rotation_z(angle.radians())
                    * Mat4::from_scale(quad.scale)
            }
            None => Mat4::from_translation(quad.translate) * Mat4::from_scale(quad.scale),
        };

        let shader = ctx.shader(data.shader)?;
        shader.upload_int(uniforms::TEXTURE, 0);
        shader.upload_float4(uniforms::TINT, tint);
        shader.upload_mat4(uniforms::MODEL, &model);

        let count = ctx.vertex_array(data.quad)?.draw_count();
        ctx.draw_indexed(Primitive::TriangleFan, count)
    }

    /// Draws one character with its bitmap's top-left at `position` plus the
    /// glyph bearing. Returns the horizontal advance.
    pub fn submit_char(
        &mut self,
        ctx: &mut RenderContext,
        ch: char,
        position: Vec2,
        tint: Vec4,
    ) -> Result<f32> {
        if self.state != RendererState::InScene {
            log::error!("Renderer2D::submit_char outside begin/end");
            return Err(RenderError::NotInScene("Renderer2D::submit_char"));
        }
        let Some(data) = self.data.as_mut() else {
            return Err(RenderError::NotInitialized("Renderer2D"));
        };
        let Some(rasterizer) = data.rasterizer.as_mut() else {
            log::error!("could not load glyph for {ch:?}: no font loaded");
            return Ok(0.0);
        };
        let glyph = match rasterizer.rasterize(ch) {
            Ok(glyph) => glyph,
            Err(err) => {
                log::error!("could not load glyph for {ch:?}: {err}");
                return Ok(0.0);
            }
        };

        data.staging.write(&glyph);
        let (w, h) = (data.staging.width(), data.staging.height());
        ctx.texture_mut(data.font_texture)?
            .edit(0, 0, w, h, data.staging.pixels());

        let quad = Quad::top_left_size(position + glyph.bearing, Vec2::new(w as f32, h as f32));
        let font_texture = data.font_texture;
        self.submit(ctx, &quad, tint, font_texture, None)?;
        Ok(glyph.advance)
    }

    /// Draws `text` left to right, chaining advances. Returns the total advance.
    pub fn submit_text(
        &mut self,
        ctx: &mut RenderContext,
        text: &str,
        position: Vec2,
        tint: Vec4,
    ) -> Result<f32> {
        let mut x = position.x;
        for ch in text.chars() {
            x += self.submit_char(ctx, ch, Vec2::new(x, position.y), tint)?;
        }
        Ok(x - position.x)
    }

    pub fn end(&mut self) -> Result<()> {
        if self.state != RendererState::InScene {
            log::error!("Renderer2D::end without begin");
            return Err(RenderError::NotInScene("Renderer2D::end"));
        }
        self.state = RendererState::Ready;
        Ok(())
    }

    fn data(&self) -> Result<&Data> {
        self.data.as_ref().ok_or_else(|| {
            log::error!("Renderer2D used before init");
            RenderError::NotInitialized("Renderer2D")
        })
    }
}

impl std::fmt::Debug for Renderer2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer2D")
            .field("state", &self.state)
            .field("has_font", &self.has_font())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Call, RecordingBackend};
    use crate::renderer::Glyph;
    use crate::rendering::{
        Backend, BackendRegistry, GpuIndexBuffer, GpuShader, GpuTexture, GpuUniformBuffer,
        GpuVertexArray, GpuVertexBuffer, RenderApi, RenderCommand, RenderCommandKind, UniformValue,
    };
    use glam::Vec3;

    /// Every glyph is a `size`×`size` block of full coverage.
    struct BlockFont {
        size: u32,
        advance: f32,
    }

    impl GlyphRasterizer for BlockFont {
        fn rasterize(&mut self, ch: char) -> Result<Glyph> {
            if ch == '\u{7f}' {
                return Err(RenderError::Font("no glyph".into()));
            }
            Ok(Glyph {
                width: self.size,
                height: self.size,
                bearing: Vec2::new(1.0, -(self.size as f32)),
                advance: self.advance,
                coverage: vec![200; (self.size * self.size) as usize],
            })
        }
    }

    /// Recording backend whose index buffer creation always fails.
    #[derive(Default)]
    struct NoIndexBuffers(RecordingBackend);

    impl Backend for NoIndexBuffers {
        fn name(&self) -> &'static str {
            "no-index-buffers"
        }

        fn create_vertex_buffer(&self, data: &[u8]) -> Result<Box<dyn GpuVertexBuffer>> {
            self.0.create_vertex_buffer(data)
        }

        fn create_index_buffer(&self, _: &[u32]) -> Result<Box<dyn GpuIndexBuffer>> {
            Err(RenderError::Backend("out of memory".into()))
        }

        fn create_vertex_array(&self) -> Result<Box<dyn GpuVertexArray>> {
            self.0.create_vertex_array()
        }

        fn create_texture(&self, data: &TextureData) -> Result<Box<dyn GpuTexture>> {
            self.0.create_texture(data)
        }

        fn create_shader(&self, sources: &ShaderSources) -> Result<Box<dyn GpuShader>> {
            self.0.create_shader(sources)
        }

        fn create_uniform_buffer(&self, size: u32) -> Result<Box<dyn GpuUniformBuffer>> {
            self.0.create_uniform_buffer(size)
        }

        fn create_command(&self, kind: RenderCommandKind) -> Box<dyn RenderCommand> {
            self.0.create_command(kind)
        }

        fn draw_indexed(&self, primitive: Primitive, count: u32) {
            self.0.draw_indexed(primitive, count);
        }
    }

    fn setup(font: Option<BlockFont>) -> (RenderContext, RecordingBackend, Renderer2D) {
        let backend = RecordingBackend::new();
        let registry = BackendRegistry::new().with(RenderApi::OpenGL, Box::new(backend.clone()));
        let mut ctx = RenderContext::new(RenderApi::OpenGL, registry);
        let mut renderer = Renderer2D::new();
        let font = font.map(|f| Box::new(f) as Box<dyn GlyphRasterizer>);
        renderer
            .init_with(&mut ctx, &ShaderSources::parse(QUAD_SHADER), font, (16, 16))
            .unwrap();
        backend.log().clear();
        (ctx, backend, renderer)
    }

    fn model_uploads(calls: &[Call]) -> Vec<Mat4> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::Upload {
                    value: UniformValue::Mat4(m),
                    ..
                } => Some(*m),
                _ => None,
            })
            .collect()
    }

    // ── init ──────────────────────────────────────────────────────────────

    #[test]
    fn built_in_shader_has_both_stages() {
        let sources = ShaderSources::parse(QUAD_SHADER);
        assert!(sources.validate().is_ok());
    }

    #[test]
    fn init_builds_shared_fan_quad() {
        let (ctx, _, renderer) = setup(None);
        let data = renderer.data().unwrap();
        assert_eq!(ctx.vertex_array(data.quad).unwrap().draw_count(), 4);
        let font = ctx.texture(data.font_texture).unwrap();
        assert_eq!((font.width(), font.height(), font.channels()), (16, 16, 4));
    }

    #[test]
    fn missing_font_file_leaves_text_inert() {
        let backend = RecordingBackend::new();
        let registry = BackendRegistry::new().with(RenderApi::OpenGL, Box::new(backend.clone()));
        let mut ctx = RenderContext::new(RenderApi::OpenGL, registry);
        let mut renderer = Renderer2D::new();
        let config = Renderer2DConfig {
            font_path: PathBuf::from("./no/such/font.ttf"),
            ..Renderer2DConfig::default()
        };
        renderer.init(&mut ctx, &config).unwrap();
        assert!(!renderer.has_font());

        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        backend.log().clear();
        let advance = renderer
            .submit_text(&mut ctx, "abc", Vec2::ZERO, Vec4::ONE)
            .unwrap();
        assert_eq!(advance, 0.0);
        assert!(backend.log().is_empty());
    }

    #[test]
    fn failed_init_leaves_arena_empty() {
        let backend = RecordingBackend::new();
        let registry = BackendRegistry::new().with(RenderApi::OpenGL, Box::new(backend.clone()));
        let mut ctx = RenderContext::new(RenderApi::OpenGL, registry);
        let mut renderer = Renderer2D::new();

        let vertex_only = ShaderSources::parse("#region Vertex\nvoid main() {}\n");
        assert!(renderer.init_with(&mut ctx, &vertex_only, None, (16, 16)).is_err());
        assert!(ctx.resources().is_empty());
        assert_eq!(renderer.state(), RendererState::Uninitialized);

        // fails after the shader, both textures and the vertex array exist
        let failing = BackendRegistry::new()
            .with(RenderApi::OpenGL, Box::new(NoIndexBuffers::default()));
        let mut ctx = RenderContext::new(RenderApi::OpenGL, failing);
        let good = ShaderSources::parse(QUAD_SHADER);
        assert!(renderer.init_with(&mut ctx, &good, None, (16, 16)).is_err());
        assert!(ctx.resources().is_empty());
    }

    #[test]
    fn reinit_replaces_previous_resources() {
        let (mut ctx, _, mut renderer) = setup(None);
        let before = ctx.resources().len();
        renderer
            .init_with(&mut ctx, &ShaderSources::parse(QUAD_SHADER), None, (8, 8))
            .unwrap();
        assert_eq!(ctx.resources().len(), before);
    }

    // ── quads ─────────────────────────────────────────────────────────────

    #[test]
    fn begin_binds_quad_once() {
        let (ctx, backend, mut renderer) = setup(None);
        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        let quad = Quad::centre_half_extent(Vec2::ZERO, 1.0);
        renderer.submit_tint(&ctx, &quad, Vec4::ONE).unwrap();
        renderer.submit_tint(&ctx, &quad, Vec4::ONE).unwrap();

        let calls = backend.log().calls();
        let binds = calls
            .iter()
            .filter(|c| matches!(c, Call::BindVertexArray { .. }))
            .count();
        let draws: Vec<_> = calls
            .iter()
            .filter(|c| matches!(c, Call::DrawIndexed { .. }))
            .collect();
        assert_eq!(binds, 1);
        assert_eq!(draws.len(), 2);
        assert_eq!(
            draws[0],
            &Call::DrawIndexed {
                primitive: Primitive::TriangleFan,
                count: 4
            }
        );
    }

    #[test]
    fn unrotated_model_is_translate_scale() {
        let (ctx, backend, mut renderer) = setup(None);
        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        let quad = Quad::top_left_size(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        renderer.submit_tint(&ctx, &quad, Vec4::ONE).unwrap();

        let model = model_uploads(&backend.log().calls())[0];
        let expected = Mat4::from_translation(Vec3::new(12.0, 23.0, 0.0))
            * Mat4::from_scale(Vec3::new(4.0, 6.0, 1.0));
        assert!(model.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn degrees_and_radians_agree() {
        let (ctx, backend, mut renderer) = setup(None);
        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        let quad = Quad::centre_half_extent(Vec2::new(5.0, 5.0), 2.0);
        renderer
            .submit_tint_rotated(&ctx, &quad, Vec4::ONE, Angle::Degrees(90.0))
            .unwrap();
        let quarter_turn = Angle::Radians(std::f32::consts::FRAC_PI_2);
        renderer
            .submit_tint_rotated(&ctx, &quad, Vec4::ONE, quarter_turn)
            .unwrap();

        let models = model_uploads(&backend.log().calls());
        assert!(models[0].abs_diff_eq(models[1], 1e-5));
        let corner = models[0].transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!(corner.abs_diff_eq(Vec3::new(5.0, 7.0, 0.0), 1e-4));
    }

    #[test]
    fn texture_submit_uses_default_tint() {
        let (mut ctx, backend, mut renderer) = setup(None);
        let tex = ctx.create_texture(&TextureData::blank(2, 2, 4)).unwrap();
        let tex_id = ctx.texture(tex).unwrap().render_id();
        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        backend.log().clear();

        renderer
            .submit_texture(&ctx, &Quad::centre_half_extent(Vec2::ZERO, 1.0), tex)
            .unwrap();
        let calls = backend.log().calls();
        assert_eq!(calls[0], Call::BindTexture { id: tex_id, unit: 0 });
        assert!(calls.iter().any(|c| matches!(
            c,
            Call::Upload { name, value: UniformValue::Float4(v), .. }
                if name == "u_tint" && *v == Vec4::ONE
        )));
    }

    #[test]
    fn submit_before_begin_is_rejected() {
        let (ctx, backend, renderer) = setup(None);
        let err = renderer
            .submit_tint(&ctx, &Quad::default(), Vec4::ONE)
            .unwrap_err();
        assert!(matches!(err, RenderError::NotInScene(_)));
        assert!(backend.log().is_empty());
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[test]
    fn char_uploads_staging_then_draws_font_texture() {
        let (mut ctx, backend, mut renderer) = setup(Some(BlockFont { size: 3, advance: 4.0 }));
        let font_id = ctx.texture(renderer.font_texture().unwrap()).unwrap().render_id();
        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        backend.log().clear();

        let advance = renderer
            .submit_char(&mut ctx, 'A', Vec2::new(10.0, 50.0), Vec4::ONE)
            .unwrap();
        assert_eq!(advance, 4.0);

        let calls = backend.log().calls();
        let Call::EditTexture { id, region, data } = &calls[0] else {
            panic!("expected texture edit first, got {:?}", calls[0]);
        };
        assert_eq!(*id, font_id);
        assert_eq!((region.width, region.height), (16, 16));
        assert_eq!(&data[..4], &[255, 255, 255, 200]);
        assert_eq!(&data[3 * 4..4 * 4], &[0, 0, 0, 0]);
        assert_eq!(calls[1], Call::BindTexture { id: font_id, unit: 0 });

        // top-left = position + bearing, size = glyph buffer size
        let model = model_uploads(&calls)[0];
        let expected = Quad::top_left_size(Vec2::new(11.0, 47.0), Vec2::new(16.0, 16.0));
        assert!(model
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(expected.translate, 1e-5));
    }

    #[test]
    fn text_chains_advances() {
        let (mut ctx, backend, mut renderer) = setup(Some(BlockFont { size: 2, advance: 5.0 }));
        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        backend.log().clear();

        let total = renderer
            .submit_text(&mut ctx, "abc", Vec2::new(100.0, 0.0), Vec4::ONE)
            .unwrap();
        assert_eq!(total, 15.0);

        let xs: Vec<f32> = model_uploads(&backend.log().calls())
            .iter()
            .map(|m| m.transform_point3(Vec3::ZERO).x)
            .collect();
        // centre x = pen x + bearing (1) + half the buffer width (8)
        assert_eq!(xs, vec![109.0, 114.0, 119.0]);
    }

    #[test]
    fn missing_glyph_advances_zero() {
        let (mut ctx, backend, mut renderer) = setup(Some(BlockFont { size: 2, advance: 5.0 }));
        renderer.begin(&ctx, &SceneWideUniforms::new()).unwrap();
        backend.log().clear();
        let advance = renderer
            .submit_char(&mut ctx, '\u{7f}', Vec2::ZERO, Vec4::ONE)
            .unwrap();
        assert_eq!(advance, 0.0);
        assert!(backend.log().is_empty());
    }
}
