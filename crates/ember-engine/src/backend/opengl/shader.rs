use std::rc::Rc;

use glow::HasContext;

use crate::error::{RenderError, Result};
use crate::rendering::{GpuShader, ShaderSources, ShaderStage, UniformValue};

use super::gl_error;

pub(super) struct GlShader {
    gl: Rc<glow::Context>,
    program: glow::NativeProgram,
}

fn stage_type(stage: ShaderStage) -> Option<u32> {
    match stage {
        ShaderStage::Vertex => Some(glow::VERTEX_SHADER),
        ShaderStage::Fragment => Some(glow::FRAGMENT_SHADER),
        ShaderStage::Geometry => Some(glow::GEOMETRY_SHADER),
        ShaderStage::TessellationControl => Some(glow::TESS_CONTROL_SHADER),
        ShaderStage::TessellationEvaluation => Some(glow::TESS_EVALUATION_SHADER),
        ShaderStage::Compute => None,
    }
}

impl GlShader {
    /// Compiles every graphics stage present and links them.
    ///
    /// On any failure the partially built objects are deleted.
    pub(super) fn new(gl: Rc<glow::Context>, sources: &ShaderSources) -> Result<Self> {
        let mut compiled = Vec::new();

        for (stage, src) in sources.stages() {
            let Some(kind) = stage_type(stage) else {
                log::warn!("compute region ignored; not linked into draw programs");
                continue;
            };
            match unsafe { compile(&gl, kind, stage, src) } {
                Ok(shader) => compiled.push(shader),
                Err(err) => {
                    for shader in compiled {
                        unsafe { gl.delete_shader(shader) };
                    }
                    return Err(err);
                }
            }
        }

        let program = unsafe { link(&gl, &compiled) };
        for shader in compiled {
            unsafe { gl.delete_shader(shader) };
        }
        Ok(Self { gl, program: program? })
    }

    fn location(&self, name: &str) -> Option<glow::NativeUniformLocation> {
        unsafe { self.gl.get_uniform_location(self.program, name) }
    }
}

unsafe fn compile(
    gl: &glow::Context,
    kind: u32,
    stage: ShaderStage,
    src: &str,
) -> Result<glow::NativeShader> {
    unsafe {
        let shader = gl
            .create_shader(kind)
            .map_err(|e| gl_error("create shader", e))?;
        gl.shader_source(shader, src);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(RenderError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }
}

unsafe fn link(gl: &glow::Context, shaders: &[glow::NativeShader]) -> Result<glow::NativeProgram> {
    unsafe {
        let program = gl
            .create_program()
            .map_err(|e| gl_error("create program", e))?;
        for &shader in shaders {
            gl.attach_shader(program, shader);
        }
        gl.link_program(program);
        for &shader in shaders {
            gl.detach_shader(program, shader);
        }
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(RenderError::ShaderLink(log));
        }
        Ok(program)
    }
}

impl GpuShader for GlShader {
    fn render_id(&self) -> u32 {
        self.program.0.get()
    }

    fn bind(&self) {
        unsafe { self.gl.use_program(Some(self.program)) };
    }

    fn upload(&self, name: &str, value: UniformValue) {
        // Unknown names resolve to no location; GL ignores uploads to it.
        let location = self.location(name);
        let location = location.as_ref();
        unsafe {
            self.gl.use_program(Some(self.program));
            match value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, v),
                UniformValue::Float2(v) => self.gl.uniform_2_f32(location, v.x, v.y),
                UniformValue::Float3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Float4(v) => self.gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat4(m) => {
                    self.gl
                        .uniform_matrix_4_f32_slice(location, false, &m.to_cols_array())
                }
            }
        }
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.program) };
    }
}
