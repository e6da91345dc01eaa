use std::rc::Rc;

use glow::HasContext;

use crate::error::Result;
use crate::rendering::{GpuShader, GpuUniformBuffer};

use super::{gl_error, program_id};

pub(super) struct GlUniformBuffer {
    gl: Rc<glow::Context>,
    buffer: glow::NativeBuffer,
    binding: u32,
}

impl GlUniformBuffer {
    pub(super) fn new(gl: Rc<glow::Context>, size: u32, binding: u32) -> Result<Self> {
        let buffer = unsafe {
            let buffer = gl
                .create_buffer()
                .map_err(|e| gl_error("create uniform buffer", e))?;
            gl.bind_buffer(glow::UNIFORM_BUFFER, Some(buffer));
            gl.buffer_data_size(glow::UNIFORM_BUFFER, size as i32, glow::DYNAMIC_DRAW);
            gl.bind_buffer_range(glow::UNIFORM_BUFFER, binding, Some(buffer), 0, size as i32);
            buffer
        };
        Ok(Self { gl, buffer, binding })
    }
}

impl GpuUniformBuffer for GlUniformBuffer {
    fn render_id(&self) -> u32 {
        self.buffer.0.get()
    }

    fn binding_point(&self) -> u32 {
        self.binding
    }

    fn attach_shader_block(&self, shader: &dyn GpuShader, block_name: &str) {
        let Some(program) = program_id(shader.render_id()) else {
            return;
        };
        unsafe {
            if let Some(index) = self.gl.get_uniform_block_index(program, block_name) {
                self.gl.uniform_block_binding(program, index, self.binding);
            }
        }
    }

    fn write(&mut self, offset: u32, data: &[u8]) {
        unsafe {
            self.gl.bind_buffer(glow::UNIFORM_BUFFER, Some(self.buffer));
            self.gl
                .buffer_sub_data_u8_slice(glow::UNIFORM_BUFFER, offset as i32, data);
        }
    }
}

impl Drop for GlUniformBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.buffer) };
    }
}
