use std::rc::Rc;

use glow::HasContext;

use crate::error::Result;
use crate::rendering::{
    GpuIndexBuffer, GpuVertexArray, GpuVertexBuffer, LayoutElement, VertexBufferLayout,
};

use super::{buffer_id, gl_error, to_gl_type};

pub(super) struct GlVertexBuffer {
    gl: Rc<glow::Context>,
    buffer: glow::NativeBuffer,
}

impl GlVertexBuffer {
    pub(super) fn new(gl: Rc<glow::Context>, data: &[u8]) -> Result<Self> {
        let buffer = unsafe {
            let buffer = gl
                .create_buffer()
                .map_err(|e| gl_error("create vertex buffer", e))?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, data, glow::DYNAMIC_DRAW);
            buffer
        };
        Ok(Self { gl, buffer })
    }
}

impl GpuVertexBuffer for GlVertexBuffer {
    fn render_id(&self) -> u32 {
        self.buffer.0.get()
    }

    fn edit(&mut self, offset: u32, data: &[u8]) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
            self.gl
                .buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, offset as i32, data);
        }
    }
}

impl Drop for GlVertexBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.buffer) };
    }
}

pub(super) struct GlIndexBuffer {
    gl: Rc<glow::Context>,
    buffer: glow::NativeBuffer,
}

impl GlIndexBuffer {
    pub(super) fn new(gl: Rc<glow::Context>, indices: &[u32]) -> Result<Self> {
        let buffer = unsafe {
            let buffer = gl
                .create_buffer()
                .map_err(|e| gl_error("create index buffer", e))?;
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::DYNAMIC_DRAW,
            );
            buffer
        };
        Ok(Self { gl, buffer })
    }
}

impl GpuIndexBuffer for GlIndexBuffer {
    fn render_id(&self) -> u32 {
        self.buffer.0.get()
    }

    fn edit(&mut self, offset: u32, indices: &[u32]) {
        let byte_offset = offset as usize * std::mem::size_of::<u32>();
        unsafe {
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.buffer));
            self.gl.buffer_sub_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                byte_offset as i32,
                bytemuck::cast_slice(indices),
            );
        }
    }
}

impl Drop for GlIndexBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.buffer) };
    }
}

pub(super) struct GlVertexArray {
    gl: Rc<glow::Context>,
    array: glow::NativeVertexArray,
    attribute_index: u32,
}

impl GlVertexArray {
    pub(super) fn new(gl: Rc<glow::Context>) -> Result<Self> {
        let array = unsafe {
            let array = gl
                .create_vertex_array()
                .map_err(|e| gl_error("create vertex array", e))?;
            gl.bind_vertex_array(Some(array));
            array
        };
        Ok(Self {
            gl,
            array,
            attribute_index: 0,
        })
    }
}

impl GpuVertexArray for GlVertexArray {
    fn render_id(&self) -> u32 {
        self.array.0.get()
    }

    fn add_vertex_buffer(&mut self, buffer: &dyn GpuVertexBuffer, layout: &VertexBufferLayout) {
        let stride = layout.stride() as i32;
        unsafe {
            self.gl.bind_vertex_array(Some(self.array));
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, buffer_id(buffer.render_id()));

            for element in layout {
                let Some(gl_type) = to_gl_type(element.data_type()) else {
                    log::warn!(
                        "vertex attribute {:?} has no GL pointer type; skipped",
                        element.data_type()
                    );
                    continue;
                };
                self.gl.enable_vertex_attrib_array(self.attribute_index);
                self.gl.vertex_attrib_pointer_f32(
                    self.attribute_index,
                    element.data_type().component_count() as i32,
                    gl_type,
                    element.normalized,
                    stride,
                    element.offset() as i32,
                );
                self.attribute_index += 1;
            }
        }
    }

    fn set_index_buffer(&mut self, buffer: &dyn GpuIndexBuffer) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.array));
            self.gl
                .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, buffer_id(buffer.render_id()));
        }
    }

    fn bind(&self, index_buffer: Option<&dyn GpuIndexBuffer>) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.array));
            if let Some(ibo) = index_buffer {
                self.gl
                    .bind_buffer(glow::ELEMENT_ARRAY_BUFFER, buffer_id(ibo.render_id()));
            }
        }
    }
}

impl Drop for GlVertexArray {
    fn drop(&mut self) {
        unsafe { self.gl.delete_vertex_array(self.array) };
    }
}
