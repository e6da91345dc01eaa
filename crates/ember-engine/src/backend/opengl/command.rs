use std::rc::Rc;

use glow::HasContext;

use crate::rendering::{RenderCommand, RenderCommandKind};

pub(super) struct GlCommand {
    gl: Rc<glow::Context>,
    kind: RenderCommandKind,
}

impl GlCommand {
    pub(super) fn new(gl: Rc<glow::Context>, kind: RenderCommandKind) -> Self {
        Self { gl, kind }
    }

    unsafe fn toggle(&self, cap: u32, enabled: bool) {
        unsafe {
            if enabled {
                self.gl.enable(cap);
            } else {
                self.gl.disable(cap);
            }
        }
    }
}

impl RenderCommand for GlCommand {
    fn kind(&self) -> RenderCommandKind {
        self.kind
    }

    fn action(self: Box<Self>) {
        let gl = &self.gl;
        unsafe {
            match self.kind {
                RenderCommandKind::ClearDepthColour => {
                    gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT)
                }
                RenderCommandKind::ClearDepth => gl.clear(glow::DEPTH_BUFFER_BIT),
                RenderCommandKind::SetClearColour([r, g, b, a]) => gl.clear_color(r, g, b, a),
                RenderCommandKind::SetDepthTest(enabled) => self.toggle(glow::DEPTH_TEST, enabled),
                RenderCommandKind::SetBackfaceCulling(enabled) => {
                    self.toggle(glow::CULL_FACE, enabled);
                    if enabled {
                        gl.cull_face(glow::BACK);
                    }
                }
                RenderCommandKind::SetBlend(enabled) => {
                    self.toggle(glow::BLEND, enabled);
                    if enabled {
                        gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                    }
                }
            }
        }
    }
}
