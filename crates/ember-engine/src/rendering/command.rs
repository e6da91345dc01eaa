//! One-shot render state commands.
//!
//! A command is created by the active backend and consumed by
//! [`action_command`]. Commands are not reusable and not queued.

/// What a command does, independent of the backend that performs it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RenderCommandKind {
    ClearDepthColour,
    ClearDepth,
    SetClearColour([f32; 4]),
    SetDepthTest(bool),
    SetBackfaceCulling(bool),
    SetBlend(bool),
}

/// A backend-specific state change, executed exactly once.
pub trait RenderCommand {
    fn kind(&self) -> RenderCommandKind;

    fn action(self: Box<Self>);
}

/// Runs `command` and drops it.
pub fn action_command(command: Box<dyn RenderCommand>) {
    log::trace!("render command {:?}", command.kind());
    command.action();
}
