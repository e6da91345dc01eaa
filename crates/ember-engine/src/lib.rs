//! Ember engine crate.
//!
//! An API-agnostic rendering layer: GPU resources created through a
//! [`RenderContext`](rendering::RenderContext) backed by a pluggable
//! [`Backend`](rendering::Backend), immediate-mode 2D and 3D renderers on top,
//! and typed window/input events fed from `winit`.

pub mod backend;
pub mod error;
pub mod events;
pub mod input;
pub mod logging;
pub mod platform;
pub mod renderer;
pub mod rendering;
pub mod time;

#[cfg(test)]
mod test_log;

pub use error::{RenderError, Result};
pub use rendering::{RenderApi, RenderContext};
