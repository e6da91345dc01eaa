//! Backend implementations.
//!
//! `opengl` drives a real GL context through `glow`; `recording` is a
//! headless stand-in that logs what a GPU would have been asked to do.

#[cfg(not(target_arch = "wasm32"))]
pub mod opengl;
pub mod recording;

#[cfg(not(target_arch = "wasm32"))]
pub use opengl::OpenGlBackend;
pub use recording::{Call, CallLog, RecordingBackend};
