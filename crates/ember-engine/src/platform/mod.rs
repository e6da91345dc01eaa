//! Glue between `winit` and the engine's event and input types.
//!
//! Window and GL context creation stay with the application; this module only
//! describes the window and translates what it reports.

mod window;
pub mod winit;

pub use window::WindowProperties;
