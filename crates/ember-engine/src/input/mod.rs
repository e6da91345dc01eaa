//! Input subsystem.
//!
//! Codes are platform-agnostic integers from [`key_codes`]; the platform
//! layer translates native keys into them.

pub mod key_codes;
mod state;

pub use state::InputState;
