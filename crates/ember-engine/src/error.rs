//! Error type shared by every fallible factory and renderer call.
//!
//! Failures are logged at `error` level where they happen and then returned,
//! so callers can either inspect the `Result` or rely on the log.

use std::path::PathBuf;

use thiserror::Error;

use crate::rendering::{RenderApi, ShaderStage};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render API {0:?} has no registered backend")]
    UnsupportedApi(RenderApi),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("shader source has no {0:?} region")]
    MissingShaderStage(ShaderStage),

    #[error("{stage:?} shader failed to compile: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },

    #[error("shader program failed to link: {0}")]
    ShaderLink(String),

    #[error("unsupported texture channel count {0} (expected 3 or 4)")]
    UnsupportedChannelCount(u32),

    #[error("texture data holds {actual} bytes, expected {expected}")]
    TextureDataSize { expected: usize, actual: usize },

    #[error("stale or foreign {0} handle")]
    InvalidHandle(&'static str),

    #[error("{0} used before init")]
    NotInitialized(&'static str),

    #[error("{0} called outside begin/end")]
    NotInScene(&'static str),

    #[error("font error: {0}")]
    Font(String),

    #[error("backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
