//! Error types for asset loading and GPU bring-up
//!
//! The simulation itself has no error paths; invalid intents are ignored.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load an image asset (sprite texture or cursor)
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cursor image {} rejected: {reason}", path.display())]
    Cursor { path: PathBuf, reason: String },
}

/// Failure to bring up the GPU surface or device
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
