//! Error types for the eye and its tray companion.

use thiserror::Error;

/// Startup failures. Anything after the message loop starts is recovered locally.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to register window class")]
    WindowClass,

    #[error("Failed to create eye window: {0}")]
    CreateWindow(String),

    #[error("Unsupported platform: the eye needs a Windows desktop")]
    UnsupportedPlatform,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures reported by a render surface
#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("Cursor position unavailable: {0}")]
    CursorUnavailable(String),
}
