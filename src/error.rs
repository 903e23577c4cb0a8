//! Error types for scene setup and asset loading.

use std::fmt;

/// Errors surfaced while wiring the demo to its host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum DemoError {
    /// The host has no window/document to attach to (wasm only).
    NoDocument,
    /// No element matched the viewport container selector.
    ContainerNotFound { selector: String },
    /// The bytes behind an asset locator could not be fetched.
    AssetFetch { src: String, reason: String },
    /// Fetched bytes were not a decodable image.
    AssetDecode { src: String, reason: String },
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::NoDocument => write!(f, "no browser window or document available"),
            DemoError::ContainerNotFound { selector } => {
                write!(f, "viewport container `{}` not found", selector)
            }
            DemoError::AssetFetch { src, reason } => {
                write!(f, "failed to fetch asset {}: {}", src, reason)
            }
            DemoError::AssetDecode { src, reason } => {
                write!(f, "failed to decode asset {}: {}", src, reason)
            }
        }
    }
}

impl std::error::Error for DemoError {}
