//! Fetching and decoding sprite images.

use crate::error::DemoError;

/// A decoded RGBA8 image ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub src: String,
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub fn is_remote(src: &str) -> bool {
    src.starts_with("http://") || src.starts_with("https://")
}

pub fn decode_image(src: &str, bytes: &[u8]) -> Result<LoadedImage, DemoError> {
    let image = image::load_from_memory(bytes).map_err(|e| DemoError::AssetDecode {
        src: src.to_string(),
        reason: e.to_string(),
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(LoadedImage {
        src: src.to_string(),
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

fn fetch_error(src: &str, reason: impl ToString) -> DemoError {
    DemoError::AssetFetch {
        src: src.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fetch_bytes(src: &str) -> Result<Vec<u8>, DemoError> {
    if !is_remote(src) {
        return std::fs::read(src).map_err(|e| fetch_error(src, e));
    }
    let response = reqwest::blocking::get(src)
        .and_then(|response| response.error_for_status())
        .map_err(|e| fetch_error(src, e))?;
    let bytes = response.bytes().map_err(|e| fetch_error(src, e))?;
    Ok(bytes.to_vec())
}

/// Blocking; run it off the event loop thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_image(src: &str) -> Result<LoadedImage, DemoError> {
    let bytes = fetch_bytes(src)?;
    decode_image(src, &bytes)
}

#[cfg(target_arch = "wasm32")]
fn absolute_url(src: &str) -> Result<reqwest::Url, DemoError> {
    if let Ok(url) = reqwest::Url::parse(src) {
        return Ok(url);
    }
    // Relative locators resolve against the page, as an <img> would.
    let base = web_sys::window()
        .and_then(|window| window.location().href().ok())
        .ok_or(DemoError::NoDocument)?;
    reqwest::Url::parse(&base)
        .and_then(|base| base.join(src))
        .map_err(|e| fetch_error(src, e))
}

#[cfg(target_arch = "wasm32")]
pub async fn fetch_bytes(src: &str) -> Result<Vec<u8>, DemoError> {
    let url = absolute_url(src)?;
    let response = reqwest::get(url)
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| fetch_error(src, e))?;
    let bytes = response.bytes().await.map_err(|e| fetch_error(src, e))?;
    Ok(bytes.to_vec())
}

#[cfg(target_arch = "wasm32")]
pub async fn load_image(src: &str) -> Result<LoadedImage, DemoError> {
    let bytes = fetch_bytes(src).await?;
    decode_image(src, &bytes)
}
