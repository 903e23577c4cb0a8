//! Browser host: the `.scene` container and the canvas placed inside it.

use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::error::DemoError;

/// Canvas appended to the viewport container, plus the container's size.
pub struct SceneCanvas {
    pub canvas: HtmlCanvasElement,
    pub width: f32,
    pub height: f32,
}

/// Find the container matching `selector`, read its size and append a
/// canvas that fills it. Resizing the window resizes the canvas, which
/// winit reports as a regular resize.
pub fn attach_canvas(selector: &str) -> Result<SceneCanvas, DemoError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(DemoError::NoDocument)?;

    let container_missing = || DemoError::ContainerNotFound {
        selector: selector.to_string(),
    };
    let container: HtmlElement = document
        .query_selector(selector)
        .ok()
        .flatten()
        .ok_or_else(container_missing)?
        .dyn_into()
        .map_err(|_| container_missing())?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| DemoError::NoDocument)?
        .dyn_into()
        .map_err(|_| DemoError::NoDocument)?;
    // An unstyled canvas still renders but stops following the container size.
    if canvas
        .set_attribute("style", "display:block;width:100%;height:100%")
        .is_err()
    {
        log::warn!("could not style the scene canvas");
    }
    container
        .append_child(&canvas)
        .map_err(|_| container_missing())?;

    let width = container.offset_width() as f32;
    let height = container.offset_height() as f32;
    log::info!("attached canvas to `{}` ({}x{})", selector, width, height);

    Ok(SceneCanvas { canvas, width, height })
}
