//! Static configuration for the demo scene.

use cgmath::Vector2;

const UNSPLASH_PARAMS: &str =
    "?ixlib=rb-1.2.1&ixid=eyJhcHBfaWQiOjEyMDd9&auto=format&fit=crop&w=1000&q=80";

/// One image to turn into a body + sprite pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetDescriptor {
    /// URL or file path of the sprite image.
    pub src: String,
    pub initial_position: Vector2<f32>,
    pub width: f32,
    pub height: f32,
}

impl AssetDescriptor {
    pub fn new(src: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            src: src.into(),
            initial_position: Vector2::new(x, y),
            width,
            height,
        }
    }
}

/// The three photos the demo drops into the scene.
pub fn default_assets() -> Vec<AssetDescriptor> {
    [
        ("photo-1480796927426-f609979314bd", 300.0),
        ("photo-1526312426976-f4d754fa9bd6", 300.0),
        ("photo-1534214526114-0ea4d47b04f2", 500.0),
    ]
    .into_iter()
    .map(|(photo, x)| {
        AssetDescriptor::new(
            format!("https://images.unsplash.com/{}{}", photo, UNSPLASH_PARAMS),
            x,
            180.0,
            200.0,
            100.0,
        )
    })
    .collect()
}

/// Surface properties applied to every movable body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyMaterial {
    /// Bounciness in [0, 1].
    pub restitution: f32,
    pub friction: f32,
}

impl Default for BodyMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            friction: 0.1,
        }
    }
}

/// Everything the demo needs to build its scene.
///
/// ```
/// use physicssprites::config::SceneConfig;
///
/// let config = SceneConfig::default()
///     .with_wall_thickness(20.0)
///     .with_gravity(0.0, 500.0);
/// assert_eq!(config.assets.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// CSS selector of the element that hosts the canvas (wasm only).
    pub container_selector: String,
    /// Viewport used when the host cannot report one.
    pub fallback_viewport: (f32, f32),
    /// Gravity in pixels per second squared, y pointing down.
    pub gravity: Vector2<f32>,
    /// Fixed physics timestep in seconds.
    pub timestep: f32,
    pub wall_thickness: f32,
    pub material: BodyMaterial,
    /// Clear colour; alpha 0 lets the host page show through.
    pub background: [f64; 4],
    pub assets: Vec<AssetDescriptor>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            container_selector: ".scene".to_string(),
            fallback_viewport: (800.0, 600.0),
            gravity: Vector2::new(0.0, 1000.0),
            timestep: 1.0 / 60.0,
            wall_thickness: 10.0,
            material: BodyMaterial::default(),
            background: [0.0, 0.0, 0.0, 0.0],
            assets: default_assets(),
        }
    }
}

impl SceneConfig {
    pub fn with_container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    pub fn with_fallback_viewport(mut self, width: f32, height: f32) -> Self {
        self.fallback_viewport = (width, height);
        self
    }

    pub fn with_gravity(mut self, x: f32, y: f32) -> Self {
        self.gravity = Vector2::new(x, y);
        self
    }

    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_wall_thickness(mut self, thickness: f32) -> Self {
        self.wall_thickness = thickness;
        self
    }

    pub fn with_material(mut self, material: BodyMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn with_background(mut self, rgba: [f64; 4]) -> Self {
        self.background = rgba;
        self
    }

    pub fn with_assets(mut self, assets: Vec<AssetDescriptor>) -> Self {
        self.assets = assets;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_assets_match_the_demo_layout() {
        let assets = default_assets();
        assert_eq!(assets.len(), 3);
        assert!(assets.iter().all(|a| a.width == 200.0 && a.height == 100.0));
        assert_eq!(assets[0].initial_position, Vector2::new(300.0, 180.0));
        assert_eq!(assets[2].initial_position, Vector2::new(500.0, 180.0));
        assert!(assets.iter().all(|a| a.src.starts_with("https://images.unsplash.com/")));
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = SceneConfig::default()
            .with_container_selector("#stage")
            .with_timestep(1.0 / 120.0)
            .with_assets(Vec::new());
        assert_eq!(config.container_selector, "#stage");
        assert_eq!(config.timestep, 1.0 / 120.0);
        assert!(config.assets.is_empty());
        assert_eq!(config.material.restitution, 0.8);
    }
}
