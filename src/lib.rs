pub mod assets;
pub mod boundary;
pub mod bridge;
pub mod camera;
pub mod clock;
pub mod config;
pub mod demo;
pub mod error;
pub mod geometry;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod runner;
pub mod scene;
pub mod stage;
pub mod texture;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::sync::Arc;

use cgmath::Vector2;
use winit::{
    application::ApplicationHandler, dpi::PhysicalPosition, event::*, event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy}, keyboard::{KeyCode, PhysicalKey}, window::Window
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use crate::assets::LoadedImage;
use crate::clock::FrameClock;
use crate::config::SceneConfig;
use crate::demo::Demo;
use crate::error::DemoError;
use crate::renderer::Renderer;
use crate::stage::SpriteHandle;

/// Events delivered back to the event loop from async work
pub enum AppEvent {
    /// The renderer finished initializing (the web creates it asynchronously)
    #[cfg(target_arch = "wasm32")]
    Ready(State),
    #[cfg(target_arch = "wasm32")]
    StartupFailed(String),
    AssetLoaded {
        sprite: SpriteHandle,
        result: Result<LoadedImage, DemoError>,
    },
}

// This will store the state of our demo
pub struct State {
    window: Arc<Window>,
    renderer: Renderer,
    demo: Demo,
    clock: FrameClock,
}

impl State {
    pub async fn new(window: Arc<Window>, config: &SceneConfig, viewport: (f32, f32)) -> anyhow::Result<Self> {
        let renderer = Renderer::new(window.clone(), viewport, config.background).await?;
        let demo = Demo::new(config, viewport.0, viewport.1);

        Ok(Self {
            window,
            renderer,
            demo,
            clock: FrameClock::new(),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let logical = winit::dpi::PhysicalSize::new(width, height).to_logical::<f32>(self.window.scale_factor());
        let viewport = (logical.width, logical.height);
        self.renderer.resize(width, height, viewport);
        self.demo.resize(viewport.0, viewport.1);
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, is_pressed: bool) {
        match (code, is_pressed) {
            (KeyCode::Escape, true) => event_loop.exit(),
            (KeyCode::Space, true) => {
                if self.demo.runner().is_running() {
                    log::info!("paused");
                    self.demo.stop();
                } else {
                    log::info!("resumed");
                    self.demo.start();
                }
            }
            _ => {}
        }
    }

    fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        let logical = position.to_logical::<f32>(self.window.scale_factor());
        self.demo.pointer_moved(Vector2::new(logical.x, logical.y));
    }

    fn pointer_button(&mut self, state: ElementState) {
        match state {
            ElementState::Pressed => self.demo.pointer_pressed(),
            ElementState::Released => self.demo.pointer_released(),
        }
    }

    pub fn update(&mut self) {
        let elapsed = self.clock.delta();
        self.demo.frame(elapsed);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(self.demo.stage())
    }

    /// Sprite handles paired with the image each one still needs
    fn asset_requests(&self) -> Vec<(SpriteHandle, String)> {
        self.demo
            .stage()
            .iter()
            .map(|(handle, sprite)| (handle, sprite.source.clone()))
            .collect()
    }
}

/// Fetch every sprite image off the event loop and report back through the proxy.
fn load_textures(proxy: &EventLoopProxy<AppEvent>, requests: Vec<(SpriteHandle, String)>) {
    for (sprite, src) in requests {
        let proxy = proxy.clone();

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = assets::load_image(&src);
            send_loaded(&proxy, sprite, result);
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = assets::load_image(&src).await;
            send_loaded(&proxy, sprite, result);
        });
    }
}

fn send_loaded(proxy: &EventLoopProxy<AppEvent>, sprite: SpriteHandle, result: Result<LoadedImage, DemoError>) {
    if proxy.send_event(AppEvent::AssetLoaded { sprite, result }).is_err() {
        log::warn!("event loop closed before sprite {:?} finished loading", sprite);
    }
}

pub struct App {
    proxy: EventLoopProxy<AppEvent>,
    config: SceneConfig,
    state: Option<State>,
}

impl App {
    pub fn new(event_loop: &EventLoop<AppEvent>, config: SceneConfig) -> Self {
        Self {
            proxy: event_loop.create_proxy(),
            config,
            state: None,
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes().with_title("physics sprites");
        #[allow(unused_mut)]
        let mut viewport = self.config.fallback_viewport;

        #[cfg(not(target_arch = "wasm32"))]
        {
            window_attributes = window_attributes.with_inner_size(winit::dpi::LogicalSize::new(viewport.0, viewport.1));
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;

            match web::attach_canvas(&self.config.container_selector) {
                Ok(scene) => {
                    if scene.width > 0.0 && scene.height > 0.0 {
                        viewport = (scene.width, scene.height);
                    }
                    window_attributes = window_attributes.with_canvas(Some(scene.canvas));
                }
                Err(e) => {
                    log::error!("{}", e);
                    event_loop.exit();
                    return;
                }
            }
        }

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("unable to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            let size = window.inner_size().to_logical::<f32>(window.scale_factor());
            if size.width > 0.0 && size.height > 0.0 {
                viewport = (size.width, size.height);
            }
            // If we are not on web we can use pollster to
            // await the renderer
            match pollster::block_on(State::new(window, &self.config, viewport)) {
                Ok(state) => {
                    load_textures(&self.proxy, state.asset_requests());
                    self.state = Some(state);
                }
                Err(e) => {
                    log::error!("startup failed: {:#}", e);
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            // Run the future asynchronously and use the
            // proxy to send the results to the event loop
            let proxy = self.proxy.clone();
            let config = self.config.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let event = match State::new(window, &config, viewport).await {
                    Ok(state) => AppEvent::Ready(state),
                    Err(e) => AppEvent::StartupFailed(format!("{:#}", e)),
                };
                if proxy.send_event(event).is_err() {
                    log::error!("event loop closed during startup");
                }
            });
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            #[cfg(target_arch = "wasm32")]
            AppEvent::Ready(mut state) => {
                state.window.request_redraw();
                let size = state.window.inner_size();
                state.resize(size.width, size.height);
                load_textures(&self.proxy, state.asset_requests());
                self.state = Some(state);
            }
            #[cfg(target_arch = "wasm32")]
            AppEvent::StartupFailed(reason) => {
                log::error!("startup failed: {}", reason);
                event_loop.exit();
            }
            AppEvent::AssetLoaded { sprite, result } => {
                let Some(state) = &mut self.state else {
                    return;
                };
                match result {
                    Ok(image) => {
                        log::info!("loaded {} ({}x{})", image.src, image.width, image.height);
                        state.renderer.set_sprite_texture(sprite, &image);
                    }
                    // The sprite keeps its placeholder
                    Err(e) => log::error!("{}", e),
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => state.pointer_moved(position),
            WindowEvent::CursorLeft { .. } => state.demo.pointer_left(),
            WindowEvent::MouseInput {
                state: button_state,
                button: MouseButton::Left,
                ..
            } => state.pointer_button(button_state),
            WindowEvent::RedrawRequested => {
                state.update();
                match state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e)
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                },
                ..
            } => state.handle_key(event_loop, code, key_state.is_pressed()),
            _ => {}
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    run_with(SceneConfig::default())
}

pub fn run_with(config: SceneConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }
    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info)?;
    }

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    let mut app = App::new(&event_loop, config);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), wasm_bindgen::JsValue> {
    console_error_panic_hook::set_once();
    run().unwrap_throw();

    Ok(())
}
