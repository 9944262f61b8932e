//! Game window creation and the frame loop

use std::path::{Path, PathBuf};
use std::time::Instant;

use tao::{
    dpi::LogicalSize,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::{Icon, Window, WindowBuilder},
};
use thiserror::Error;

use crate::renderer::{Renderer, RendererError};
use crate::{load_rgba, DrawList, InputEvent, LoopControl, PointerButton, SceneManager, Viewport};

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Failed to create window: {0}")]
    WindowCreationFailed(#[from] tao::error::OsError),
    #[error("Renderer error: {0}")]
    RendererError(#[from] RendererError),
}

/// Configuration for creating a game window.
#[derive(Clone, Debug)]
pub struct WindowConfig {
    /// Logical canvas width; also the initial window width.
    pub width: u32,
    /// Logical canvas height; also the initial window height.
    pub height: u32,
    pub title: String,
    pub resizable: bool,
    /// Image used as the window icon. Missing files are logged and ignored.
    pub icon: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "Game".to_string(),
            resizable: true,
            icon: None,
        }
    }
}

/// A window with its renderer and canvas mapping.
pub struct GameWindow {
    // declared before `window` so the surface is dropped first
    renderer: Renderer,
    window: Window,
    viewport: Viewport,
}

impl GameWindow {
    pub fn new(event_loop: &EventLoop<()>, config: WindowConfig) -> Result<Self, WindowError> {
        let mut builder = WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        if let Some(path) = &config.icon {
            builder = builder.with_window_icon(load_icon(path));
        }

        let window = builder.build(event_loop)?;
        let size = window.inner_size();
        let renderer = Renderer::new(&window, size.width, size.height)?;

        let mut viewport = Viewport::new(config.width as f32, config.height as f32);
        viewport.resize(size.width, size.height);

        log::info!(
            "Window created: {:?} {}x{} (canvas {}x{})",
            config.title,
            size.width,
            size.height,
            config.width,
            config.height
        );

        Ok(Self {
            renderer,
            window,
            viewport,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        self.renderer.resize(width, height);
    }

    pub fn render(&mut self, list: &DrawList) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(list, &self.viewport)
    }
}

fn load_icon(path: &Path) -> Option<Icon> {
    let rgba = match load_rgba(path) {
        Ok(rgba) => rgba,
        Err(e) => {
            log::error!("Window icon unavailable: {}", e);
            return None;
        }
    };

    let (width, height) = rgba.dimensions();
    match Icon::from_rgba(rgba.into_raw(), width, height) {
        Ok(icon) => Some(icon),
        Err(e) => {
            log::error!("Window icon rejected: {}", e);
            None
        }
    }
}

/// Builder for [`GameWindow`].
pub struct GameWindowBuilder {
    config: WindowConfig,
}

impl GameWindowBuilder {
    pub fn new() -> Self {
        Self {
            config: WindowConfig::default(),
        }
    }

    /// Set the logical canvas size, which is also the initial window size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.config.resizable = resizable;
        self
    }

    pub fn with_icon(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.icon = Some(path.into());
        self
    }

    pub fn build(self, event_loop: &EventLoop<()>) -> Result<GameWindow, WindowError> {
        GameWindow::new(event_loop, self.config)
    }
}

impl Default for GameWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

/// Run the frame loop until the window is closed.
///
/// Window events are translated into [`InputEvent`]s in canvas
/// coordinates and queued; once the platform queue drains, the scene
/// manager runs one frame with them and a redraw is requested.
pub fn run<E: 'static>(
    mut game_window: GameWindow,
    event_loop: EventLoop<()>,
    mut scenes: SceneManager<E>,
) -> ! {
    let mut last_frame = Instant::now();
    let mut pending: Vec<InputEvent> = Vec::new();
    let mut cursor = (-1.0_f32, -1.0_f32);
    let mut draw_list = DrawList::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CursorMoved { position, .. },
                ..
            } => {
                cursor = game_window
                    .viewport()
                    .to_logical(position.x as f32, position.y as f32);
                pending.push(InputEvent::PointerMoved {
                    x: cursor.0,
                    y: cursor.1,
                });
            }

            Event::WindowEvent {
                event: WindowEvent::CursorLeft { .. },
                ..
            } => {
                cursor = (-1.0, -1.0);
                pending.push(InputEvent::PointerMoved {
                    x: cursor.0,
                    y: cursor.1,
                });
            }

            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => {
                let (x, y) = cursor;
                let button = pointer_button(button);
                pending.push(match state {
                    ElementState::Pressed => InputEvent::PointerDown { x, y, button },
                    _ => InputEvent::PointerUp { x, y, button },
                });
            }

            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => {
                game_window.handle_resize(size.width, size.height);
            }

            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                pending.push(InputEvent::Quit);
            }

            Event::MainEventsCleared => {
                let now = Instant::now();
                let delta = now.duration_since(last_frame).as_secs_f64();
                last_frame = now;

                match scenes.run_frame(pending.drain(..), delta, &mut draw_list) {
                    LoopControl::Quit => *control_flow = ControlFlow::Exit,
                    LoopControl::Continue => game_window.request_redraw(),
                }
            }

            Event::RedrawRequested(_) => {
                if let Err(e) = game_window.render(&draw_list) {
                    match e {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            log::warn!("Surface {:?}, reconfiguring", e);
                            let size = game_window.window().inner_size();
                            game_window.handle_resize(size.width, size.height);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            log::error!("Render error: {:?}", e);
                            scenes.shutdown();
                            *control_flow = ControlFlow::Exit;
                        }
                        _ => log::warn!("Frame skipped: {:?}", e),
                    }
                }
            }

            _ => (),
        }
    })
}
