//! # tictactoe-ui
//!
//! A small retained-widget layer for 2D desktop games, rendered with wgpu.
//!
//! ## Features
//! - Geometric primitives (`Bounds`) mutated in place by their owners
//! - Drawables (`Rectangle`, `Texture`) and a three-state `Button`
//! - Text rendering through a bold TTF face rasterized with fontdue
//! - A single-active-scene `SceneManager` driving poll → update → draw
//! - A fixed logical canvas letterboxed into a resizable window
//!
//! Widgets never talk to the GPU. They append commands to a `DrawList`,
//! which the renderer consumes once per frame.
//!
//! ## Example
//!
//! ```no_run
//! use std::rc::Rc;
//! use tictactoe_ui::{EventLoop, GameWindowBuilder, Resources, SceneManager};
//!
//! let event_loop = EventLoop::new();
//! let window = GameWindowBuilder::new()
//!     .with_title("Board")
//!     .with_size(640, 480)
//!     .build(&event_loop)
//!     .expect("Failed to create window");
//!
//! let resources = Rc::new(Resources::new("fonts/DejaVuSans-Bold.ttf"));
//! let scenes = SceneManager::new(resources);
//! tictactoe_ui::run(window, event_loop, scenes);
//! ```

mod color;
mod draw;
pub mod elements;
mod geometry;
mod input;
mod renderer;
mod resources;
mod scene;
mod viewport;
mod window;

pub use color::Color;
pub use draw::{Bitmap, DrawCommand, DrawList};
pub use elements::{Button, ButtonState, ButtonStyle, Rectangle, Texture, TextureError, Widget};
pub use geometry::Bounds;
pub use input::{InputEvent, PointerButton};
pub use renderer::{Renderer, RendererError};
pub use resources::{load_rgba, AssetError, FontFace, GlyphRasterizer, Resources};
pub use scene::{LoopControl, Scene, SceneError, SceneManager};
pub use viewport::Viewport;
pub use window::{run, GameWindow, GameWindowBuilder, WindowConfig, WindowError};

pub use tao::event_loop::EventLoop;
