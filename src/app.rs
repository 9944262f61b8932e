//! Startup: theme, window, shared resources and the first scene

use std::rc::Rc;

use thiserror::Error;
use tictactoe_ui::{EventLoop, GameWindowBuilder, Resources, SceneError, SceneManager, WindowError};

use crate::scene_game::SceneGame;
use crate::theme::{ConfigError, Theme};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Shared with every scene the manager builds.
#[derive(Clone)]
pub struct GameEnv {
    pub resources: Rc<Resources>,
    pub theme: Rc<Theme>,
}

impl GameEnv {
    pub fn new(theme: Theme) -> Self {
        let resources = Rc::new(Resources::new(theme.assets.font.clone()));
        Self {
            resources,
            theme: Rc::new(theme),
        }
    }
}

/// Open the window and play until it is closed.
///
/// Only returns on a startup failure.
pub fn run() -> Result<(), AppError> {
    let theme = Theme::load()?;
    log::info!(
        "Starting {} ({}x{})",
        theme.window.title,
        theme.window.width,
        theme.window.height
    );

    let event_loop = EventLoop::new();
    let window = GameWindowBuilder::new()
        .with_title(theme.window.title.clone())
        .with_size(theme.window.width, theme.window.height)
        .with_icon(theme.window.icon.clone())
        .build(&event_loop)?;

    let mut scenes = SceneManager::new(GameEnv::new(theme));
    scenes.go_to::<SceneGame>()?;

    tictactoe_ui::run(window, event_loop, scenes)
}
