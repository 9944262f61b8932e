//! Game theme: window, asset paths, palette, layout and labels
//!
//! The theme is a TOML document compiled into the binary. Missing keys
//! fall back to the defaults below.

use serde::Deserialize;
use thiserror::Error;
use tictactoe_ui::Color;

const EMBEDDED_THEME: &str = include_str!("theme.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid theme: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root theme
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub window: WindowTheme,
    #[serde(default)]
    pub assets: AssetTheme,
    #[serde(default)]
    pub board: BoardTheme,
    #[serde(default)]
    pub header: HeaderTheme,
    #[serde(default)]
    pub sidebar: SidebarTheme,
    #[serde(default)]
    pub footer: FooterTheme,
}

impl Theme {
    /// Parse the theme compiled into the binary.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_toml(EMBEDDED_THEME)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowTheme {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Width of the score column on the left
    pub sidebar_width: u32,
    pub icon: String,
}

impl Default for WindowTheme {
    fn default() -> Self {
        Self {
            title: "Tic-Tac-Toe".to_string(),
            width: 640,
            height: 480,
            sidebar_width: 200,
            icon: "images/icon.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetTheme {
    pub font: String,
    pub player1_icon: String,
    pub player2_icon: String,
}

impl Default for AssetTheme {
    fn default() -> Self {
        Self {
            font: "fonts/DejaVuSans-Bold.ttf".to_string(),
            player1_icon: "images/player_1.png".to_string(),
            player2_icon: "images/player_2.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoardTheme {
    pub size: f32,
    pub item_size: f32,
    pub space: f32,
    pub background: Color,
    pub cell: Color,
    pub cell_hover: Color,
    pub cell_pressed: Color,
    /// Degrees per second
    pub spin_speed: f64,
}

impl Default for BoardTheme {
    fn default() -> Self {
        Self {
            size: 304.0,
            item_size: 98.0,
            space: 5.0,
            background: Color::rgb(80, 160, 160),
            cell: Color::rgb(210, 240, 240),
            cell_hover: Color::rgb(225, 255, 255),
            cell_pressed: Color::rgb(180, 230, 230),
            spin_speed: 30.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeaderTheme {
    pub player1_label: String,
    pub player2_label: String,
    pub label_size: f32,
    pub label_color: Color,
    pub indicator_color: Color,
    /// Pixels per second
    pub indicator_speed: f64,
    pub player1_win: String,
    pub player2_win: String,
    pub draw: String,
    pub result_size: f32,
    pub banner_border: Color,
    pub banner_fill: Color,
}

impl Default for HeaderTheme {
    fn default() -> Self {
        Self {
            player1_label: "Player 1".to_string(),
            player2_label: "Player 2".to_string(),
            label_size: 20.0,
            label_color: Color::rgb(30, 120, 120),
            indicator_color: Color::rgb(100, 180, 180),
            indicator_speed: 600.0,
            player1_win: "Player 1 wins".to_string(),
            player2_win: "Player 2 wins".to_string(),
            draw: "It's a draw!".to_string(),
            result_size: 24.0,
            banner_border: Color::rgb(120, 200, 200),
            banner_fill: Color::rgb(230, 240, 240),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SidebarTheme {
    pub background: Color,
    pub lines: Color,
    pub text_color: Color,
    pub player1_title: String,
    pub player2_title: String,
    pub draws_title: String,
    pub title_size: f32,
    pub count_size: f32,
}

impl Default for SidebarTheme {
    fn default() -> Self {
        Self {
            background: Color::rgb(230, 240, 240),
            lines: Color::rgb(80, 160, 160),
            text_color: Color::rgb(50, 140, 140),
            player1_title: "Player 1 wins".to_string(),
            player2_title: "Player 2 wins".to_string(),
            draws_title: "Draws".to_string(),
            title_size: 16.0,
            count_size: 40.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FooterTheme {
    pub restart_label: String,
    pub restart_size: f32,
    pub credit: String,
    pub credit_size: f32,
    pub credit_color: Color,
}

impl Default for FooterTheme {
    fn default() -> Self {
        Self {
            restart_label: "Restart".to_string(),
            restart_size: 16.0,
            credit: "Tic-Tac-Toe".to_string(),
            credit_size: 14.0,
            credit_color: Color::rgb(30, 120, 120),
        }
    }
}
