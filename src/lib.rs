//! # tictactoe
//!
//! Two-player Tic-Tac-Toe on one screen: a 3×3 board, a turn indicator,
//! running win/draw counters and a restart button.

pub mod app;
pub mod scene_game;
pub mod theme;
