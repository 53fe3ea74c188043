//! Terminal Snake: the game core plus the crossterm/ratatui shell that hosts it.

pub mod canvas;
pub mod config;
pub mod error;
pub mod fruit;
pub mod game;
pub mod input;
pub mod logging;
pub mod platform;
pub mod snake;
pub mod surface;
pub mod terminal_runtime;
