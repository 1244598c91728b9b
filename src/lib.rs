//! Conway's Game of Life on an unbounded grid.
//!
//! [`grid::SparseGrid`] stores only live cells and their dead neighbours, so
//! work per toggle or generation scales with the pattern, not the board.
//! [`driver::Driver`] runs it on a timer; the remaining modules are the
//! terminal front end.

pub mod app;
pub mod canvas;
pub mod config;
pub mod coord;
pub mod driver;
pub mod grid;
pub mod help;
pub mod logging;
pub mod patterns;
pub mod settings;
pub mod terminal;
pub mod timer;

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Pattern(#[from] patterns::PatternError),
}
