//! # Connect Four
//!
//! Connect Four on a 6x7 grid against a computer that plays uniformly at
//! random among the columns with room. Pieces fall one cell at a time so a
//! presenter can animate the drop.
//!
//! ## Modules
//!
//! - [`game`] — Board, win detection, and the engine that runs the turn cycle
//! - [`ai`] — Agent trait and the random computer player
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — File-backed tracing subscriber
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod ui;
