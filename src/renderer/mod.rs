//! Rendering module
//!
//! Draws the playfield and full-screen overlays into a terminal grid.

pub mod terminal;

pub use terminal::TerminalRenderer;
