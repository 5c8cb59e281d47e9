//! Terminal rendering layer.
//!
//! Frames are composed into a plain character framebuffer and flushed to the
//! terminal with diffed updates, which keeps `core` free of any I/O and gives
//! precise control over cell aspect ratio (e.g. 2 columns per board cell).

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
