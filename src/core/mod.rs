//! Core module - pure game rules with no I/O dependencies
//!
//! Everything the simulation needs lives here: the board grid, the shape
//! catalog, the piece bag, the active piece, the phase machine, and the
//! lock snapshot format. Nothing in this module touches the terminal or
//! the filesystem.

pub mod bag;
pub mod board;
pub mod game;
pub mod piece;
pub mod shapes;
pub mod snapshot;

// Re-export commonly used types
pub use bag::PieceBag;
pub use board::Board;
pub use game::Game;
pub use piece::ActivePiece;
pub use snapshot::LockRecord;
