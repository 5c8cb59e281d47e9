//! Shared types and constants for the simulation and its collaborators.
//! Pure data, no I/O.

use serde::{Deserialize, Serialize};

/// Board dimensions (visible field).
pub const BOARD_WIDTH: u8 = 10;
pub const BOARD_HEIGHT: u8 = 20;

/// Game timing constants (in milliseconds).
pub const TICK_MS: u32 = 16;
pub const BASE_FALL_MS: u32 = 270;
pub const HARD_DROP_FALL_MS: u32 = 0;
pub const LOCK_DELAY_MS: u32 = 40;

/// Spawn anchor (top-left of the rotation mask). Pieces spawn straddling
/// the top of the field; mask rows above row 0 sit in the spawn buffer.
pub const SPAWN_X: i8 = 3;
pub const SPAWN_Y: i8 = -1;

/// A cell locked in any row above this one ends the game.
pub const GAME_OVER_ROW: i8 = 1;

/// Score awarded per cleared row.
pub const SCORE_PER_ROW: u32 = 10;

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::I,
        PieceKind::O,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Numeric code used in recorded grids (1..=7; 0 means empty).
    pub fn code(self) -> u8 {
        match self {
            PieceKind::S => 1,
            PieceKind::Z => 2,
            PieceKind::I => 3,
            PieceKind::O => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
            PieceKind::T => 7,
        }
    }

    /// Inverse of [`code`](Self::code).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::S),
            2 => Some(PieceKind::Z),
            3 => Some(PieceKind::I),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::J),
            6 => Some(PieceKind::L),
            7 => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Single-letter label for display.
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::T => "T",
        }
    }
}

/// Rotation state index, always kept in 0..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    /// Spawn orientation.
    pub const SPAWN: Rotation = Rotation(0);

    /// Build from any integer index; taken mod 4.
    pub fn new(index: u8) -> Self {
        Rotation(index % 4)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Clockwise quarter turn (+1 mod 4).
    pub fn cw(self) -> Self {
        Rotation((self.0 + 1) % 4)
    }

    /// Counterclockwise quarter turn (-1 mod 4).
    pub fn ccw(self) -> Self {
        Rotation((self.0 + 3) % 4)
    }

    /// Half turn (+2 mod 4).
    pub fn half(self) -> Self {
        Rotation((self.0 + 2) % 4)
    }
}

/// Discrete player intents consumed by the simulation.
///
/// Raw key codes never cross this boundary; the mapping from physical
/// input lives in the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Rotate180,
    /// Engages maximum gravity until the piece locks.
    HardDrop,
}

/// State-machine phases. `Spawning`, `Locking`, and `LineClear` are
/// transient; `GameOver` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    LineClear,
    GameOver,
}

/// 24-bit RGB color. Display colors live in the shape catalog; the
/// renderer derives cell colors from recorded kinds on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Cell on the board (None = empty, Some = locked piece kind).
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_arithmetic_wraps() {
        let r = Rotation::SPAWN;
        assert_eq!(r.cw().index(), 1);
        assert_eq!(r.cw().cw().cw().cw(), r);
        assert_eq!(r.ccw().index(), 3);
        assert_eq!(r.half().index(), 2);
        assert_eq!(r.half().half(), r);
        assert_eq!(r.cw().ccw(), r);
    }

    #[test]
    fn test_rotation_new_takes_index_mod_4() {
        assert_eq!(Rotation::new(5), Rotation::new(1));
        assert_eq!(Rotation::new(4), Rotation::SPAWN);
        assert_eq!(Rotation::new(255).index(), 3);
    }

    #[test]
    fn test_piece_codes_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(PieceKind::from_code(0), None);
        assert_eq!(PieceKind::from_code(8), None);
    }

    #[test]
    fn test_intent_serializes_snake_case() {
        let json = serde_json::to_string(&Intent::RotateCcw).unwrap();
        assert_eq!(json, "\"rotate_ccw\"");
        let back: Intent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Intent::RotateCcw);
    }
}
