//! Shape catalog: the 7 tetromino kinds, each with 4 rotation masks and a
//! display color.
//!
//! The catalog is authored as string rows (`'0'` marks a filled cell),
//! parsed once on first use, and shared by reference for the life of the
//! process. Parsing is lenient so mask lookups stay total; [`validate`]
//! enforces the strict invariants and runs before any simulation starts.

use std::sync::OnceLock;

use arrayvec::ArrayVec;

use crate::types::{PieceKind, Rgb, Rotation};

/// Authored definition of one kind.
struct ShapeSpec {
    kind: PieceKind,
    size: i8,
    color: Rgb,
    states: [&'static [&'static str]; 4],
}

/// Rotation tables. Index order matches `PieceKind::ALL`. S/Z/J/L/T use a
/// 3x3 bounding box, I/O a 4x4 one.
const SHAPE_TABLE: [ShapeSpec; 7] = [
    ShapeSpec {
        kind: PieceKind::S,
        size: 3,
        color: Rgb::new(0, 244, 0),
        states: [
            &[".00", "00.", "..."],
            &[".0.", ".00", "..0"],
            &["...", ".00", "00."],
            &["0..", "00.", ".0."],
        ],
    },
    ShapeSpec {
        kind: PieceKind::Z,
        size: 3,
        color: Rgb::new(255, 0, 0),
        states: [
            &["00.", ".00", "..."],
            &["..0", ".00", ".0."],
            &["...", "00.", ".00"],
            &[".0.", "00.", "0.."],
        ],
    },
    ShapeSpec {
        kind: PieceKind::I,
        size: 4,
        color: Rgb::new(0, 244, 242),
        states: [
            &["....", "0000", "....", "...."],
            &["..0.", "..0.", "..0.", "..0."],
            &["....", "....", "0000", "...."],
            &[".0..", ".0..", ".0..", ".0.."],
        ],
    },
    ShapeSpec {
        kind: PieceKind::O,
        size: 4,
        color: Rgb::new(240, 240, 0),
        states: [
            &[".00.", ".00.", "....", "...."],
            &[".00.", ".00.", "....", "...."],
            &[".00.", ".00.", "....", "...."],
            &[".00.", ".00.", "....", "...."],
        ],
    },
    ShapeSpec {
        kind: PieceKind::J,
        size: 3,
        color: Rgb::new(0, 0, 250),
        states: [
            &["0..", "000", "..."],
            &[".00", ".0.", ".0."],
            &["...", "000", "..0"],
            &[".0.", ".0.", "00."],
        ],
    },
    ShapeSpec {
        kind: PieceKind::L,
        size: 3,
        color: Rgb::new(254, 155, 0),
        states: [
            &["..0", "000", "..."],
            &[".0.", ".0.", ".00"],
            &["...", "000", "0.."],
            &["00.", ".0.", ".0."],
        ],
    },
    ShapeSpec {
        kind: PieceKind::T,
        size: 3,
        color: Rgb::new(175, 0, 249),
        states: [
            &[".0.", "000", "..."],
            &[".0.", ".00", ".0."],
            &["...", "000", ".0."],
            &[".0.", "00.", ".0."],
        ],
    },
];

/// Occupancy grid for one rotation state. Offsets outside the kind's
/// bounding box are always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationMask {
    size: i8,
    cells: [[bool; 4]; 4],
}

impl RotationMask {
    /// Lenient parse: short rows read as empty cells, extra rows and
    /// columns are ignored. Defects are caught by [`validate`] instead.
    fn from_rows(size: i8, rows: &[&str]) -> Self {
        let mut cells = [[false; 4]; 4];
        for (row, text) in rows.iter().enumerate().take(4) {
            for (col, ch) in text.chars().enumerate().take(4) {
                cells[row][col] = ch == '0';
            }
        }
        Self { size, cells }
    }

    /// Bounding box edge length (3 or 4).
    pub fn size(&self) -> i8 {
        self.size
    }

    /// True when the mask fills (col, row).
    pub fn filled(&self, col: i8, row: i8) -> bool {
        if !(0..4).contains(&col) || !(0..4).contains(&row) {
            return false;
        }
        self.cells[row as usize][col as usize]
    }

    /// Offsets of the filled cells as (col, row), row-major order.
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        for row in 0..4i8 {
            for col in 0..4i8 {
                if self.filled(col, row) {
                    let _ = out.try_push((col, row));
                }
            }
        }
        out
    }
}

/// One kind's catalog entry: four rotation masks and a display color.
#[derive(Debug, Clone, Copy)]
pub struct Shape {
    kind: PieceKind,
    color: Rgb,
    masks: [RotationMask; 4],
}

impl Shape {
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Mask for a rotation state. Total: `Rotation` is already mod 4.
    pub fn mask(&self, rotation: Rotation) -> &RotationMask {
        &self.masks[rotation.index()]
    }
}

struct Catalog {
    shapes: [Shape; 7],
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(|| {
        let build = |spec: &ShapeSpec| Shape {
            kind: spec.kind,
            color: spec.color,
            masks: [
                RotationMask::from_rows(spec.size, spec.states[0]),
                RotationMask::from_rows(spec.size, spec.states[1]),
                RotationMask::from_rows(spec.size, spec.states[2]),
                RotationMask::from_rows(spec.size, spec.states[3]),
            ],
        };
        Catalog {
            shapes: [
                build(&SHAPE_TABLE[0]),
                build(&SHAPE_TABLE[1]),
                build(&SHAPE_TABLE[2]),
                build(&SHAPE_TABLE[3]),
                build(&SHAPE_TABLE[4]),
                build(&SHAPE_TABLE[5]),
                build(&SHAPE_TABLE[6]),
            ],
        }
    })
}

/// Catalog entry for a kind.
pub fn shape(kind: PieceKind) -> &'static Shape {
    &catalog().shapes[kind.code() as usize - 1]
}

/// Occupancy mask for (kind, rotation). Pure and total.
pub fn rotation_mask(kind: PieceKind, rotation: Rotation) -> &'static RotationMask {
    shape(kind).mask(rotation)
}

/// Defects in the authored shape tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    BadRowCount {
        kind: PieceKind,
        state: usize,
        rows: usize,
    },
    BadRowWidth {
        kind: PieceKind,
        state: usize,
        row: usize,
        width: usize,
    },
    BadCellCount {
        kind: PieceKind,
        state: usize,
        cells: usize,
    },
    TableOrderMismatch {
        expected: PieceKind,
        found: PieceKind,
    },
}

impl CatalogError {
    pub fn code(self) -> &'static str {
        match self {
            CatalogError::BadRowCount { .. } => "bad_row_count",
            CatalogError::BadRowWidth { .. } => "bad_row_width",
            CatalogError::BadCellCount { .. } => "bad_cell_count",
            CatalogError::TableOrderMismatch { .. } => "table_order_mismatch",
        }
    }

    pub fn message(self) -> String {
        match self {
            CatalogError::BadRowCount { kind, state, rows } => format!(
                "{} state {}: expected {} rows, found {}",
                kind.as_str(),
                state,
                shape_size(kind),
                rows
            ),
            CatalogError::BadRowWidth {
                kind,
                state,
                row,
                width,
            } => format!(
                "{} state {} row {}: expected width {}, found {}",
                kind.as_str(),
                state,
                row,
                shape_size(kind),
                width
            ),
            CatalogError::BadCellCount { kind, state, cells } => format!(
                "{} state {}: expected 4 filled cells, found {}",
                kind.as_str(),
                state,
                cells
            ),
            CatalogError::TableOrderMismatch { expected, found } => format!(
                "table order mismatch: expected {}, found {}",
                expected.as_str(),
                found.as_str()
            ),
        }
    }
}

fn shape_size(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::I | PieceKind::O => 4,
        _ => 3,
    }
}

/// Strict check of the authored tables: table order matches
/// `PieceKind::ALL`, every state has `size` rows of `size` characters,
/// and every state fills exactly 4 cells. Runs fatally at startup; the
/// simulation never begins on a defective catalog.
pub fn validate() -> Result<(), CatalogError> {
    validate_table(&SHAPE_TABLE)
}

fn validate_table(table: &[ShapeSpec]) -> Result<(), CatalogError> {
    for (i, spec) in table.iter().enumerate() {
        if let Some(&expected) = PieceKind::ALL.get(i) {
            if spec.kind != expected {
                return Err(CatalogError::TableOrderMismatch {
                    expected,
                    found: spec.kind,
                });
            }
        }
        let size = spec.size as usize;
        for (state, rows) in spec.states.iter().enumerate() {
            if rows.len() != size {
                return Err(CatalogError::BadRowCount {
                    kind: spec.kind,
                    state,
                    rows: rows.len(),
                });
            }
            let mut cells = 0;
            for (row, text) in rows.iter().enumerate() {
                let width = text.chars().count();
                if width != size {
                    return Err(CatalogError::BadRowWidth {
                        kind: spec.kind,
                        state,
                        row,
                        width,
                    });
                }
                cells += text.chars().filter(|&ch| ch == '0').count();
            }
            if cells != 4 {
                return Err(CatalogError::BadCellCount {
                    kind: spec.kind,
                    state,
                    cells,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authored_tables_validate() {
        assert_eq!(validate(), Ok(()));
    }

    #[test]
    fn test_every_mask_fills_exactly_four_cells() {
        for kind in PieceKind::ALL {
            for index in 0..4 {
                let mask = rotation_mask(kind, Rotation::new(index));
                assert_eq!(mask.cells().len(), 4, "{:?} state {}", kind, index);
            }
        }
    }

    #[test]
    fn test_t_spawn_mask_matches_table() {
        let mask = rotation_mask(PieceKind::T, Rotation::SPAWN);
        assert_eq!(mask.size(), 3);
        assert!(mask.filled(1, 0));
        assert!(mask.filled(0, 1));
        assert!(mask.filled(1, 1));
        assert!(mask.filled(2, 1));
        assert!(!mask.filled(0, 0));
        let cells: Vec<_> = mask.cells().into_iter().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_i_mask_is_horizontal_then_vertical() {
        let flat = rotation_mask(PieceKind::I, Rotation::SPAWN);
        for col in 0..4 {
            assert!(flat.filled(col, 1));
        }
        let tall = rotation_mask(PieceKind::I, Rotation::new(1));
        for row in 0..4 {
            assert!(tall.filled(2, row));
        }
    }

    #[test]
    fn test_o_mask_is_rotation_invariant() {
        let spawn = rotation_mask(PieceKind::O, Rotation::SPAWN);
        for index in 1..4 {
            assert_eq!(rotation_mask(PieceKind::O, Rotation::new(index)), spawn);
        }
    }

    #[test]
    fn test_mask_offsets_outside_grid_are_empty() {
        let mask = rotation_mask(PieceKind::T, Rotation::SPAWN);
        assert!(!mask.filled(-1, 0));
        assert!(!mask.filled(0, -1));
        assert!(!mask.filled(4, 1));
        assert!(!mask.filled(1, 4));
    }

    #[test]
    fn test_colors_come_from_the_catalog() {
        assert_eq!(shape(PieceKind::S).color(), Rgb::new(0, 244, 0));
        assert_eq!(shape(PieceKind::I).color(), Rgb::new(0, 244, 242));
        assert_eq!(shape(PieceKind::T).color(), Rgb::new(175, 0, 249));
    }

    #[test]
    fn test_shape_lookup_matches_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(shape(kind).kind(), kind);
        }
    }

    #[test]
    fn test_validator_rejects_short_row() {
        // The kind of defect validation exists for: a row missing a column.
        let bad = [ShapeSpec {
            kind: PieceKind::S,
            size: 3,
            color: Rgb::new(0, 244, 0),
            states: [
                &[".00", "00.", "..."],
                &[".0", ".00", "..0"],
                &["...", ".00", "00."],
                &["0..", "00.", ".0."],
            ],
        }];
        assert_eq!(
            validate_table(&bad),
            Err(CatalogError::BadRowWidth {
                kind: PieceKind::S,
                state: 1,
                row: 0,
                width: 2,
            })
        );
    }

    #[test]
    fn test_validator_rejects_wrong_cell_count() {
        let bad = [ShapeSpec {
            kind: PieceKind::S,
            size: 3,
            color: Rgb::new(0, 244, 0),
            states: [
                &[".00", "00.", "..."],
                &[".0.", ".00", "..0"],
                &["...", ".00", "000"],
                &["0..", "00.", ".0."],
            ],
        }];
        assert_eq!(
            validate_table(&bad),
            Err(CatalogError::BadCellCount {
                kind: PieceKind::S,
                state: 2,
                cells: 5,
            })
        );
    }

    #[test]
    fn test_error_messages_name_the_defect() {
        let err = CatalogError::BadCellCount {
            kind: PieceKind::L,
            state: 1,
            cells: 3,
        };
        assert_eq!(err.code(), "bad_cell_count");
        assert!(err.message().contains("L state 1"));
    }
}
