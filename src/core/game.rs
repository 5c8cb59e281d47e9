//! Game module - the simulation advanced by fixed ticks
//!
//! Ties the core pieces together: board, bag, active piece, scoring, and
//! the phase machine (Spawning -> Falling -> Locking -> LineClear, with
//! GameOver as the terminal phase). The caller owns the clock and feeds
//! elapsed milliseconds in; nothing here performs I/O.

use crate::core::bag::PieceBag;
use crate::core::board::Board;
use crate::core::piece::ActivePiece;
use crate::core::snapshot::LockRecord;
use crate::types::*;

/// Score awarded when a lock clears rows.
fn score_delta(rows_cleared: usize) -> u32 {
    rows_cleared as u32 * SCORE_PER_ROW
}

/// Kick offsets tried in order when an in-place rotation collides.
/// Empty for now: rotations stand where they are or revert.
fn rotation_kicks(_kind: PieceKind, _from: Rotation, _to: Rotation) -> &'static [(i8, i8)] {
    &[]
}

/// Complete simulation state for one run.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<ActivePiece>,
    /// Preview of the piece that spawns next.
    next: PieceKind,
    phase: Phase,
    score: u32,
    /// Locks completed so far.
    turn: u32,
    bag: PieceBag,
    /// Current gravity interval. Drops to zero while a hard drop is in
    /// flight and returns to the base interval at the next lock.
    fall_interval_ms: u32,
    fall_timer_ms: u32,
    lock_timer_ms: u32,
    /// Set during a lock when a cell came to rest above the threshold row;
    /// consumed when the line-clear pause ends.
    over_after_clear: bool,
    pending_record: Option<LockRecord>,
}

impl Game {
    /// Create a new game with the given bag seed. The first piece enters
    /// on the first tick.
    pub fn new(seed: u32) -> Self {
        let mut bag = PieceBag::new(seed);
        let next = bag.draw();
        Self {
            board: Board::new(),
            active: None,
            next,
            phase: Phase::Spawning,
            score: 0,
            turn: 0,
            bag,
            fall_interval_ms: BASE_FALL_MS,
            fall_timer_ms: 0,
            lock_timer_ms: 0,
            over_after_clear: false,
            pending_record: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Take the snapshot staged by the most recent lock, if any.
    pub fn take_lock_record(&mut self) -> Option<LockRecord> {
        self.pending_record.take()
    }

    /// Advance the simulation by one tick of `elapsed_ms` milliseconds.
    pub fn tick(&mut self, elapsed_ms: u32) {
        match self.phase {
            Phase::GameOver => {}
            Phase::LineClear => {
                // The cleared board stays on screen for one tick before
                // the next piece enters or the run ends.
                self.phase = if self.over_after_clear {
                    Phase::GameOver
                } else {
                    Phase::Spawning
                };
            }
            Phase::Spawning => self.spawn_piece(),
            // A lock interrupted mid-sequence resumes before anything else.
            Phase::Locking => self.lock_active(),
            Phase::Falling => self.advance_falling(elapsed_ms),
        }
    }

    /// Apply a player intent. Only a falling piece responds; input in any
    /// other phase is rejected.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        match intent {
            Intent::MoveLeft => self.try_shift(-1, 0),
            Intent::MoveRight => self.try_shift(1, 0),
            Intent::SoftDrop => {
                let moved = self.try_shift(0, 1);
                if moved {
                    // A manual descent restarts both clocks.
                    self.fall_timer_ms = 0;
                    self.lock_timer_ms = 0;
                }
                moved
            }
            Intent::RotateCw => self.try_rotate(Rotation::cw),
            Intent::RotateCcw => self.try_rotate(Rotation::ccw),
            Intent::Rotate180 => self.try_rotate(Rotation::half),
            Intent::HardDrop => {
                // Gravity runs every tick from here; the lock sequence
                // restores the base interval for the next piece.
                self.fall_interval_ms = HARD_DROP_FALL_MS;
                true
            }
        }
    }

    /// Pull the previewed piece onto the board and stage the next preview.
    fn spawn_piece(&mut self) {
        let piece = ActivePiece::spawn(self.next);
        self.next = self.bag.draw();
        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;
        if self.board.any_locked_above(GAME_OVER_ROW) || !piece.fits(&self.board) {
            self.phase = Phase::GameOver;
            return;
        }
        self.active = Some(piece);
        self.phase = Phase::Falling;
    }

    /// Gravity and lock-delay bookkeeping for one tick.
    fn advance_falling(&mut self, elapsed_ms: u32) {
        if self.can_descend() {
            self.fall_timer_ms += elapsed_ms;
            if self.fall_timer_ms > self.fall_interval_ms {
                self.fall_timer_ms = 0;
                if self.try_shift(0, 1) {
                    self.lock_timer_ms = 0;
                }
            }
        } else {
            self.lock_timer_ms += elapsed_ms;
            if self.lock_timer_ms > LOCK_DELAY_MS {
                self.phase = Phase::Locking;
                self.lock_active();
            }
        }
    }

    /// True when the active piece has room directly below.
    fn can_descend(&self) -> bool {
        let Some(mut probe) = self.active else {
            return false;
        };
        probe.y += 1;
        probe.fits(&self.board)
    }

    /// Move the active piece by (dx, dy) if the target placement is free.
    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(mut piece) = self.active else {
            return false;
        };
        piece.x += dx;
        piece.y += dy;
        if piece.fits(&self.board) {
            self.active = Some(piece);
            return true;
        }
        false
    }

    /// Step the rotation state, trying the in-place placement first and
    /// then any kick offsets. Leaves the piece untouched on failure.
    fn try_rotate(&mut self, step: fn(Rotation) -> Rotation) -> bool {
        let Some(piece) = self.active else {
            return false;
        };
        let candidate = ActivePiece {
            rotation: step(piece.rotation),
            ..piece
        };
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            return true;
        }
        for &(dx, dy) in rotation_kicks(piece.kind, piece.rotation, candidate.rotation) {
            let kicked = ActivePiece {
                x: candidate.x + dx,
                y: candidate.y + dy,
                ..candidate
            };
            if kicked.fits(&self.board) {
                self.active = Some(kicked);
                return true;
            }
        }
        false
    }

    /// Bake the active piece and resolve the lock: evaluate the game-over
    /// threshold against the resting cells, clear full rows, score, and
    /// stage the snapshot.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            self.phase = Phase::Spawning;
            return;
        };
        let cells = piece.cells();
        self.board.lock(&cells, piece.kind);
        // Threshold check comes before the clear: a piece resting above
        // the top row ends the run even if its own row clears.
        self.over_after_clear = cells.iter().any(|&(_, y)| y < GAME_OVER_ROW);
        let cleared = self.board.clear_full_rows();
        self.score += score_delta(cleared.len());
        self.turn += 1;
        self.fall_interval_ms = BASE_FALL_MS;
        self.fall_timer_ms = 0;
        self.lock_timer_ms = 0;
        self.pending_record = Some(LockRecord::capture(&self.board, self.score, self.turn));
        self.phase = Phase::LineClear;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
