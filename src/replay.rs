//! Deterministic replay: rerun a seed plus a timestamped intent log and
//! collect the lock records the live session produced.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Game, LockRecord};
use crate::types::Intent;

/// One logged input, stamped with elapsed game time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedIntent {
    pub at_ms: u32,
    pub intent: Intent,
}

/// A recorded session: everything needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayLog {
    pub seed: u32,
    pub tick_ms: u32,
    pub total_ms: u32,
    pub intents: Vec<LoggedIntent>,
}

/// Load a replay log from a JSON file.
pub fn load_log(path: &Path) -> Result<ReplayLog> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("replay: read {} failed: {}", path.display(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| anyhow!("replay: parse {} failed: {}", path.display(), e))
}

/// Rerun a recorded session.
pub fn run_log(log: &ReplayLog) -> Vec<LockRecord> {
    run(log.seed, &log.intents, log.tick_ms, log.total_ms)
}

/// Drive a fresh game with the given intent schedule. Intents stamped
/// inside a frame are applied before that frame's tick, the same order
/// the live loop sees them. Intents must be sorted by timestamp.
pub fn run(seed: u32, intents: &[LoggedIntent], tick_ms: u32, total_ms: u32) -> Vec<LockRecord> {
    let mut records = Vec::new();
    if tick_ms == 0 {
        return records;
    }

    let mut game = Game::new(seed);
    let mut pending = intents.iter().copied().peekable();
    let mut now = 0u32;

    while now < total_ms && !game.is_over() {
        let frame_end = now + tick_ms;
        while let Some(event) = pending.next_if(|event| event.at_ms < frame_end) {
            game.apply(event.intent);
        }
        game.tick(tick_ms);
        if let Some(record) = game.take_lock_record() {
            records.push(record);
        }
        now = frame_end;
    }

    records
}
