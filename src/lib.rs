//! Falling-block puzzle engine with a terminal front end.
//!
//! The simulation lives in [`core`] and is fully deterministic: a seed plus a
//! timestamped intent script reproduce a run exactly, which [`replay`] and
//! [`record`] build on. Terminal concerns stay in [`term`] and [`input`].

pub mod core;
pub mod input;
pub mod record;
pub mod replay;
pub mod term;
pub mod types;
