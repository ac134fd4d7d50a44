//! Transcript module - the append-only conversation record.

mod turn;

pub use turn::{Turn, TurnRole};
