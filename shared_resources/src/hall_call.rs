use std::collections::BTreeSet;
use std::fmt;

use crate::call::Call;

/// A pressed hall button. Ordered by floor, then up before down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HallCall {
    pub floor: u8,
    pub call: Call,
}

impl HallCall {
    pub fn new(floor: u8, call: Call) -> Self {
        debug_assert!(call.is_hall());
        HallCall { floor, call }
    }

    pub fn up(floor: u8) -> Self {
        HallCall::new(floor, Call::HallUp)
    }

    pub fn down(floor: u8) -> Self {
        HallCall::new(floor, Call::HallDown)
    }
}

impl fmt::Display for HallCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.call, self.floor)
    }
}

/// Set of pending hall calls. Presence is boolean per (floor, direction).
pub type HallCalls = BTreeSet<HallCall>;

/// Collects the pressed buttons of a per-floor `[up, down]` table.
pub fn hall_calls_from_rows(rows: &[[bool; 2]]) -> HallCalls {
    let mut calls = HallCalls::new();
    for (floor, row) in rows.iter().enumerate() {
        for call in Call::iter_hall() {
            if row[call.index()] {
                calls.insert(HallCall::new(floor as u8, call));
            }
        }
    }
    calls
}
