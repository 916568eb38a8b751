use std::collections::BTreeMap;

use crate::elevator_state::{ElevatorId, ElevatorState};
use crate::error::StateError;
use crate::hall_call::HallCalls;

/// Everything one assignment run looks at. Built fresh per request and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    num_floors: u8,
    hall_calls: HallCalls,
    elevators: BTreeMap<ElevatorId, ElevatorState>,
}

impl Snapshot {
    pub fn new(
        num_floors: u8,
        hall_calls: HallCalls,
        elevators: BTreeMap<ElevatorId, ElevatorState>,
    ) -> Result<Self, StateError> {
        if num_floors == 0 {
            return Err(StateError::NoFloors);
        }
        if let Some(call) = hall_calls.iter().find(|call| call.floor >= num_floors) {
            return Err(StateError::Malformed(format!(
                "hall call {} is outside the building (0..{})",
                call, num_floors
            )));
        }
        Ok(Snapshot {
            num_floors,
            hall_calls,
            elevators,
        })
    }

    /// Checks a floor count coming from the wire before it is narrowed.
    pub fn floor_count(len: usize) -> Result<u8, StateError> {
        match len {
            0 => Err(StateError::NoFloors),
            n => u8::try_from(n).map_err(|_| StateError::TooManyFloors(n)),
        }
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    pub fn hall_calls(&self) -> &HallCalls {
        &self.hall_calls
    }

    pub fn elevators(&self) -> &BTreeMap<ElevatorId, ElevatorState> {
        &self.elevators
    }
}
