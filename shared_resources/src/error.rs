use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::call::Call;
use crate::elevator_state::ElevatorId;

/// Why a request snapshot was rejected before any assignment was attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("malformed request document: {0}")]
    Malformed(String),

    #[error("building has no floors")]
    NoFloors,

    #[error("building has {0} floors, at most 255 are supported")]
    TooManyFloors(usize),

    #[error("elevator {id}: floor {floor} is outside the building (0..{num_floors})")]
    FloorOutOfRange { id: ElevatorId, floor: u8, num_floors: u8 },

    #[error("elevator {id}: cab requests cover {len} floors, building has {num_floors}")]
    CabRequestsLength { id: ElevatorId, len: usize, num_floors: u8 },

    #[error("elevator {id}: unknown behaviour \"{value}\"")]
    UnknownBehaviour { id: ElevatorId, value: String },

    #[error("elevator {id}: unknown direction \"{value}\"")]
    UnknownDirection { id: ElevatorId, value: String },

    #[error("elevator {id}: behaviour {behaviour} contradicts direction {direction}")]
    Contradictory {
        id: ElevatorId,
        behaviour: String,
        direction: String,
    },

    #[error("elevator {id}: moving {direction} from floor {floor} leaves the building")]
    MovingOutOfBuilding {
        id: ElevatorId,
        floor: u8,
        direction: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssignerError {
    #[error("invalid state: {0}")]
    InvalidState(#[from] StateError),

    #[error("no elevator can serve the {call} call at floor {floor}")]
    NoFeasibleAssignment { floor: u8, call: Call },

    #[error("search budget of {budget:?} ran out after {explored} combinations without a complete assignment")]
    SearchTimedOut { budget: Duration, explored: u64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
