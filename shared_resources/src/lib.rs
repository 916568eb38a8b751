//! State model shared by every stage of the hall request assigner: calls,
//! car states, the request snapshot, cost values, errors and configuration.

pub mod behaviour;
pub mod call;
pub mod config;
pub mod cost;
pub mod direction;
pub mod elevator_state;
pub mod error;
pub mod hall_call;
pub mod snapshot;

pub use behaviour::Behaviour;
pub use call::Call;
pub use cost::Cost;
pub use direction::Direction;
pub use elevator_state::{ElevatorId, ElevatorState};
pub use error::{AssignerError, ConfigError, StateError};
pub use hall_call::{HallCall, HallCalls};
pub use snapshot::Snapshot;
