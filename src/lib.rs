//! Hall request assigner.
//!
//! Given a snapshot of every elevator car and the pending hall calls, decides
//! which car serves each call. Each candidate pairing is costed by simulating
//! the car's route, the best combination is searched for, and the result is
//! emitted as one `[up, down]` row per floor for every car.

pub mod assigner;
pub mod cost_matrix;
pub mod debug;
pub mod plan;
pub mod request;
pub mod search;
pub mod simulator;

#[cfg(test)]
mod test_utils;

pub use assigner::{HallRequestAssigner, Outcome};
pub use cost_matrix::CostMatrix;
pub use plan::Plan;
pub use request::{output_to_json, HRAElevState, HRAInput, HRAOutput};
pub use search::{search, AssignedCall, Assignment, Objective, Strategy};
pub use simulator::Simulator;
