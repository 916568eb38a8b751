/// ----- REQUEST DOCUMENT -----
/// The JSON document shape shared with every caller of the assigner. Field
/// names and the array-of-pairs-per-floor encoding are fixed; everything past
/// this module works on the typed snapshot instead of raw boolean arrays.

use std::collections::{BTreeMap, HashMap};

use shared_resources::hall_call::hall_calls_from_rows;
use shared_resources::{
    AssignerError, Behaviour, Direction, ElevatorId, ElevatorState, Snapshot, StateError,
};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HRAElevState {
    pub behaviour: String,
    pub floor: u8,
    pub direction: String,
    pub cab_requests: Vec<bool>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HRAInput {
    pub hall_requests: Vec<[bool; 2]>,
    pub states: HashMap<String, HRAElevState>,
}

/// Per car label, one row per floor: `[up, down]`, or `[up, down, cab]` when
/// cab requests are echoed back.
pub type HRAOutput = BTreeMap<String, Vec<Vec<bool>>>;

impl HRAInput {
    pub fn from_json(json: &str) -> Result<Self, AssignerError> {
        serde_json::from_str(json).map_err(|e| StateError::Malformed(e.to_string()).into())
    }

    /// Parses the free-form strings into the closed state model and checks
    /// every car against the building size.
    pub fn to_snapshot(&self) -> Result<Snapshot, AssignerError> {
        let num_floors = Snapshot::floor_count(self.hall_requests.len())?;

        let mut elevators = BTreeMap::new();
        for (label, state) in &self.states {
            let id = ElevatorId::new(label.as_str());
            let behaviour = state
                .behaviour
                .parse::<Behaviour>()
                .map_err(|value| StateError::UnknownBehaviour { id: id.clone(), value })?;
            let direction = state
                .direction
                .parse::<Direction>()
                .map_err(|value| StateError::UnknownDirection { id: id.clone(), value })?;
            let elevator = ElevatorState::new(
                &id,
                behaviour,
                state.floor,
                direction,
                state.cab_requests.clone(),
                num_floors,
            )?;
            elevators.insert(id, elevator);
        }

        let hall_calls = hall_calls_from_rows(&self.hall_requests);
        Ok(Snapshot::new(num_floors, hall_calls, elevators)?)
    }
}

pub fn output_to_json(output: &HRAOutput) -> Result<String, serde_json::Error> {
    serde_json::to_string(output)
}
