use std::fmt;

use crate::behaviour::Behaviour;
use crate::direction::Direction;
use crate::error::StateError;

/// Opaque label of one car, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElevatorId(String);

impl ElevatorId {
    pub fn new(label: impl Into<String>) -> Self {
        ElevatorId(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElevatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElevatorId {
    fn from(label: &str) -> Self {
        ElevatorId::new(label)
    }
}

/// Motion state of one car at the moment the snapshot was taken.
///
/// Cab requests are read-only: the assignor never adds or clears them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevatorState {
    behaviour: Behaviour,
    floor: u8,
    direction: Direction,
    cab_requests: Vec<bool>,
}

impl ElevatorState {
    pub fn new(
        id: &ElevatorId,
        behaviour: Behaviour,
        floor: u8,
        direction: Direction,
        cab_requests: Vec<bool>,
        num_floors: u8,
    ) -> Result<Self, StateError> {
        if floor >= num_floors {
            return Err(StateError::FloorOutOfRange {
                id: id.clone(),
                floor,
                num_floors,
            });
        }
        if cab_requests.len() != num_floors as usize {
            return Err(StateError::CabRequestsLength {
                id: id.clone(),
                len: cab_requests.len(),
                num_floors,
            });
        }

        let contradictory = match behaviour {
            Behaviour::Idle => direction != Direction::Stop,
            Behaviour::Moving => direction == Direction::Stop,
            Behaviour::DoorOpen => false,
        };
        if contradictory {
            return Err(StateError::Contradictory {
                id: id.clone(),
                behaviour: behaviour.to_string(),
                direction: direction.to_string(),
            });
        }

        let leaves_building = behaviour == Behaviour::Moving
            && match direction {
                Direction::Up => floor + 1 == num_floors,
                Direction::Down => floor == 0,
                Direction::Stop => false,
            };
        if leaves_building {
            return Err(StateError::MovingOutOfBuilding {
                id: id.clone(),
                floor,
                direction: direction.to_string(),
            });
        }

        Ok(ElevatorState {
            behaviour,
            floor,
            direction,
            cab_requests,
        })
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn cab_requests(&self) -> &[bool] {
        &self.cab_requests
    }
}
