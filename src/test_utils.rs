use std::collections::BTreeMap;

use shared_resources::{Behaviour, Direction, ElevatorId, ElevatorState, HallCall, HallCalls, Snapshot};

pub struct Car<'a> {
    pub id: &'a str,
    pub behaviour: Behaviour,
    pub floor: u8,
    pub direction: Direction,
    pub cabs: &'a [u8],
}

pub fn idle(id: &str, floor: u8) -> Car<'_> {
    Car {
        id,
        behaviour: Behaviour::Idle,
        floor,
        direction: Direction::Stop,
        cabs: &[],
    }
}

pub fn snapshot(num_floors: u8, cars: &[Car<'_>], calls: &[HallCall]) -> Snapshot {
    let mut elevators = BTreeMap::new();
    for car in cars {
        let id = ElevatorId::new(car.id);
        let mut cab_requests = vec![false; num_floors as usize];
        for &cab in car.cabs {
            cab_requests[cab as usize] = true;
        }
        let state = ElevatorState::new(&id, car.behaviour, car.floor, car.direction, cab_requests, num_floors)
            .expect("test car state is valid");
        elevators.insert(id, state);
    }
    let hall_calls: HallCalls = calls.iter().copied().collect();
    Snapshot::new(num_floors, hall_calls, elevators).expect("test snapshot is valid")
}

/// Cars "one" and "two" with the hall calls of the classic assigner example.
pub fn reference() -> Snapshot {
    snapshot(
        4,
        &[
            Car {
                id: "one",
                behaviour: Behaviour::Moving,
                floor: 2,
                direction: Direction::Up,
                cabs: &[3],
            },
            idle("two", 0),
        ],
        &[HallCall::up(1), HallCall::down(3)],
    )
}
