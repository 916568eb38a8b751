/// ----- TRAJECTORY SIMULATOR -----
/// Steps one car floor by floor through the stops it is committed to, plus a
/// candidate hall call, and reports how long it takes until the doors have
/// cycled at the candidate's floor. A car may turn around at most once before
/// it serves the candidate; beyond that the candidate is infeasible for it.

use std::time::Duration;

use shared_resources::config::{ClearRequestVariant, SimulationConfig};
use shared_resources::{Behaviour, Call, Cost, Direction, ElevatorState, HallCall};

const MAX_REVERSALS: u8 = 1;

#[derive(Debug, Clone)]
struct Requests {
    requests: Vec<[bool; 3]>,
    num_floors: u8,
}

impl Requests {
    fn new(num_floors: u8) -> Self {
        Requests {
            requests: vec![[false; 3]; num_floors as usize],
            num_floors,
        }
    }

    fn add(&mut self, floor: u8, call: Call) {
        if let Some(row) = self.requests.get_mut(floor as usize) {
            row[call.index()] = true;
        }
    }

    fn at(&self, floor: u8, call: Call) -> bool {
        self.requests[floor as usize][call.index()]
    }

    fn here(&self, floor: u8) -> bool {
        self.requests[floor as usize].iter().any(|&request| request)
    }

    fn above(&self, floor: u8) -> bool {
        ((floor + 1)..self.num_floors).any(|f| self.here(f))
    }

    fn below(&self, floor: u8) -> bool {
        (0..floor).any(|f| self.here(f))
    }

    fn should_stop(&self, floor: u8, direction: Direction) -> bool {
        match direction {
            Direction::Down => self.at(floor, Call::HallDown) || self.at(floor, Call::Cab) || !self.below(floor),
            Direction::Up => self.at(floor, Call::HallUp) || self.at(floor, Call::Cab) || !self.above(floor),
            Direction::Stop => true,
        }
    }

    /// Keeps going while there is work ahead, otherwise turns if there is
    /// work behind. A stopped car stays if there is work at its own floor.
    fn choose_direction(&self, floor: u8, direction: Direction) -> Direction {
        match direction {
            Direction::Up if self.above(floor) => Direction::Up,
            Direction::Up if self.below(floor) => Direction::Down,
            Direction::Down if self.below(floor) => Direction::Down,
            Direction::Down if self.above(floor) => Direction::Up,
            Direction::Stop if self.here(floor) => Direction::Stop,
            Direction::Stop if self.below(floor) => Direction::Down,
            Direction::Stop if self.above(floor) => Direction::Up,
            _ => Direction::Stop,
        }
    }

    /// Returns which requests at the floor were cleared by the stop.
    fn clear_at_floor(&mut self, floor: u8, direction: Direction, variant: ClearRequestVariant) -> [bool; 3] {
        let before = self.requests[floor as usize];
        match variant {
            ClearRequestVariant::All => {
                self.requests[floor as usize] = [false; 3];
            }
            ClearRequestVariant::InDirn => {
                self.requests[floor as usize][Call::Cab.index()] = false;
                match direction {
                    Direction::Up => {
                        self.requests[floor as usize][Call::HallUp.index()] = false;
                        if !self.above(floor) {
                            self.requests[floor as usize][Call::HallDown.index()] = false;
                        }
                    }
                    Direction::Down => {
                        self.requests[floor as usize][Call::HallDown.index()] = false;
                        if !self.below(floor) {
                            self.requests[floor as usize][Call::HallUp.index()] = false;
                        }
                    }
                    Direction::Stop => {
                        self.requests[floor as usize][Call::HallUp.index()] = false;
                        self.requests[floor as usize][Call::HallDown.index()] = false;
                    }
                }
            }
        }
        let after = self.requests[floor as usize];
        [before[0] && !after[0], before[1] && !after[1], before[2] && !after[2]]
    }
}

#[derive(Debug)]
struct Trajectory {
    floor: u8,
    direction: Direction,
    requests: Requests,
    elapsed: Duration,
    reversals: u8,
}

impl Trajectory {
    fn advance(&mut self) -> Option<()> {
        self.floor = match self.direction {
            Direction::Up => Some(self.floor + 1).filter(|&floor| floor < self.requests.num_floors)?,
            Direction::Down => self.floor.checked_sub(1)?,
            Direction::Stop => return None,
        };
        Some(())
    }
}

enum StopOutcome {
    Served,
    Continue,
    Infeasible,
}

pub struct Simulator<'a> {
    config: &'a SimulationConfig,
    num_floors: u8,
}

impl<'a> Simulator<'a> {
    pub fn new(config: &'a SimulationConfig, num_floors: u8) -> Self {
        Simulator { config, num_floors }
    }

    /// Time for `state` to serve `candidate` given the hall calls already
    /// assigned to it in this run, or `None` if the car cannot serve it
    /// without turning around more than once.
    pub fn time_to_serve(&self, state: &ElevatorState, assigned: &[HallCall], candidate: HallCall) -> Option<Cost> {
        let mut requests = Requests::new(self.num_floors);
        for (floor, &cab) in state.cab_requests().iter().enumerate() {
            if cab {
                requests.add(floor as u8, Call::Cab);
            }
        }
        for call in assigned {
            requests.add(call.floor, call.call);
        }
        requests.add(candidate.floor, candidate.call);

        let mut trajectory = Trajectory {
            floor: state.floor(),
            direction: state.direction(),
            requests,
            elapsed: Duration::ZERO,
            reversals: 0,
        };

        match state.behaviour() {
            Behaviour::Idle => {
                trajectory.direction = trajectory.requests.choose_direction(trajectory.floor, Direction::Stop);
            }
            Behaviour::Moving => {
                trajectory.elapsed += self.config.travel_duration / 2;
                trajectory.advance()?;
            }
            Behaviour::DoorOpen => {
                trajectory.elapsed += self.config.door_open_duration / 2;
                match self.finish_stop(&mut trajectory, candidate) {
                    StopOutcome::Served => return Some(Cost::new(trajectory.elapsed)),
                    StopOutcome::Infeasible => return None,
                    StopOutcome::Continue => {}
                }
                trajectory.advance()?;
                trajectory.elapsed += self.config.travel_duration;
            }
        }

        // Two sweeps of the building cover every trajectory with one reversal.
        let max_steps = 4 * self.num_floors as usize + 4;
        for _ in 0..max_steps {
            if trajectory.requests.should_stop(trajectory.floor, trajectory.direction) {
                trajectory.elapsed += self.config.door_open_duration;
                match self.finish_stop(&mut trajectory, candidate) {
                    StopOutcome::Served => return Some(Cost::new(trajectory.elapsed)),
                    StopOutcome::Infeasible => return None,
                    StopOutcome::Continue => {}
                }
            }
            trajectory.advance()?;
            trajectory.elapsed += self.config.travel_duration;
        }
        None
    }

    fn finish_stop(&self, trajectory: &mut Trajectory, candidate: HallCall) -> StopOutcome {
        let variant = self.config.clear_request_variant;
        let cleared = trajectory
            .requests
            .clear_at_floor(trajectory.floor, trajectory.direction, variant);

        if trajectory.floor == candidate.floor && cleared[candidate.call.index()] {
            // Boarding against the travel direction means turning around here.
            let turned = variant == ClearRequestVariant::InDirn
                && trajectory.direction != Direction::Stop
                && trajectory.direction.to_call() != Some(candidate.call);
            return if trajectory.reversals + turned as u8 <= MAX_REVERSALS {
                StopOutcome::Served
            } else {
                StopOutcome::Infeasible
            };
        }

        let next = trajectory.requests.choose_direction(trajectory.floor, trajectory.direction);
        if next == Direction::Stop {
            return StopOutcome::Infeasible;
        }
        if trajectory.direction != Direction::Stop && next != trajectory.direction {
            trajectory.reversals += 1;
            if trajectory.reversals > MAX_REVERSALS {
                return StopOutcome::Infeasible;
            }
        }
        trajectory.direction = next;
        StopOutcome::Continue
    }
}
