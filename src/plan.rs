/// ----- PLAN EMITTER -----
/// Turns the chosen assignment into the per-car answer: for every car in the
/// request, the hall calls it must now serve, ordered by floor.

use std::collections::{BTreeMap, BTreeSet};

use shared_resources::{Call, ElevatorId, HallCall, Snapshot};

use crate::request::HRAOutput;
use crate::search::Assignment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    num_floors: u8,
    hall_calls: BTreeMap<ElevatorId, BTreeSet<HallCall>>,
    cab_requests: BTreeMap<ElevatorId, Vec<bool>>,
}

impl Plan {
    pub fn new(snapshot: &Snapshot, assignment: &Assignment) -> Self {
        let mut hall_calls: BTreeMap<ElevatorId, BTreeSet<HallCall>> = snapshot
            .elevators()
            .keys()
            .map(|id| (id.clone(), BTreeSet::new()))
            .collect();
        for assigned in assignment.iter() {
            hall_calls
                .entry(assigned.elevator.clone())
                .or_default()
                .insert(assigned.call);
        }

        let cab_requests = snapshot
            .elevators()
            .iter()
            .map(|(id, state)| (id.clone(), state.cab_requests().to_vec()))
            .collect();

        Plan {
            num_floors: snapshot.num_floors(),
            hall_calls,
            cab_requests,
        }
    }

    pub fn elevators(&self) -> impl Iterator<Item = &ElevatorId> {
        self.hall_calls.keys()
    }

    pub fn calls_for(&self, id: &ElevatorId) -> impl Iterator<Item = HallCall> + '_ {
        self.hall_calls.get(id).into_iter().flatten().copied()
    }

    /// One row per floor, `[up, down]`, with the car's own cab requests as a
    /// third column when `include_cab` is set.
    pub fn to_output(&self, include_cab: bool) -> HRAOutput {
        let width = usize::from(if include_cab {
            Call::num_calls()
        } else {
            Call::num_hall_calls()
        });

        let mut output = HRAOutput::new();
        for (id, calls) in &self.hall_calls {
            let mut rows = vec![vec![false; width]; self.num_floors as usize];
            for call in calls {
                rows[call.floor as usize][call.call.index()] = true;
            }
            if include_cab {
                if let Some(cabs) = self.cab_requests.get(id) {
                    for (row, &cab) in rows.iter_mut().zip(cabs) {
                        row[Call::Cab.index()] = cab;
                    }
                }
            }
            output.insert(id.as_str().to_owned(), rows);
        }
        output
    }
}
