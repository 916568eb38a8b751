/// ----- COST MATRIX -----
/// Cost of every (hall call, car) pair for a snapshot, with no other calls
/// assigned yet. Rows cover every floor and both hall directions; rows of
/// calls that are not pending stay infeasible.

use rayon::prelude::*;
use tracing::instrument;

use shared_resources::config::SimulationConfig;
use shared_resources::{AssignerError, Call, Cost, ElevatorId, HallCall, Snapshot};

use crate::simulator::Simulator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    elevators: Vec<ElevatorId>,
    pending: Vec<HallCall>,
    costs: Vec<Option<Cost>>,
}

impl CostMatrix {
    #[instrument(skip_all, fields(calls = snapshot.hall_calls().len(), elevators = snapshot.elevators().len()))]
    pub fn build(snapshot: &Snapshot, config: &SimulationConfig) -> Result<Self, AssignerError> {
        let simulator = Simulator::new(config, snapshot.num_floors());
        let states: Vec<_> = snapshot.elevators().values().collect();

        let mut cells = Vec::with_capacity(snapshot.num_floors() as usize * 2 * states.len());
        for floor in 0..snapshot.num_floors() {
            for call in Call::iter_hall() {
                for car in 0..states.len() {
                    cells.push((HallCall::new(floor, call), car));
                }
            }
        }

        let costs: Vec<Option<Cost>> = cells
            .par_iter()
            .map(|&(call, car)| {
                if snapshot.hall_calls().contains(&call) {
                    simulator.time_to_serve(states[car], &[], call)
                } else {
                    None
                }
            })
            .collect();

        let matrix = CostMatrix {
            elevators: snapshot.elevators().keys().cloned().collect(),
            pending: snapshot.hall_calls().iter().copied().collect(),
            costs,
        };

        if let Some(&call) = matrix
            .pending
            .iter()
            .find(|&&call| matrix.feasible_cars(call).next().is_none())
        {
            return Err(AssignerError::NoFeasibleAssignment {
                floor: call.floor,
                call: call.call,
            });
        }

        tracing::debug!(
            feasible = matrix.costs.iter().filter(|cost| cost.is_some()).count(),
            "cost matrix built"
        );
        Ok(matrix)
    }

    fn index(&self, call: HallCall, car: usize) -> usize {
        (call.floor as usize * Call::num_hall_calls() as usize + call.call.index()) * self.elevators.len() + car
    }

    /// Cars in label order; car indices everywhere refer to this slice.
    pub fn elevators(&self) -> &[ElevatorId] {
        &self.elevators
    }

    /// Pending calls ordered by floor, up before down.
    pub fn pending(&self) -> &[HallCall] {
        &self.pending
    }

    pub fn get(&self, call: HallCall, car: usize) -> Option<Cost> {
        if car >= self.elevators.len() {
            return None;
        }
        self.costs.get(self.index(call, car)).copied().flatten()
    }

    pub fn feasible_cars(&self, call: HallCall) -> impl Iterator<Item = (usize, Cost)> + '_ {
        (0..self.elevators.len()).filter_map(move |car| self.get(call, car).map(|cost| (car, cost)))
    }
}
