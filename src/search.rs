/// ----- ASSIGNMENT SEARCH -----
/// Picks one feasible car for every pending hall call. Small problems are
/// enumerated exhaustively across worker threads; larger ones fall back to a
/// greedy pass that re-simulates a car each time it takes on a call.
///
/// Objective, compared in order: worst per-call cost, total cost, imbalance
/// (sum of squared calls per car). Remaining ties go to the combination that
/// comes first when calls are taken by floor (up before down) and each call
/// tries its cars in label order.

use std::collections::BTreeSet;
use std::thread;
use std::time::Instant;

use crossbeam_channel::unbounded;
use tracing::{debug, instrument, warn};

use shared_resources::config::{SearchConfig, SimulationConfig};
use shared_resources::{AssignerError, Cost, ElevatorId, HallCall, Snapshot};

use crate::cost_matrix::CostMatrix;
use crate::simulator::Simulator;

const DEADLINE_CHECK_INTERVAL: u64 = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Objective {
    pub worst: Cost,
    pub total: Cost,
    pub imbalance: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Nothing to assign.
    Empty,
    Exhaustive,
    Greedy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedCall {
    pub call: HallCall,
    pub elevator: ElevatorId,
    pub cost: Cost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    calls: Vec<AssignedCall>,
    pub strategy: Strategy,
    pub objective: Objective,
    pub explored: u64,
    /// The exhaustive search hit its deadline and this is the best it saw.
    pub timed_out: bool,
}

impl Assignment {
    fn empty() -> Self {
        Assignment {
            calls: Vec::new(),
            strategy: Strategy::Empty,
            objective: Objective::default(),
            explored: 0,
            timed_out: false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssignedCall> {
        self.calls.iter()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn elevator_for(&self, call: HallCall) -> Option<&ElevatorId> {
        self.calls
            .iter()
            .find(|assigned| assigned.call == call)
            .map(|assigned| &assigned.elevator)
    }
}

/// Feasible (car, cost) options for one pending call, in car order.
type Options = Vec<(usize, Cost)>;

#[instrument(skip_all, fields(calls = matrix.pending().len(), elevators = matrix.elevators().len()))]
pub fn search(
    snapshot: &Snapshot,
    matrix: &CostMatrix,
    simulation: &SimulationConfig,
    config: &SearchConfig,
) -> Result<Assignment, AssignerError> {
    if matrix.pending().is_empty() {
        return Ok(Assignment::empty());
    }

    let mut options: Vec<Options> = Vec::with_capacity(matrix.pending().len());
    for &call in matrix.pending() {
        let feasible: Options = matrix.feasible_cars(call).collect();
        if feasible.is_empty() {
            return Err(AssignerError::NoFeasibleAssignment {
                floor: call.floor,
                call: call.call,
            });
        }
        options.push(feasible);
    }

    let space = options
        .iter()
        .try_fold(1u64, |acc, feasible| acc.checked_mul(feasible.len() as u64));
    debug!(?space, threshold = config.exhaustive_threshold, "search space");

    match space {
        Some(space) if space <= config.exhaustive_threshold => exhaustive(matrix, &options, space, config),
        _ => greedy(snapshot, matrix, simulation),
    }
}

#[derive(Debug)]
struct WorkerResult {
    best: Option<(Objective, u64)>,
    explored: u64,
    timed_out: bool,
}

fn exhaustive(
    matrix: &CostMatrix,
    options: &[Options],
    space: u64,
    config: &SearchConfig,
) -> Result<Assignment, AssignerError> {
    let deadline = Instant::now().checked_add(config.budget);
    let num_cars = matrix.elevators().len();
    let workers = match config.workers {
        0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        n => n,
    };
    let workers = (workers as u64).clamp(1, space);
    let chunk = space.div_ceil(workers);

    let (result_tx, result_rx) = unbounded::<WorkerResult>();
    thread::scope(|scope| {
        for worker in 0..workers {
            let start = worker * chunk;
            let end = (start + chunk).min(space);
            if start >= end {
                continue;
            }
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                let result = explore_range(options, num_cars, start, end, deadline);
                // The receiver outlives the scope.
                let _ = result_tx.send(result);
            });
        }
    });
    drop(result_tx);

    let mut best: Option<(Objective, u64)> = None;
    let mut explored = 0;
    let mut timed_out = false;
    for result in result_rx.iter() {
        explored += result.explored;
        timed_out |= result.timed_out;
        if let Some(candidate) = result.best {
            if best.map_or(true, |current| candidate < current) {
                best = Some(candidate);
            }
        }
    }

    let Some((objective, index)) = best else {
        return Err(AssignerError::SearchTimedOut {
            budget: config.budget,
            explored,
        });
    };
    if timed_out {
        warn!(explored, space, "search budget ran out, returning best assignment found so far");
    }

    let digits = decode(index, options);
    let calls = matrix
        .pending()
        .iter()
        .zip(options.iter().zip(&digits))
        .map(|(&call, (feasible, &digit))| {
            let (car, cost) = feasible[digit];
            AssignedCall {
                call,
                elevator: matrix.elevators()[car].clone(),
                cost,
            }
        })
        .collect();

    debug!(explored, worst = %objective.worst, total = %objective.total, "exhaustive search done");
    Ok(Assignment {
        calls,
        strategy: Strategy::Exhaustive,
        objective,
        explored,
        timed_out,
    })
}

fn explore_range(
    options: &[Options],
    num_cars: usize,
    start: u64,
    end: u64,
    deadline: Option<Instant>,
) -> WorkerResult {
    let mut digits = decode(start, options);
    let mut counts = vec![0u64; num_cars];
    let mut best: Option<(Objective, u64)> = None;
    let mut explored = 0;
    let mut timed_out = false;

    for index in start..end {
        if explored % DEADLINE_CHECK_INTERVAL == 0 && deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            timed_out = true;
            break;
        }
        let objective = evaluate(options, &digits, &mut counts);
        if best.map_or(true, |(current, _)| objective < current) {
            best = Some((objective, index));
        }
        explored += 1;
        increment(&mut digits, options);
    }

    WorkerResult {
        best,
        explored,
        timed_out,
    }
}

/// Mixed-radix decoding of a combination index; the first call is the most
/// significant digit.
fn decode(index: u64, options: &[Options]) -> Vec<usize> {
    let mut digits = vec![0; options.len()];
    let mut rest = index;
    for (digit, feasible) in digits.iter_mut().zip(options).rev() {
        let radix = feasible.len() as u64;
        *digit = (rest % radix) as usize;
        rest /= radix;
    }
    digits
}

fn increment(digits: &mut [usize], options: &[Options]) {
    for (digit, feasible) in digits.iter_mut().zip(options).rev() {
        *digit += 1;
        if *digit < feasible.len() {
            return;
        }
        *digit = 0;
    }
}

fn evaluate(options: &[Options], digits: &[usize], counts: &mut [u64]) -> Objective {
    counts.fill(0);
    let mut worst = Cost::ZERO;
    let mut total = Cost::ZERO;
    for (feasible, &digit) in options.iter().zip(digits) {
        let (car, cost) = feasible[digit];
        worst = worst.max(cost);
        total = total + cost;
        counts[car] += 1;
    }
    Objective {
        worst,
        total,
        imbalance: counts.iter().map(|count| count * count).sum(),
    }
}

fn greedy(snapshot: &Snapshot, matrix: &CostMatrix, simulation: &SimulationConfig) -> Result<Assignment, AssignerError> {
    let simulator = Simulator::new(simulation, snapshot.num_floors());
    let states: Vec<_> = snapshot.elevators().values().collect();
    let pending = matrix.pending();
    let num_cars = states.len();

    let mut costs: Vec<Vec<Option<Cost>>> = pending
        .iter()
        .map(|&call| (0..num_cars).map(|car| matrix.get(call, car)).collect())
        .collect();
    let mut open: BTreeSet<usize> = (0..pending.len()).collect();
    let mut stops: Vec<Vec<HallCall>> = vec![Vec::new(); num_cars];
    let mut chosen: Vec<Option<(usize, Cost)>> = vec![None; pending.len()];

    while !open.is_empty() {
        let mut best: Option<(Cost, usize, usize)> = None;
        for &index in &open {
            let mut reachable = false;
            for (car, cost) in costs[index].iter().enumerate() {
                let Some(cost) = *cost else { continue };
                reachable = true;
                let candidate = (cost, car, index);
                if best.map_or(true, |current| candidate < current) {
                    best = Some(candidate);
                }
            }
            if !reachable {
                let call = pending[index];
                return Err(AssignerError::NoFeasibleAssignment {
                    floor: call.floor,
                    call: call.call,
                });
            }
        }
        let Some((cost, car, index)) = best else { break };

        open.remove(&index);
        chosen[index] = Some((car, cost));
        stops[car].push(pending[index]);
        debug!(call = %pending[index], elevator = %matrix.elevators()[car], %cost, "greedy commit");

        // Only this car's stop sequence changed. Feasibility stays that of the
        // initial matrix, the same per-call rule the exhaustive search scores
        // with; re-simulation only refines the cost.
        for &other in &open {
            if let Some(initial) = matrix.get(pending[other], car) {
                let refined = simulator.time_to_serve(states[car], &stops[car], pending[other]);
                costs[other][car] = Some(refined.unwrap_or(initial));
            }
        }
    }

    let mut counts = vec![0u64; num_cars];
    let mut calls = Vec::with_capacity(pending.len());
    for (&call, choice) in pending.iter().zip(chosen) {
        let Some((car, cost)) = choice else {
            return Err(AssignerError::NoFeasibleAssignment {
                floor: call.floor,
                call: call.call,
            });
        };
        counts[car] += 1;
        calls.push(AssignedCall {
            call,
            elevator: matrix.elevators()[car].clone(),
            cost,
        });
    }

    let objective = Objective {
        worst: calls.iter().map(|assigned| assigned.cost).max().unwrap_or_default(),
        total: calls.iter().map(|assigned| assigned.cost).sum(),
        imbalance: counts.iter().map(|count| count * count).sum(),
    };
    Ok(Assignment {
        calls,
        strategy: Strategy::Greedy,
        objective,
        explored: 0,
        timed_out: false,
    })
}
