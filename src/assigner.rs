/// ----- HALL REQUEST ASSIGNER -----
/// This stateless module runs one snapshot through every stage: cost matrix,
/// assignment search and plan. Nothing is kept between calls, so the same
/// input always yields the same plan.

use tracing::{debug, instrument};

use shared_resources::config::AssignerConfig;
use shared_resources::{AssignerError, Snapshot};

use crate::cost_matrix::CostMatrix;
use crate::plan::Plan;
use crate::request::{HRAInput, HRAOutput};
use crate::search::{search, Assignment};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub assignment: Assignment,
    pub plan: Plan,
}

#[derive(Debug, Clone, Default)]
pub struct HallRequestAssigner {
    config: AssignerConfig,
}

impl HallRequestAssigner {
    pub fn new(config: AssignerConfig) -> Self {
        HallRequestAssigner { config }
    }

    pub fn config(&self) -> &AssignerConfig {
        &self.config
    }

    #[instrument(skip_all, fields(floors = snapshot.num_floors(), calls = snapshot.hall_calls().len()))]
    pub fn assign(&self, snapshot: &Snapshot) -> Result<Outcome, AssignerError> {
        let matrix = CostMatrix::build(snapshot, &self.config.simulation)?;
        let assignment = search(snapshot, &matrix, &self.config.simulation, &self.config.search)?;
        debug!(
            strategy = ?assignment.strategy,
            explored = assignment.explored,
            timed_out = assignment.timed_out,
            "assignment chosen"
        );
        let plan = Plan::new(snapshot, &assignment);
        Ok(Outcome { assignment, plan })
    }

    /// Document in, document out.
    pub fn assign_orders(&self, input: &HRAInput) -> Result<HRAOutput, AssignerError> {
        let snapshot = input.to_snapshot()?;
        let outcome = self.assign(&snapshot)?;
        Ok(outcome.plan.to_output(self.config.output.include_cab))
    }
}
