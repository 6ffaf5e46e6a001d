mod occupancy;
mod planner;
mod planner_state;
pub mod plans;
mod resolver;
mod translator;

pub use occupancy::{Claim, OccupancyTracker};
pub use planner::HeuristicPlanner;
pub use planner_state::PlannerState;
pub use plans::{Intent, IntentScorer, Plan, PlanContext};
pub use resolver::resolve;
pub use translator::MoveTranslator;
