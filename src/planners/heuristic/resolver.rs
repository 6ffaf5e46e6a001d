use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::infra::Position;
use crate::planners::heuristic::plans::Plan;
use crate::state::{AgentHandle, AgentKind, WorldState};

fn plan_order(world: &WorldState, a: &Plan, b: &Plan) -> Ordering {
    let grid = world.grid();
    b.score
        .total_cmp(&a.score)
        .then_with(|| world.agent(a.agent).id.cmp(&world.agent(b.agent).id))
        .then_with(|| grid.index(a.target).cmp(&grid.index(b.target)))
        .then_with(|| a.intent.cmp(&b.intent))
}

/// Greedy assignment: best plans first, one plan per agent, and no two workers
/// of the same kind heading for the same cell. Our own bases may be shared by
/// collectors. Winners come back in assignment order.
#[tracing::instrument(level = "debug", skip_all, fields(candidates = plans.len()))]
pub fn resolve(world: &WorldState, mut plans: Vec<Plan>) -> Vec<Plan> {
    plans.sort_by(|a, b| plan_order(world, a, b));

    let mut assigned: HashSet<AgentHandle> = HashSet::new();
    let mut claimed: HashMap<(AgentKind, Position), AgentHandle> = HashMap::new();
    let mut winners = Vec::new();

    for plan in plans {
        if assigned.contains(&plan.agent) {
            continue;
        }
        let agent = world.agent(plan.agent);
        let shared = agent.kind == AgentKind::Base
            || (agent.kind == AgentKind::Collector && world.is_own_base(agent.owner, plan.target));
        if !shared {
            let key = (agent.kind, plan.target);
            if claimed.get(&key).is_some_and(|holder| *holder != plan.agent) {
                trace!(
                    "{} loses {:?} for {}",
                    agent.id, plan.target, plan.intent
                );
                continue;
            }
            claimed.insert(key, plan.agent);
        }
        assigned.insert(plan.agent);
        winners.push(plan);
    }
    winners
}
