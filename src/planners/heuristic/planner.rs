use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error};

use crate::config::PlannerConfig;
use crate::infra::{DefaultObserver, TurnObserver};
use crate::planners::Policy;
use crate::planners::heuristic::planner_state::PlannerState;
use crate::planners::heuristic::plans::{IntentScorer, PlanContext, catalog, enumerate_plans};
use crate::planners::heuristic::resolver::resolve;
use crate::planners::heuristic::translator::MoveTranslator;
use crate::state::{Commands, GameConfig, Observation, WorldState};

/// Rule-based planner: score every (agent, intent, cell), resolve greedily,
/// then walk the winners one step toward their targets.
pub struct HeuristicPlanner<O: TurnObserver = DefaultObserver> {
    config: PlannerConfig,
    state: PlannerState,
    scorers: Vec<Box<dyn IntentScorer>>,
    observer: O,
}

impl HeuristicPlanner<DefaultObserver> {
    pub fn new(config: PlannerConfig) -> Self {
        Self::with_observer(config, DefaultObserver)
    }
}

impl<O: TurnObserver> HeuristicPlanner<O> {
    pub fn with_observer(config: PlannerConfig, observer: O) -> Self {
        Self {
            config,
            state: PlannerState::new(),
            scorers: catalog(),
            observer,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Plans one turn for a validated snapshot.
    #[tracing::instrument(level = "debug", skip(self, world), fields(step = world.step))]
    pub fn plan_turn(&mut self, world: &WorldState) -> Commands {
        self.observer.on_turn_start(world);
        self.state.prune(world);
        let raider = self.state.select_raider(world, &self.config);
        if let Some(handle) = raider {
            debug!("raider: {}", world.agent(handle).id);
        }

        let winners = {
            let ctx = PlanContext::new(world, &self.config, &self.state, raider);
            let plans = enumerate_plans(&ctx, &self.scorers);
            resolve(world, plans)
        };
        for plan in &winners {
            self.observer.on_plan_selected(
                &world.agent(plan.agent).id,
                plan.intent.name(),
                plan.target,
                plan.score,
            );
        }

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed ^ world.step as u64);
        let commands = MoveTranslator::new(world, &self.config, &mut rng).translate(&winners);

        self.state
            .record_commitments(world, winners.iter().map(|p| (p.agent, p.target)));
        debug!("{} planter commitments carried over", self.state.commitment_count());
        for (agent_id, command) in commands.iter() {
            self.observer.on_command(agent_id, command);
        }
        self.observer.on_turn_finished(world.step, &commands);
        commands
    }
}

impl<O: TurnObserver> Policy for HeuristicPlanner<O> {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn take_action(&mut self, obs: &Observation, config: &GameConfig) -> Commands {
        match WorldState::from_observation(obs, config) {
            Ok(world) => self.plan_turn(&world),
            Err(err) => {
                error!("rejecting observation for step {}: {}", obs.step, err);
                self.observer.on_turn_aborted(obs.step, &err);
                Commands::new()
            }
        }
    }
}
