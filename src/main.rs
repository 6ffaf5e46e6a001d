use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};

use carbon_planner::infra::{
    CompositeObserver, DEFAULT_LOG_DIRECTIVE, DefaultObserver, ReplayObserver, TurnObserver,
    init_logging,
};
use carbon_planner::{GameConfig, HeuristicPlanner, Observation, PlannerConfig, Policy};
use dotenv::dotenv;
use serde::Deserialize;
use tracing::{error, info};

/// One line of stdin.
#[derive(Debug, Deserialize)]
struct TurnRequest {
    observation: Observation,
    #[serde(default)]
    config: GameConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    init_logging(DEFAULT_LOG_DIRECTIVE)?;
    let config = PlannerConfig::from_env()?;
    info!("seed {}, tie break {:?}", config.seed, config.tie_break);

    let mut observers: Vec<Box<dyn TurnObserver>> = vec![Box::new(DefaultObserver)];
    if let Ok(path) = env::var("CARBON_PLANNER_REPLAY") {
        info!("writing replay to {}", path);
        observers.push(Box::new(ReplayObserver::new(BufWriter::new(File::create(path)?))));
    }
    let mut planner = HeuristicPlanner::with_observer(config, CompositeObserver::new(observers));
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let answer = match serde_json::from_str::<TurnRequest>(&line) {
            Ok(request) => planner
                .take_action(&request.observation, &request.config)
                .to_json(),
            Err(err) => {
                error!("unreadable turn request: {}", err);
                "{}".to_string()
            }
        };
        writeln!(stdout, "{answer}")?;
        stdout.flush()?;
    }
    Ok(())
}
