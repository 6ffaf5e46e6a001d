use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub const DEFAULT_LOG_DIRECTIVE: &str = "carbon_planner=debug,info";

/// Installs a global fmt subscriber. `RUST_LOG` wins over `default_directive`.
pub fn init_logging(default_directive: &str) -> Result<(), SetGlobalDefaultError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}
