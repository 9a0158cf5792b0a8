pub mod checker;
pub mod config;
pub mod errors;
pub mod kubernetes;
pub mod watch;
pub mod workflow;

pub use checker::{
    Condition, Message, ReadinessResult, ReadinessResults, Severity,
    StateChecker,
};
pub use errors::ReadinessError;
pub use kubernetes::{Checked, Snapshot, qualified_name};

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the stderr fmt subscriber. `default_env` only applies when
/// `RUST_LOG` is unset or holds no valid directive.
pub fn init_tracing(default_env: &str) {
    let rust_log = std::env::var("RUST_LOG").unwrap_or_default();
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter(default_env, &rust_log))
        .try_init();
}

fn env_filter(default_env: &str, rust_log: &str) -> EnvFilter {
    let default = default_env
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    EnvFilter::builder()
        .with_default_directive(default)
        .parse_lossy(rust_log)
}
