pub mod cli;
pub mod commands;

pub use dayplan_core as core;
pub use dayplan_core::classify;
pub use dayplan_core::config;
pub use dayplan_core::model;
pub use dayplan_core::parser;
pub use dayplan_core::AppConfig;
pub use dayplan_core::TaskStore;

use anyhow::Result;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, defaulting to `warn` so the CLI
/// stays quiet unless a directive is passed.
pub fn init_tracing(filter: Option<String>) -> Result<()> {
    let filter = filter.unwrap_or_else(|| "warn".to_string());
    let directive: Directive = filter.parse()?;
    let env_filter = EnvFilter::builder()
        .with_default_directive(directive)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
    Ok(())
}
