//! Tracing setup

use tracing_subscriber::{fmt, EnvFilter};

/// Install the stdout subscriber.
///
/// `RUST_LOG` wins when set; otherwise the workspace crates log at
/// `log_level` (default `info`).
pub fn init_tracing(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "doi_tasks={base_level},doi_sources={base_level},doi_reconcile={base_level}"
        ))
    });

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
