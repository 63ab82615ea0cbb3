use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init_logging() -> Result<()> {
    let filter_spec = resolve_filter_spec();
    let env_filter = EnvFilter::try_new(filter_spec.clone())
        .with_context(|| format!("invalid log filter: {filter_spec}"))?;

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to initialize tracing subscriber")?;
    Ok(())
}

fn resolve_filter_spec() -> String {
    if let Ok(raw) = std::env::var("RUST_LOG") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    if let Ok(raw) = std::env::var("WAVES_LOG") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    "info".to_string()
}
