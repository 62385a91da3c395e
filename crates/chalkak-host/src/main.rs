//! Capture trace replay binary.
//!
//! Usage: `chalkak-replay <guide.json> <trace.jsonl>`

use std::net::SocketAddr;

use anyhow::{bail, Context};
use chalkak_host::{read_trace, replay, HostConfig};
use chalkak_models::Guide;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (guide_path, trace_path) = match args.as_slice() {
        [guide, trace] => (guide.clone(), trace.clone()),
        _ => bail!("usage: chalkak-replay <guide.json> <trace.jsonl>"),
    };

    if let Ok(addr) = std::env::var("METRICS_ADDR") {
        let addr: SocketAddr = addr
            .parse()
            .with_context(|| format!("invalid METRICS_ADDR '{}'", addr))?;
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("failed to install Prometheus exporter")?;
        info!(%addr, "Prometheus exporter listening");
    }

    let config = HostConfig::from_env();
    config.validate()?;
    info!("Host config: {:?}", config);

    let guide_json = std::fs::read_to_string(&guide_path)
        .with_context(|| format!("failed to read guide '{}'", guide_path))?;
    let guide: Guide = serde_json::from_str(&guide_json)
        .with_context(|| format!("failed to parse guide '{}'", guide_path))?;
    let events = read_trace(&trace_path)
        .with_context(|| format!("failed to read trace '{}'", trace_path))?;

    let report = replay(&config, guide, events).await?;

    if report.first_aligned_update.is_none() {
        warn!(updates = report.updates, "Trace never reached alignment");
    }
    info!(
        updates = report.updates,
        aligned_updates = report.aligned_updates,
        alignment_changes = report.alignment_changes,
        recording_gate_openings = report.recording_gate_openings,
        "Replay complete"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Colored output for dev, JSON when `LOG_FORMAT=json`.
fn init_tracing() -> anyhow::Result<()> {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("chalkak_host=info,chalkak_guidance=info"))?;

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    Ok(())
}
