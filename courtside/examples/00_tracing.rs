mod common;

use courtside::Courtside;
use common::{example_date, get_sources};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,courtside=trace,courtside_nba=debug
    // Build with `--features tracing` to see the engine's spans.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let engine = get_sources()
        .into_iter()
        .fold(Courtside::builder(), courtside::CourtsideBuilder::with_source)
        .build()?;

    let date = example_date();
    let _ = engine.reconcile_schedule(&date).await?;
    let _ = engine.reconcile_box_scores(&date, None).await?;

    Ok(())
}
