mod common;

use courtside::{Courtside, EntityKind, StatCategory, StatKind};
use common::{example_date, get_sources};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Sources (mock in CI when COURTSIDE_EXAMPLES_USE_MOCK is set).
    let sources = get_sources();

    // 2. Register both; take rebounds from the second provider when they disagree.
    let engine = Courtside::builder()
        .with_source(sources[0].clone())
        .with_source(sources[1].clone())
        .prefer_for_category(StatCategory::Rebounding, &[sources[1].clone()])
        .build()?;

    // 3. Reconcile the slate.
    let date = example_date();
    let result = engine.reconcile_box_scores(&date, None).await?;
    println!(
        "{} records via {:?} in {}ms (partial: {})",
        result.records.len(),
        result.source_used,
        result.elapsed_budget_ms,
        result.partial
    );

    // 4. Player lines with where each value came from.
    for r in result.records_of(EntityKind::Player) {
        let pts = r.stat(StatKind::Points).unwrap_or_default();
        let reb = r.stat(StatKind::Rebounds).unwrap_or_default();
        let served_by = result
            .provenance_for(&r.entity_id)
            .map_or("?", |p| p.served_by.as_str());
        println!("{:<28} {pts:>4} pts {reb:>3} reb  [{served_by}]", r.entity_id);
    }
    for e in &result.errors {
        println!("diagnostic: {e}");
    }

    // 5. The whole envelope is serializable.
    println!("{}", serde_json::to_string_pretty(&result.provenance)?);
    Ok(())
}
