use std::collections::HashSet;

use courtside_core::{CanonicalRecord, Provenance, ReconcileError, ReconciledResult, StatBounds};

/// Drop records failing `bounds`, reporting each as a `RejectedRecord` diagnostic.
pub(crate) fn validate(
    source: &str,
    records: Vec<CanonicalRecord>,
    bounds: &StatBounds,
    errors: &mut Vec<ReconcileError>,
) -> Vec<CanonicalRecord> {
    records
        .into_iter()
        .filter(|r| match bounds.check(r) {
            Ok(()) => true,
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(source, entity = %r.display_name, %reason, "courtside: record rejected");
                errors.push(ReconcileError::RejectedRecord {
                    source_id: source.to_string(),
                    entity: r.display_name.clone(),
                    reason,
                });
                false
            }
        })
        .collect()
}

/// Sort records by date, team, kind and entity, keeping provenance aligned.
pub(crate) fn order_records(
    records: Vec<CanonicalRecord>,
    provenance: Vec<Provenance>,
) -> (Vec<CanonicalRecord>, Vec<Provenance>) {
    let mut pairs: Vec<(CanonicalRecord, Provenance)> =
        records.into_iter().zip(provenance).collect();
    pairs.sort_by(|(a, _), (b, _)| {
        (a.game.date, &a.team_code, a.kind, &a.entity_id).cmp(&(
            b.game.date,
            &b.team_code,
            b.kind,
            &b.entity_id,
        ))
    });
    pairs.into_iter().unzip()
}

/// Keep the records `keep` accepts together with their provenance. Superseded
/// lines follow the records they lost to; a result left empty is partial.
pub(crate) fn retain_records(
    result: &mut ReconciledResult,
    keep: impl Fn(&CanonicalRecord) -> bool,
) {
    let records = std::mem::take(&mut result.records);
    let provenance = std::mem::take(&mut result.provenance);
    (result.records, result.provenance) = records
        .into_iter()
        .zip(provenance)
        .filter(|(r, _)| keep(r))
        .unzip();

    let kept: HashSet<&str> = result.records.iter().map(|r| r.entity_id.as_str()).collect();
    result
        .superseded
        .retain(|r| kept.contains(r.entity_id.as_str()));
    result.partial |= result.records.is_empty();
}
