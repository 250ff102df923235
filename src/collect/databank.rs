//! Databank-wide statistics over the union of study tables.

use crate::collect::CollectConfig;
use crate::data::{AttributeObservations, DiversityReport, StudyTable};
use crate::error::{DiversityError, Result};
use crate::stats::DiversityMetrics;
use rayon::prelude::*;

/// Compute diversity statistics per attribute over the row union of all
/// input tables.
///
/// Label counts at databank scale are the sums of per-study counts, so a
/// label's databank count equals what a single concatenated table would give:
/// no row is dropped or double-counted. Attributes present in only some
/// tables are aggregated over the tables that have them. Per-attribute
/// results are independent of the input table ordering; report order follows
/// first appearance of each attribute across the input sequence.
pub fn collect_databank_stats(
    tables: &[StudyTable],
    config: &CollectConfig,
) -> Result<Vec<DiversityReport>> {
    if tables.is_empty() {
        return Err(DiversityError::EmptyData(
            "Databank statistics require at least one study table".to_string(),
        ));
    }

    let mut attributes: Vec<&str> = Vec::new();
    for table in tables {
        for column in table.column_names() {
            if !config.is_excluded(column) && !attributes.contains(&column.as_str()) {
                attributes.push(column);
            }
        }
    }

    attributes
        .into_par_iter()
        .map(|attribute| {
            let mut merged = AttributeObservations::new();
            for table in tables {
                if table.has_column(attribute) {
                    merged.merge(&AttributeObservations::from_column(table.column(attribute)?));
                }
            }
            let metrics = DiversityMetrics::compute(&merged)?;
            Ok(metrics.into_report(None, attribute.to_string()))
        })
        .collect()
}
