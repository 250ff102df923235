//! Per-study statistics collection.

use crate::collect::CollectConfig;
use crate::data::{AttributeObservations, DiversityReport, StudyTable};
use crate::error::Result;
use crate::stats::DiversityMetrics;
use rayon::prelude::*;

/// Column names retained for statistics, in table order.
pub(crate) fn retained_columns<'a>(table: &'a StudyTable, config: &CollectConfig) -> Vec<&'a str> {
    table
        .column_names()
        .iter()
        .map(|c| c.as_str())
        .filter(|c| !config.is_excluded(c))
        .collect()
}

/// Compute diversity statistics for every retained column of one study.
///
/// Returns one report per column, in the table's column order. Exclusion
/// entries naming columns the table does not have are ignored. Columns are
/// computed in parallel; the output order is unaffected.
pub fn collect_study_stats(
    table: &StudyTable,
    config: &CollectConfig,
) -> Result<Vec<DiversityReport>> {
    retained_columns(table, config)
        .into_par_iter()
        .map(|attribute| {
            let observations = AttributeObservations::from_column(table.column(attribute)?);
            let metrics = DiversityMetrics::compute(&observations)?;
            Ok(metrics.into_report(Some(table.study_name().to_string()), attribute.to_string()))
        })
        .collect()
}

/// Raw label-count breakdown for every retained column of one study.
///
/// This is the intermediate the statistics are derived from; persisting it
/// lets downstream reporting inspect which labels drive each metric.
pub fn collect_attribute_elements(
    table: &StudyTable,
    config: &CollectConfig,
) -> Result<Vec<(String, AttributeObservations)>> {
    retained_columns(table, config)
        .into_iter()
        .map(|attribute| {
            let observations = AttributeObservations::from_column(table.column(attribute)?);
            Ok((attribute.to_string(), observations))
        })
        .collect()
}
