//! Result rows for diversity statistics and their on-disk writers.

use crate::data::AttributeObservations;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Diversity statistics for one (scope, attribute) pair.
///
/// `study_name` is `None` for databank-wide rows. Pielou's J and NME are
/// `None` when richness is 1, where both are mathematically undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversityReport {
    /// Study identifier; absent for databank-scope rows.
    #[serde(rename = "Study_Name", skip_serializing_if = "Option::is_none", default)]
    pub study_name: Option<String>,
    /// Attribute (column) the statistics describe.
    #[serde(rename = "Attribute")]
    pub attribute: String,
    /// Richness: count of distinct labels.
    #[serde(rename = "S")]
    pub richness: usize,
    /// Shannon index.
    #[serde(rename = "H")]
    pub shannon: f64,
    /// Normalized Median Evenness; undefined at richness 1.
    #[serde(rename = "NME")]
    pub nme: Option<f64>,
    /// Pielou's evenness; undefined at richness 1.
    #[serde(rename = "J")]
    pub pielou: Option<f64>,
    /// Simpson's evenness.
    #[serde(rename = "E")]
    pub simpson: f64,
    /// Gini coefficient over raw counts.
    #[serde(rename = "GC")]
    pub gini: f64,
}

fn render_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "NA".to_string(),
    }
}

/// Write reports as a TSV artifact.
///
/// The `Study_Name` column is emitted only when at least one report carries a
/// study name (per-study output); databank output omits it. Undefined metrics
/// are written as `NA`.
pub fn write_reports_tsv<P: AsRef<Path>>(path: P, reports: &[DiversityReport]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path.as_ref())?;

    let with_study = reports.iter().any(|r| r.study_name.is_some());
    let mut header = vec!["Attribute", "S", "H", "NME", "J", "E", "GC"];
    if with_study {
        header.insert(0, "Study_Name");
    }
    writer.write_record(&header)?;

    for report in reports {
        let mut record = vec![
            report.attribute.clone(),
            report.richness.to_string(),
            render_metric(Some(report.shannon)),
            render_metric(report.nme),
            render_metric(report.pielou),
            render_metric(Some(report.simpson)),
            render_metric(Some(report.gini)),
        ];
        if with_study {
            record.insert(0, report.study_name.clone().unwrap_or_default());
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write reports as a JSON artifact; undefined metrics serialize as `null`.
pub fn write_reports_json<P: AsRef<Path>>(path: P, reports: &[DiversityReport]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), reports)?;
    Ok(())
}

/// Write per-attribute label counts as a TSV artifact.
///
/// One row per (study, attribute, label) with the observation count; labels
/// are ordered by descending count for stable output.
pub fn write_element_counts_tsv<P: AsRef<Path>>(
    path: P,
    entries: &[(String, String, AttributeObservations)],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path.as_ref())?;

    writer.write_record(["Study_Name", "Attribute", "Element", "Count"])?;
    for (study_name, attribute, observations) in entries {
        for (label, count) in observations.sorted_entries() {
            let count = count.to_string();
            writer.write_record([study_name.as_str(), attribute.as_str(), label, count.as_str()])?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample_report() -> DiversityReport {
        DiversityReport {
            study_name: Some("idr0001".to_string()),
            attribute: "cell_line".to_string(),
            richness: 2,
            shannon: std::f64::consts::LN_2,
            nme: Some(1.0),
            pielou: Some(1.0),
            simpson: 1.0,
            gini: 0.0,
        }
    }

    #[test]
    fn test_tsv_renders_undefined_as_na() {
        let report = DiversityReport {
            study_name: Some("idr0002".to_string()),
            attribute: "organism".to_string(),
            richness: 1,
            shannon: 0.0,
            nme: None,
            pielou: None,
            simpson: 1.0,
            gini: 0.0,
        };

        let file = NamedTempFile::new().unwrap();
        write_reports_tsv(file.path(), &[report]).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let mut lines = contents.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Study_Name\tAttribute\tS\tH\tNME\tJ\tE\tGC"
        );
        let row = lines.next().unwrap();
        assert!(row.contains("\tNA\tNA\t"), "row was: {}", row);
    }

    #[test]
    fn test_tsv_omits_study_column_for_databank() {
        let mut report = sample_report();
        report.study_name = None;

        let file = NamedTempFile::new().unwrap();
        write_reports_tsv(file.path(), &[report]).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        assert!(contents.starts_with("Attribute\tS\tH\t"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = sample_report();
        let file = NamedTempFile::new().unwrap();
        write_reports_json(file.path(), std::slice::from_ref(&report)).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let parsed: Vec<DiversityReport> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![report]);
    }

    #[test]
    fn test_element_counts_tsv() {
        let obs: AttributeObservations = [("HeLa", 3), ("U2OS", 1)].into_iter().collect();
        let entries = vec![("idr0001".to_string(), "cell_line".to_string(), obs)];

        let file = NamedTempFile::new().unwrap();
        write_element_counts_tsv(file.path(), &entries).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Study_Name\tAttribute\tElement\tCount");
        assert_eq!(lines[1], "idr0001\tcell_line\tHeLa\t3");
        assert_eq!(lines[2], "idr0001\tcell_line\tU2OS\t1");
    }
}
