//! Integration tests for the study/databank diversity pipeline.

use screen_diversity::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

const TOL: f64 = 1e-9;

/// Write a synthetic study metadata TSV into the directory.
fn write_study_tsv(dir: &Path, name: &str, rows: &[(&str, &str, &str)]) {
    let path = dir.join(format!("{}.tsv", name));
    let mut file = fs::File::create(path).unwrap();
    writeln!(file, "screen_id\torganism\tcell_line").unwrap();
    for (screen_id, organism, cell_line) in rows {
        writeln!(file, "{}\t{}\t{}", screen_id, organism, cell_line).unwrap();
    }
}

fn load_studies(dir: &Path) -> Vec<StudyTable> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    paths.sort();
    paths
        .iter()
        .map(|p| StudyTable::from_tsv(p).unwrap())
        .collect()
}

#[test]
fn test_full_study_pipeline() {
    let dir = TempDir::new().unwrap();
    write_study_tsv(
        dir.path(),
        "idr0001_screenA",
        &[
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "HeLa"),
            ("1201", "Homo sapiens", "U2OS"),
        ],
    );

    let tables = load_studies(dir.path());
    let config = CollectConfig::default();
    let reports = collect_study_stats(&tables[0], &config).unwrap();

    // screen_id is excluded by default
    let attributes: Vec<&str> = reports.iter().map(|r| r.attribute.as_str()).collect();
    assert_eq!(attributes, vec!["organism", "cell_line"]);

    // organism is a single-label column: the degenerate contract applies
    let organism = &reports[0];
    assert_eq!(organism.richness, 1);
    assert_eq!(organism.shannon, 0.0);
    assert!(organism.pielou.is_none());
    assert!(organism.nme.is_none());
    assert!((organism.simpson - 1.0).abs() < TOL);
    assert!((organism.gini - 0.0).abs() < TOL);

    // cell_line is the 9:1 skewed distribution
    let cell_line = &reports[1];
    assert_eq!(cell_line.richness, 2);
    let expected_h = -(0.9 * 0.9f64.ln() + 0.1 * 0.1f64.ln());
    assert!((cell_line.shannon - expected_h).abs() < TOL);
    assert!((cell_line.gini - 0.4).abs() < TOL);
    assert!((cell_line.simpson - (1.0 / 0.82) / 2.0).abs() < TOL);
    let j = cell_line.pielou.unwrap();
    assert!(j > 0.0 && j <= 1.0 + TOL);
}

/// Write a study TSV whose organism column has the given per-label counts.
fn write_organism_counts_tsv(dir: &Path, name: &str, screen_id: &str, spec: &[(&str, usize)]) {
    let path = dir.join(format!("{}.tsv", name));
    let mut file = fs::File::create(path).unwrap();
    writeln!(file, "screen_id\torganism\tcell_line").unwrap();
    for &(organism, n) in spec {
        for _ in 0..n {
            writeln!(file, "{}\t{}\tHeLa", screen_id, organism).unwrap();
        }
    }
}

#[test]
fn test_databank_union_is_order_independent() {
    let dir = TempDir::new().unwrap();
    // Union organism counts 1,2,3,5,7,11,13 — all distinct, so the float
    // summations in H/E/GC are sensitive to label ordering and exact report
    // equality catches any nondeterminism in the aggregation.
    write_organism_counts_tsv(
        dir.path(),
        "idr0001_screenA",
        "1201",
        &[("org_a", 1), ("org_b", 2), ("org_c", 3), ("org_d", 2)],
    );
    write_organism_counts_tsv(
        dir.path(),
        "idr0002_screenB",
        "1305",
        &[("org_d", 3), ("org_e", 7), ("org_f", 11), ("org_g", 13)],
    );

    let tables = load_studies(dir.path());
    let config = CollectConfig::default();

    let forward = collect_databank_stats(&tables, &config).unwrap();
    let reversed: Vec<StudyTable> = tables.iter().rev().cloned().collect();
    let backward = collect_databank_stats(&reversed, &config).unwrap();

    assert_eq!(forward.len(), backward.len());
    for report in &forward {
        let twin = backward
            .iter()
            .find(|r| r.attribute == report.attribute)
            .expect("attribute present in both orders");
        assert_eq!(report, twin);
    }

    // Databank counts are the per-study sums: 42 rows total, 7 organisms.
    let organism = forward.iter().find(|r| r.attribute == "organism").unwrap();
    assert_eq!(organism.richness, 7);
    assert!(organism.study_name.is_none());
}

#[test]
fn test_exclusion_list_tolerates_absent_columns() {
    let dir = TempDir::new().unwrap();
    write_study_tsv(
        dir.path(),
        "idr0003_screenA",
        &[("1400", "Homo sapiens", "HeLa"), ("1400", "Homo sapiens", "U2OS")],
    );

    let tables = load_studies(dir.path());
    // plate_name and well_id are not columns of this table
    let config = CollectConfig::with_excluded(["screen_id", "plate_name", "well_id"]);

    let reports = collect_study_stats(&tables[0], &config).unwrap();
    assert_eq!(reports.len(), 2);

    let databank = collect_databank_stats(&tables, &config).unwrap();
    assert_eq!(databank.len(), 2);
}

#[test]
fn test_missing_annotations_count_as_sentinel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("idr0004_screenA.tsv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "organism\tcell_line").unwrap();
    writeln!(file, "Homo sapiens\tHeLa").unwrap();
    writeln!(file, "\tHeLa").unwrap();
    writeln!(file, "Homo sapiens\t").unwrap();
    drop(file);

    let table = StudyTable::from_tsv(&path).unwrap();
    let reports = collect_study_stats(&table, &CollectConfig::none()).unwrap();

    // The blank cells are a category of their own, not dropped rows.
    let organism = reports.iter().find(|r| r.attribute == "organism").unwrap();
    assert_eq!(organism.richness, 2);

    let elements = collect_attribute_elements(&table, &CollectConfig::none()).unwrap();
    let (_, observations) = elements.iter().find(|(a, _)| a == "organism").unwrap();
    assert_eq!(observations.count(NOT_LISTED), 1);
    assert_eq!(observations.total(), 3);
}

#[test]
fn test_report_artifacts_round_trip() {
    let dir = TempDir::new().unwrap();
    write_study_tsv(
        dir.path(),
        "idr0005_screenA",
        &[
            ("1500", "Homo sapiens", "HeLa"),
            ("1500", "Mus musculus", "HeLa"),
        ],
    );

    let tables = load_studies(dir.path());
    let config = CollectConfig::default();
    let reports = collect_study_stats(&tables[0], &config).unwrap();

    let tsv_path = dir.path().join("individual_studies_diversity.tsv");
    write_reports_tsv(&tsv_path, &reports).unwrap();
    let contents = fs::read_to_string(&tsv_path).unwrap();
    assert!(contents.starts_with("Study_Name\tAttribute\tS\tH\tNME\tJ\tE\tGC"));
    // One header line plus one row per attribute
    assert_eq!(contents.lines().count(), reports.len() + 1);

    let json_path = dir.path().join("individual_studies_diversity.json");
    write_reports_json(&json_path, &reports).unwrap();
    let parsed: Vec<DiversityReport> =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(parsed, reports);
}

#[test]
fn test_relative_frequencies_sum_to_one_across_attributes() {
    let dir = TempDir::new().unwrap();
    write_study_tsv(
        dir.path(),
        "idr0006_screenA",
        &[
            ("1600", "Homo sapiens", "HeLa"),
            ("1600", "Mus musculus", "U2OS"),
            ("1600", "Danio rerio", "MCF-7"),
            ("1600", "Homo sapiens", "HeLa"),
            ("1600", "Homo sapiens", "A549"),
        ],
    );

    let table = &load_studies(dir.path())[0];
    for attribute in ["organism", "cell_line"] {
        let observations = AttributeObservations::from_column(table.column(attribute).unwrap());
        let dist = FrequencyDistribution::from_observations(&observations).unwrap();
        let sum: f64 = dist.relative().iter().sum();
        assert!((sum - 1.0).abs() < TOL, "{}: sum = {}", attribute, sum);
        assert_eq!(dist.richness(), observations.richness());
    }
}
