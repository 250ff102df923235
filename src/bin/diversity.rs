//! Diversity statistics CLI for imaging screen metadata.
//!
//! Command-line interface for computing per-study and databank-wide
//! diversity statistics from per-study metadata TSV files.

use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use screen_diversity::collect::{
    collect_attribute_elements, collect_databank_stats, collect_study_stats, CollectConfig,
};
use screen_diversity::data::{
    write_element_counts_tsv, write_reports_json, write_reports_tsv, AttributeObservations,
    DiversityReport, StudyTable,
};
use screen_diversity::error::Result;
use std::path::{Path, PathBuf};

/// Output format for result tables.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Tab-separated values
    Tsv,
    /// Pretty-printed JSON
    Json,
}

/// Diversity statistics over imaging screen metadata
#[derive(Parser)]
#[command(name = "diversity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-study statistics: one report row per (study, attribute)
    Study {
        /// Metadata TSV files or directories to walk for them
        #[arg(short, long, required = true, num_args = 1..)]
        metadata: Vec<PathBuf>,

        /// Output path for the result table
        #[arg(short, long)]
        output: PathBuf,

        /// YAML file with the column exclusion list
        #[arg(long)]
        config: Option<PathBuf>,

        /// Columns to exclude (replaces the default list; merged into --config when both are given)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
        format: OutputFormat,

        /// Optional path for the per-attribute label-count breakdown (TSV)
        #[arg(long)]
        elements: Option<PathBuf>,
    },

    /// Databank-wide statistics over the union of all studies
    Databank {
        /// Metadata TSV files or directories to walk for them
        #[arg(short, long, required = true, num_args = 1..)]
        metadata: Vec<PathBuf>,

        /// Output path for the result table
        #[arg(short, long)]
        output: PathBuf,

        /// YAML file with the column exclusion list
        #[arg(long)]
        config: Option<PathBuf>,

        /// Columns to exclude (replaces the default list; merged into --config when both are given)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
        format: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Study {
            metadata,
            output,
            config,
            exclude,
            format,
            elements,
        } => run_study(&metadata, &output, config.as_deref(), &exclude, format, elements.as_deref()),
        Commands::Databank {
            metadata,
            output,
            config,
            exclude,
            format,
        } => run_databank(&metadata, &output, config.as_deref(), &exclude, format),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Resolve the exclusion list: a YAML config replaces the default
/// administrative list, --exclude flags replace it; when both are given the
/// flags are merged into the loaded config.
fn resolve_config(config_path: Option<&Path>, exclude: &[String]) -> Result<CollectConfig> {
    if let Some(path) = config_path {
        eprintln!("Loading exclusion config from {:?}...", path);
        let mut config = CollectConfig::from_yaml(path)?;
        config.extend_excluded(exclude.iter().cloned());
        return Ok(config);
    }
    if !exclude.is_empty() {
        return Ok(CollectConfig::with_excluded(exclude.iter().cloned()));
    }
    Ok(CollectConfig::default())
}

/// Recursively collect metadata file paths under each input path.
fn walk(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<_>>()?;
            entries.sort();
            files.extend(walk(&entries)?);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn load_tables(metadata: &[PathBuf]) -> Result<Vec<StudyTable>> {
    let files = walk(metadata)?;
    eprintln!("Loading {} study table(s)...", files.len());
    files
        .par_iter()
        .map(StudyTable::from_tsv)
        .collect()
}

fn write_reports(
    output: &Path,
    format: OutputFormat,
    reports: &[DiversityReport],
) -> Result<()> {
    eprintln!("Writing {} report row(s) to {:?}...", reports.len(), output);
    match format {
        OutputFormat::Tsv => write_reports_tsv(output, reports),
        OutputFormat::Json => write_reports_json(output, reports),
    }
}

fn run_study(
    metadata: &[PathBuf],
    output: &Path,
    config_path: Option<&Path>,
    exclude: &[String],
    format: OutputFormat,
    elements_output: Option<&Path>,
) -> Result<()> {
    let config = resolve_config(config_path, exclude)?;
    let tables = load_tables(metadata)?;

    let per_study: Vec<Vec<DiversityReport>> = tables
        .par_iter()
        .map(|table| collect_study_stats(table, &config))
        .collect::<Result<_>>()?;
    let reports: Vec<DiversityReport> = per_study.into_iter().flatten().collect();

    write_reports(output, format, &reports)?;

    if let Some(elements_path) = elements_output {
        let mut entries: Vec<(String, String, AttributeObservations)> = Vec::new();
        for table in &tables {
            for (attribute, observations) in collect_attribute_elements(table, &config)? {
                entries.push((table.study_name().to_string(), attribute, observations));
            }
        }
        eprintln!("Writing label counts to {:?}...", elements_path);
        write_element_counts_tsv(elements_path, &entries)?;
    }

    eprintln!("Done! {} studies processed", tables.len());
    Ok(())
}

fn run_databank(
    metadata: &[PathBuf],
    output: &Path,
    config_path: Option<&Path>,
    exclude: &[String],
    format: OutputFormat,
) -> Result<()> {
    let config = resolve_config(config_path, exclude)?;
    let tables = load_tables(metadata)?;

    let reports = collect_databank_stats(&tables, &config)?;
    write_reports(output, format, &reports)?;

    eprintln!(
        "Done! {} attributes aggregated across {} studies",
        reports.len(),
        tables.len()
    );
    Ok(())
}
