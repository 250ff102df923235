//! Ecological diversity statistics for imaging screen metadata.
//!
//! This library flattens per-study screen annotation tables into categorical
//! observation sets and computes diversity and inequality statistics over
//! each image attribute (organism, cell line, gene identifier, ...), at both
//! per-study and whole-databank scope.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (StudyTable, AttributeObservations,
//!   DiversityReport) and tabular output writers
//! - **stats**: The diversity engine — frequency distributions, Shannon
//!   index, Pielou's evenness, Normalized Median Evenness, Simpson's
//!   evenness, Gini coefficient
//! - **collect**: Aggregation of statistics per study and across the full
//!   databank, with configurable column exclusions
//!
//! # Example
//!
//! ```no_run
//! use screen_diversity::prelude::*;
//!
//! // Load per-study metadata
//! let table = StudyTable::from_tsv("idr0001_screenA.tsv").unwrap();
//!
//! // One report per categorical attribute
//! let config = CollectConfig::default();
//! let reports = collect_study_stats(&table, &config).unwrap();
//!
//! for report in &reports {
//!     println!("{}: S = {}, H = {:.4}", report.attribute, report.richness, report.shannon);
//! }
//! ```

pub mod collect;
pub mod data;
pub mod error;
pub mod stats;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::collect::{
        collect_attribute_elements, collect_databank_stats, collect_study_stats, CollectConfig,
        DEFAULT_EXCLUDED_COLUMNS,
    };
    pub use crate::data::{
        write_element_counts_tsv, write_reports_json, write_reports_tsv, AttributeObservations,
        DiversityReport, StudyTable, NOT_LISTED,
    };
    pub use crate::error::{DiversityError, Result};
    pub use crate::stats::{DiversityMetrics, FrequencyDistribution};
}
