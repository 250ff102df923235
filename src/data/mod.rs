//! Core data structures: study tables, observation multisets, result rows.

mod observations;
mod report;
mod study_table;

pub use observations::AttributeObservations;
pub use report::{
    write_element_counts_tsv, write_reports_json, write_reports_tsv, DiversityReport,
};
pub use study_table::{StudyTable, NOT_LISTED};
