//! Statistics collection at per-study and databank scope.

mod config;
mod databank;
mod study;

pub use config::{CollectConfig, DEFAULT_EXCLUDED_COLUMNS};
pub use databank::collect_databank_stats;
pub use study::{collect_attribute_elements, collect_study_stats};
