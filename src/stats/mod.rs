//! The diversity-statistics engine: frequency views and the five metrics.

mod diversity;
mod frequency;

pub use diversity::{
    gini_coefficient, norm_median_evenness, pielou_evenness, shannon_index, shannon_terms,
    simpson_evenness, DiversityMetrics,
};
pub use frequency::FrequencyDistribution;
