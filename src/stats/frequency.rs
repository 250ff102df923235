//! Frequency views over categorical observation sets.

use crate::data::AttributeObservations;
use crate::error::{DiversityError, Result};

/// Index-aligned relative and absolute frequency sequences for one
/// observation set.
///
/// Sequences are ordered by label so that a given multiset always yields the
/// same distribution, however its counts were accumulated; downstream f64
/// summations would otherwise reassociate and drift in their low bits.
/// Callers may only rely on `relative[i]` and `absolute[i]` describing the
/// same label.
#[derive(Debug, Clone)]
pub struct FrequencyDistribution {
    relative: Vec<f64>,
    absolute: Vec<u64>,
}

impl FrequencyDistribution {
    /// Build frequency views from label counts.
    ///
    /// Errors with `EmptyData` if the observation set is empty; the
    /// collectors never produce an empty set, so hitting this is a caller
    /// contract violation.
    pub fn from_observations(observations: &AttributeObservations) -> Result<Self> {
        if observations.is_empty() {
            return Err(DiversityError::EmptyData(
                "Cannot compute frequencies of an empty observation set".to_string(),
            ));
        }

        let total = observations.total() as f64;
        let mut entries: Vec<(&str, u64)> = observations.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut relative = Vec::with_capacity(entries.len());
        let mut absolute = Vec::with_capacity(entries.len());
        for (_, count) in entries {
            absolute.push(count);
            relative.push(count as f64 / total);
        }

        Ok(Self { relative, absolute })
    }

    /// Count of distinct labels (richness S).
    pub fn richness(&self) -> usize {
        self.relative.len()
    }

    /// Relative frequencies, summing to 1.
    pub fn relative(&self) -> &[f64] {
        &self.relative
    }

    /// Raw observation counts, index-aligned with `relative`.
    pub fn absolute(&self) -> &[u64] {
        &self.absolute
    }
}
