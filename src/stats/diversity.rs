//! Diversity and inequality metrics over frequency distributions.
//!
//! Five independent statistics: Shannon index (H), Pielou's evenness (J),
//! Normalized Median Evenness (NME), Simpson's evenness (E), and the Gini
//! coefficient (GC). All are pure functions; the richness-1 degenerate case
//! is handled before any general formula can divide by `ln(1)`.

use crate::data::{AttributeObservations, DiversityReport};
use crate::error::Result;
use crate::stats::FrequencyDistribution;

/// Shannon index `H = -Σ p_i ln(p_i)` over relative frequencies.
///
/// A single-label distribution has H = 0 by definition and is returned
/// exactly, without running the summation.
pub fn shannon_index(relative: &[f64]) -> f64 {
    if relative.len() <= 1 {
        return 0.0;
    }
    -relative.iter().map(|p| p * p.ln()).sum::<f64>()
}

/// Per-label Shannon summands `e_i = -p_i ln(p_i)`, all non-negative.
///
/// These are the inputs to [`norm_median_evenness`].
pub fn shannon_terms(relative: &[f64]) -> Vec<f64> {
    relative.iter().map(|p| -(p * p.ln())).collect()
}

/// Pielou's evenness `J = H / ln(S)`.
///
/// Undefined at S = 1 (the denominator is `ln(1) = 0`); returns `None`
/// rather than dividing. Otherwise J lies in [0, 1] up to floating error.
pub fn pielou_evenness(h: f64, s: usize) -> Option<f64> {
    if s <= 1 {
        return None;
    }
    Some(h / (s as f64).ln())
}

/// Normalized Median Evenness: `median(e_i) / max(e_i)` over Shannon
/// summands.
///
/// Undefined at S = 1, where the lone summand (and therefore the maximum)
/// is 0. The median of an even-length sequence is the mean of the two middle
/// values.
pub fn norm_median_evenness(terms: &[f64]) -> Option<f64> {
    if terms.len() <= 1 {
        return None;
    }
    let max = terms.iter().cloned().fold(f64::MIN, f64::max);
    Some(median(terms) / max)
}

/// Simpson's evenness `E = (1 / Σ p_i²) / S`.
///
/// Total over all S ≥ 1: dominance D = 1 at S = 1, giving E = 1.
/// `relative` must be non-empty; an empty distribution is a caller contract
/// violation (the collectors filter it out upstream).
pub fn simpson_evenness(relative: &[f64]) -> f64 {
    debug_assert!(
        !relative.is_empty(),
        "simpson_evenness requires a non-empty distribution"
    );
    let dominance: f64 = relative.iter().map(|p| p * p).sum();
    (1.0 / dominance) / relative.len() as f64
}

/// Gini coefficient over raw counts.
///
/// Mean absolute difference across unordered label pairs, normalized by
/// `S² · mean(c)`. Uses absolute counts, not relative frequencies; 0 for any
/// uniform distribution (including S = 1), approaching 1 under extreme
/// concentration. `absolute` must be non-empty; an empty distribution is a
/// caller contract violation (the collectors filter it out upstream).
pub fn gini_coefficient(absolute: &[u64]) -> f64 {
    debug_assert!(
        !absolute.is_empty(),
        "gini_coefficient requires a non-empty distribution"
    );
    let s = absolute.len();
    let total: u64 = absolute.iter().sum();
    let mean = total as f64 / s as f64;

    // Each unordered pair {i, j} contributes |c_i - c_j| exactly once.
    let mut pair_sum = 0.0;
    for (i, &a) in absolute.iter().enumerate() {
        for &b in &absolute[i + 1..] {
            pair_sum += a.abs_diff(b) as f64;
        }
    }

    pair_sum / ((s * s) as f64 * mean)
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// All diversity statistics for one observation set.
#[derive(Debug, Clone, PartialEq)]
pub struct DiversityMetrics {
    /// Richness: count of distinct labels.
    pub richness: usize,
    /// Shannon index.
    pub shannon: f64,
    /// Normalized Median Evenness; `None` at richness 1.
    pub nme: Option<f64>,
    /// Pielou's evenness; `None` at richness 1.
    pub pielou: Option<f64>,
    /// Simpson's evenness.
    pub simpson: f64,
    /// Gini coefficient.
    pub gini: f64,
}

impl DiversityMetrics {
    /// Run the full statistics pipeline over one observation set.
    pub fn compute(observations: &AttributeObservations) -> Result<Self> {
        let dist = FrequencyDistribution::from_observations(observations)?;
        let richness = dist.richness();

        let shannon = shannon_index(dist.relative());
        let terms = shannon_terms(dist.relative());

        Ok(Self {
            richness,
            shannon,
            nme: norm_median_evenness(&terms),
            pielou: pielou_evenness(shannon, richness),
            simpson: simpson_evenness(dist.relative()),
            gini: gini_coefficient(dist.absolute()),
        })
    }

    /// Package the metrics as a result row for a (scope, attribute) pair.
    pub fn into_report(self, study_name: Option<String>, attribute: String) -> DiversityReport {
        DiversityReport {
            study_name,
            attribute,
            richness: self.richness,
            shannon: self.shannon,
            nme: self.nme,
            pielou: self.pielou,
            simpson: self.simpson,
            gini: self.gini,
        }
    }
}
