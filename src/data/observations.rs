//! Categorical observation multisets built from study table columns.

use std::collections::HashMap;

/// Label-to-count multiset for one (table, attribute) pair.
///
/// Built by exact string-equality grouping over a column; counts always sum
/// to the row count of the source column, sentinel categories included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeObservations {
    counts: HashMap<String, u64>,
}

impl AttributeObservations {
    /// Create an empty observation set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count occurrences of each distinct value in a column.
    pub fn from_column(values: &[String]) -> Self {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for value in values {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of distinct labels (richness S).
    pub fn richness(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Count for a single label, 0 if unobserved.
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Iterate over (label, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(label, &count)| (label.as_str(), count))
    }

    /// Labels sorted descending by count, ties broken alphabetically.
    ///
    /// Used when persisting label breakdowns so output is deterministic.
    pub fn sorted_entries(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Absorb another observation set by adding counts per label.
    ///
    /// Merging is associative and commutative, so a databank-wide set can be
    /// folded from per-study sets in any order.
    pub fn merge(&mut self, other: &AttributeObservations) {
        for (label, count) in other.iter() {
            *self.counts.entry(label.to_string()).or_insert(0) += count;
        }
    }

    /// True when no label has been observed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for AttributeObservations {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
