//! History Types
//!
//! The time series of population-wide mean strategies, appended by the
//! simulation driver at its sampling cadence.

use serde::{Deserialize, Serialize};

/// Population means at one sampled generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub generation: u64,
    pub mean_offer: f64,
    pub mean_threshold: f64,
}

impl HistorySample {
    pub fn new(generation: u64, mean_offer: f64, mean_threshold: f64) -> Self {
        Self {
            generation,
            mean_offer,
            mean_threshold,
        }
    }
}

/// Ordered sequence of samples, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    samples: Vec<HistorySample>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: HistorySample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&HistorySample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistorySample> {
        self.samples.iter()
    }

    /// Finds the sample recorded at exactly `generation`.
    pub fn at_generation(&self, generation: u64) -> Option<&HistorySample> {
        self.samples.iter().find(|s| s.generation == generation)
    }

    /// Serializes the history to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a history from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistorySample;
    type IntoIter = std::slice::Iter<'a, HistorySample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
