//! Per-model success and failure counters.

use dashmap::DashMap;
use legalswami_types::ModelStats;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModelCounters {
    pub success: u64,
    /// Consecutive failures; cleared by a success
    pub failures: u64,
}

/// Counters keyed by model name. Each update is atomic per entry.
#[derive(Debug, Default)]
pub struct ModelStatsTracker {
    counters: DashMap<String, ModelCounters>,
}

impl ModelStatsTracker {
    pub fn new(models: &[String]) -> Self {
        let counters = DashMap::with_capacity(models.len());
        for model in models {
            counters.insert(model.clone(), ModelCounters::default());
        }
        Self { counters }
    }

    pub fn record_success(&self, model: &str) {
        let mut entry = self.counters.entry(model.to_string()).or_default();
        entry.success += 1;
        entry.failures = 0;
    }

    pub fn record_failure(&self, model: &str) -> u64 {
        let mut entry = self.counters.entry(model.to_string()).or_default();
        entry.failures += 1;
        entry.failures
    }

    pub fn reset_failures(&self) {
        for mut entry in self.counters.iter_mut() {
            entry.failures = 0;
        }
    }

    pub fn get(&self, model: &str) -> ModelCounters {
        self.counters.get(model).map(|c| *c).unwrap_or_default()
    }

    /// Snapshot in the order of `models`.
    pub fn snapshot(&self, models: &[String]) -> Vec<ModelStats> {
        models
            .iter()
            .map(|model| {
                let counters = self.get(model);
                ModelStats {
                    model: model.clone(),
                    success: counters.success,
                    failures: counters.failures,
                }
            })
            .collect()
    }
}
