//! In-memory metric store.
//!
//! Two strictly typed tables backed by `DashMap`:
//! - `gauges`: name -> f64, last write wins
//! - `counters`: name -> i64, additive
//!
//! A counter's read-modify-write happens while holding the shard write guard
//! returned by `entry()`, so concurrent deltas to the same name never get lost.
//! Writes to different names only contend when they hash to the same shard.

use std::collections::BTreeMap;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};
use crate::model::{MetricKind, MetricValue};

/// Full table contents at an instant; the unit of persistence.
///
/// Names are kept sorted so dumps and saved files are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub gauges: BTreeMap<String, f64>,
    #[serde(default)]
    pub counters: BTreeMap<String, i64>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty() && self.counters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.gauges.len() + self.counters.len()
    }
}

#[derive(Debug, Default)]
pub struct MetricStore {
    gauges: DashMap<String, f64>,
    counters: DashMap<String, i64>,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a gauge.
    pub fn update_gauge(&self, name: &str, value: f64) {
        self.gauges.insert(name.to_string(), value);
    }

    /// Add `delta` to a counter (starting from zero) and return the new total.
    ///
    /// The total saturates at the `i64` bounds instead of wrapping.
    pub fn update_counter(&self, name: &str, delta: i64) -> i64 {
        let mut total = self.counters.entry(name.to_string()).or_insert(0);
        let next = total.saturating_add(delta);
        *total = next;
        next
    }

    /// Apply a typed update and return the post-update value.
    ///
    /// Both ingestion surfaces go through here.
    pub fn apply(&self, name: &str, value: MetricValue) -> MetricValue {
        match value {
            MetricValue::Gauge(v) => {
                self.update_gauge(name, v);
                MetricValue::Gauge(v)
            }
            MetricValue::Counter(d) => MetricValue::Counter(self.update_counter(name, d)),
        }
    }

    pub fn get(&self, kind: MetricKind, name: &str) -> Option<MetricValue> {
        match kind {
            MetricKind::Gauge => self.gauges.get(name).map(|v| MetricValue::Gauge(*v)),
            MetricKind::Counter => self.counters.get(name).map(|v| MetricValue::Counter(*v)),
        }
    }

    /// Point lookup by kind string.
    ///
    /// Fails with `InvalidKind` for an unknown kind and `NotFound` on a miss.
    pub fn lookup(&self, kind: &str, name: &str) -> Result<MetricValue> {
        let kind: MetricKind = kind.parse()?;
        self.get(kind, name)
            .ok_or_else(|| MetricsError::not_found(kind, name))
    }

    /// Copy both tables. Later writes never alter the returned snapshot.
    pub fn dump_all(&self) -> Snapshot {
        Snapshot {
            gauges: self
                .gauges
                .iter()
                .map(|r| (r.key().clone(), *r.value()))
                .collect(),
            counters: self
                .counters
                .iter()
                .map(|r| (r.key().clone(), *r.value()))
                .collect(),
        }
    }

    /// Load a snapshot through the regular update paths.
    ///
    /// Gauges overwrite. Counters are added to whatever is already stored, so
    /// loading into a non-empty store accumulates instead of replacing.
    /// Returns the number of entries applied.
    pub fn load_snapshot(&self, snapshot: Snapshot) -> usize {
        let n = snapshot.len();
        for (name, value) in snapshot.gauges {
            self.update_gauge(&name, value);
        }
        for (name, delta) in snapshot.counters {
            self.update_counter(&name, delta);
        }
        n
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty() && self.counters.is_empty()
    }
}
