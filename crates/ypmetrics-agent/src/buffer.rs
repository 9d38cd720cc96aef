//! Local buffer of pending samples.
//!
//! Gauges keep only the latest sample per name. Counters hold the delta that
//! has not been acknowledged by the collector yet: polling adds to it, a
//! successful send subtracts what was sent.

use std::collections::BTreeMap;

use ypmetrics_core::Metric;

pub const POLL_COUNT: &str = "PollCount";
pub const RANDOM_VALUE: &str = "RandomValue";

#[derive(Debug, Default)]
pub struct MetricBuffer {
    gauges: BTreeMap<String, f64>,
    counters: BTreeMap<String, i64>,
}

impl MetricBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_gauge(&mut self, name: &str, value: f64) {
        self.gauges.insert(name.to_string(), value);
    }

    pub fn add_counter(&mut self, name: &str, delta: i64) {
        let v = self.counters.entry(name.to_string()).or_insert(0);
        *v = v.saturating_add(delta);
    }

    /// Subtract a delta the collector accepted.
    pub fn ack_counter(&mut self, name: &str, sent: i64) {
        if let Some(v) = self.counters.get_mut(name) {
            *v = v.saturating_sub(sent);
        }
    }

    pub fn gauge(&self, name: &str) -> Option<f64> {
        self.gauges.get(name).copied()
    }

    pub fn counter(&self, name: &str) -> Option<i64> {
        self.counters.get(name).copied()
    }

    /// Everything to send this cycle, gauges first, names sorted.
    pub fn pending(&self) -> Vec<Metric> {
        self.gauges
            .iter()
            .map(|(k, v)| Metric::gauge(k.clone(), *v))
            .chain(self.counters.iter().map(|(k, d)| Metric::counter(k.clone(), *d)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.gauges.len() + self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauges_are_last_sample_wins() {
        let mut b = MetricBuffer::new();
        b.set_gauge("Alloc", 1.0);
        b.set_gauge("Alloc", 2.0);
        assert_eq!(b.gauge("Alloc"), Some(2.0));
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn ack_keeps_polls_that_arrived_after_the_send() {
        let mut b = MetricBuffer::new();
        b.add_counter(POLL_COUNT, 1);
        b.add_counter(POLL_COUNT, 1);
        let sent = b.counter(POLL_COUNT).unwrap_or_default();
        b.add_counter(POLL_COUNT, 1);
        b.ack_counter(POLL_COUNT, sent);
        assert_eq!(b.counter(POLL_COUNT), Some(1));
    }

    #[test]
    fn pending_lists_gauges_then_counters() {
        let mut b = MetricBuffer::new();
        b.add_counter(POLL_COUNT, 3);
        b.set_gauge("b", 2.0);
        b.set_gauge("a", 1.0);
        let ids: Vec<_> = b.pending().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b", POLL_COUNT]);
    }
}
