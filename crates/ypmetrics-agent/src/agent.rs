//! The agent's two loops.
//!
//! - poll: sample runtime gauges and `RandomValue` into the buffer, bump
//!   `PollCount`
//! - report: send every buffered metric, one request each
//!
//! The loops share only the buffer and run on independent intervals. A slow
//! report cycle means some gauge samples are overwritten before they are sent.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use ypmetrics_core::Metric;

use crate::buffer::{MetricBuffer, POLL_COUNT, RANDOM_VALUE};
use crate::config::AgentConfig;
use crate::runtime_stats::RuntimeSampler;
use crate::sink::MetricSink;

/// Outcome of one report cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    pub sent: usize,
    pub failed: usize,
}

pub struct Agent {
    poll_every: Duration,
    report_every: Duration,
    buffer: Mutex<MetricBuffer>,
    sink: Arc<dyn MetricSink>,
}

impl Agent {
    pub fn new(cfg: &AgentConfig, sink: Arc<dyn MetricSink>) -> Self {
        Self::with_intervals(cfg.poll_every(), cfg.report_every(), sink)
    }

    pub fn with_intervals(poll_every: Duration, report_every: Duration, sink: Arc<dyn MetricSink>) -> Self {
        Self {
            poll_every,
            report_every,
            buffer: Mutex::new(MetricBuffer::new()),
            sink,
        }
    }

    fn buffer(&self) -> MutexGuard<'_, MetricBuffer> {
        // A panic mid-update leaves at worst a stale sample; keep going.
        self.buffer.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Copy of what the next report cycle would send.
    pub fn pending(&self) -> Vec<Metric> {
        self.buffer().pending()
    }

    /// Take one sample into the buffer.
    pub fn poll_once(&self, sampler: &mut RuntimeSampler) {
        let samples = sampler.sample();
        let random: f64 = rand::random();

        let mut buf = self.buffer();
        for (name, value) in samples {
            buf.set_gauge(name, value);
        }
        buf.set_gauge(RANDOM_VALUE, random);
        buf.add_counter(POLL_COUNT, 1);
    }

    /// Send every buffered metric once. Failures are logged and skipped.
    pub async fn report_once(&self) -> ReportSummary {
        let batch = self.pending();
        let mut summary = ReportSummary::default();

        for metric in batch {
            match self.sink.send(&metric).await {
                Ok(()) => {
                    summary.sent += 1;
                    if let Some(delta) = metric.delta {
                        self.buffer().ack_counter(&metric.id, delta);
                    }
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::warn!(id = %metric.id, error = %e, "error sending metric");
                }
            }
        }

        tracing::debug!(sent = summary.sent, failed = summary.failed, "report cycle done");
        summary
    }

    /// Run both loops until the task is dropped.
    pub async fn run(self: Arc<Self>) {
        let poller = Arc::clone(&self);
        let poll = tokio::spawn(async move { poller.poll_loop().await });
        let reporter = Arc::clone(&self);
        let report = tokio::spawn(async move { reporter.report_loop().await });

        let _ = tokio::join!(poll, report);
    }

    async fn poll_loop(&self) {
        let mut sampler = RuntimeSampler::new();
        let mut tick = interval_at(Instant::now() + self.poll_every, self.poll_every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            self.poll_once(&mut sampler);
        }
    }

    async fn report_loop(&self) {
        let mut tick = interval_at(Instant::now() + self.report_every, self.report_every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            self.report_once().await;
        }
    }
}
