//! Where reported metrics go.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use ypmetrics_core::net::strip_scheme;
use ypmetrics_core::Metric;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("collector answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// Delivers one metric. Implementations must not retry; the next report
/// cycle resends current values anyway.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn send(&self, metric: &Metric) -> Result<(), ReportError>;
}

/// Posts each metric as JSON to the collector's `/update/` endpoint.
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

impl HttpSink {
    pub fn new(address: &str) -> Result<Self, ReportError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            url: update_url(address),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn update_url(address: &str) -> String {
    let scheme = if address.starts_with("https://") { "https" } else { "http" };
    format!("{scheme}://{}/update/", strip_scheme(address))
}

#[async_trait]
impl MetricSink for HttpSink {
    async fn send(&self, metric: &Metric) -> Result<(), ReportError> {
        let resp = self.client.post(&self.url).json(metric).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ReportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
