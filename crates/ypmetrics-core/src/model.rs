//! Metric wire model.
//!
//! `Metric` is the JSON document exchanged on the structured surface and sent
//! by the agent. `delta` and `value` are optional so that an absent field can
//! be told apart from an explicit zero; exactly one of them is meaningful for a
//! given `type`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};

/// The two disjoint metric namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gauge" => Ok(MetricKind::Gauge),
            "counter" => Ok(MetricKind::Counter),
            other => Err(MetricsError::InvalidKind(other.to_string())),
        }
    }
}

/// A typed metric value: gauges carry `f64`, counters carry `i64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Gauge(f64),
    Counter(i64),
}

impl MetricValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::Gauge(_) => MetricKind::Gauge,
            MetricValue::Counter(_) => MetricKind::Counter,
        }
    }

    /// Parse the decimal text form used by the path-encoded surface.
    ///
    /// `NaN` and the infinities are rejected: they have no JSON form and
    /// would make the snapshot file unreadable.
    pub fn parse(kind: MetricKind, raw: &str) -> Result<Self> {
        match kind {
            MetricKind::Gauge => {
                let v = raw
                    .parse::<f64>()
                    .map_err(|e| MetricsError::Parse(format!("invalid gauge value {raw:?}: {e}")))?;
                if !v.is_finite() {
                    return Err(MetricsError::Parse(format!("gauge value {raw:?} is not finite")));
                }
                Ok(MetricValue::Gauge(v))
            }
            MetricKind::Counter => raw
                .parse::<i64>()
                .map(MetricValue::Counter)
                .map_err(|e| MetricsError::Parse(format!("invalid counter value {raw:?}: {e}"))),
        }
    }
}

/// Plain-text rendering: gauges with six decimals, counters as integers.
impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Gauge(v) => write!(f, "{v:.6}"),
            MetricValue::Counter(v) => write!(f, "{v}"),
        }
    }
}

/// Structured metric document (field name `type` in JSON).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Metric {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub mtype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Reserved integrity field, currently unused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// A validated write request decoded from a `Metric`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricUpdate {
    pub id: String,
    pub value: MetricValue,
}

impl Metric {
    pub fn gauge(id: impl Into<String>, value: f64) -> Self {
        Self::from_value(id, MetricValue::Gauge(value))
    }

    pub fn counter(id: impl Into<String>, delta: i64) -> Self {
        Self::from_value(id, MetricValue::Counter(delta))
    }

    pub fn from_value(id: impl Into<String>, value: MetricValue) -> Self {
        let mut m = Metric {
            id: id.into(),
            mtype: value.kind().as_str().to_string(),
            ..Default::default()
        };
        match value {
            MetricValue::Gauge(v) => m.value = Some(v),
            MetricValue::Counter(d) => m.delta = Some(d),
        }
        m
    }

    /// Validate the document as a write.
    ///
    /// Order: empty id or unknown type first, then the payload field the type
    /// requires.
    pub fn into_update(self) -> Result<MetricUpdate> {
        let kind = self.checked_kind()?;
        let value = match kind {
            MetricKind::Gauge => self
                .value
                .map(MetricValue::Gauge)
                .ok_or_else(|| MetricsError::InvalidData("value required for gauge".into()))?,
            MetricKind::Counter => self
                .delta
                .map(MetricValue::Counter)
                .ok_or_else(|| MetricsError::InvalidData("delta required for counter".into()))?,
        };
        Ok(MetricUpdate { id: self.id, value })
    }

    /// Kind of a read request. Unknown types surface as `InvalidKind`.
    pub fn kind(&self) -> Result<MetricKind> {
        self.mtype.parse()
    }

    fn checked_kind(&self) -> Result<MetricKind> {
        if self.id.is_empty() {
            return Err(MetricsError::InvalidData("invalid metric data".into()));
        }
        self.kind()
            .map_err(|_| MetricsError::InvalidData("invalid metric data".into()))
    }
}
