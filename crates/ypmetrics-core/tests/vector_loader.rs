//! JSON test vector loader for structured-surface documents.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub body: BodyData,
    #[serde(default)]
    pub expect: Option<serde_json::Value>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BodyData {
    pub encoding: String,
    pub data: serde_json::Value,
}

impl BodyData {
    /// Request body bytes as a client would send them.
    pub fn decode(&self) -> String {
        match self.encoding.as_str() {
            "json" => self.data.to_string(),
            "text" => self
                .data
                .as_str()
                .expect("text body must be a string")
                .to_string(),
            other => panic!("unsupported encoding: {other}"),
        }
    }
}
