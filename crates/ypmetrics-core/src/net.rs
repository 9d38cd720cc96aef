//! Address helpers shared by the collector and agent configs.

use crate::error::{MetricsError, Result};

/// Drop a leading `http://` or `https://`.
pub fn strip_scheme(addr: &str) -> &str {
    addr.strip_prefix("http://")
        .or_else(|| addr.strip_prefix("https://"))
        .unwrap_or(addr)
}

/// `host:port` with a non-empty host and a numeric port. The host itself is
/// resolved later, at bind or connect time.
pub fn validate_address(addr: &str) -> Result<()> {
    let (host, port) = strip_scheme(addr)
        .rsplit_once(':')
        .ok_or_else(|| MetricsError::InvalidData(format!("address must be host:port, got {addr:?}")))?;
    if host.is_empty() {
        return Err(MetricsError::InvalidData(format!("address has empty host: {addr:?}")));
    }
    port.parse::<u16>()
        .map_err(|_| MetricsError::InvalidData(format!("address has invalid port: {addr:?}")))?;
    Ok(())
}
