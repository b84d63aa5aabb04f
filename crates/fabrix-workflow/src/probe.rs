//! The probe seam between the engine and endpoint glue.

use async_trait::async_trait;

use crate::error::ProbeError;

/// A callable that queries one infrastructure endpoint for a status value.
///
/// Probes are supplied by the calling code and invoked by the engine one
/// at a time; the engine treats them uniformly regardless of the endpoint
/// kind behind them. A probe returns any serializable value (typically a
/// version string) or fails with a [`ProbeError`], which aborts the run.
#[async_trait]
pub trait Probe: Send + Sync {
  async fn call(&self) -> Result<serde_json::Value, ProbeError>;
}
