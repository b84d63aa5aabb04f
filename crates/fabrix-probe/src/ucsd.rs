//! Compute manager (UCS Director) version probe.

use async_trait::async_trait;
use fabrix_workflow::{Probe, ProbeError};
use reqwest::Client;

use crate::client::{check_status, transport_error};

/// Queries the UCS Director REST API for its version.
pub struct UcsdProbe {
  address: String,
  api_key: String,
  client: Client,
}

impl UcsdProbe {
  pub fn new(address: &str, api_key: &str, client: Client) -> Self {
    Self {
      address: address.to_string(),
      api_key: api_key.to_string(),
      client,
    }
  }
}

#[async_trait]
impl Probe for UcsdProbe {
  async fn call(&self) -> Result<serde_json::Value, ProbeError> {
    let url = format!(
      "https://{}/app/api/rest?formatType=json&opName=userAPIGetVersion",
      self.address
    );
    let response = self
      .client
      .get(&url)
      .header("X-Cloupia-Request-Key", &self.api_key)
      .send()
      .await
      .map_err(transport_error)?;

    let body: serde_json::Value = check_status(response)?
      .json()
      .await
      .map_err(|e| ProbeError::invalid_response(format!("invalid JSON body: {}", e)))?;

    extract_version(&body)
  }
}

fn extract_version(body: &serde_json::Value) -> Result<serde_json::Value, ProbeError> {
  body
    .get("serviceResult")
    .and_then(serde_json::Value::as_str)
    .map(|version| serde_json::Value::String(version.to_string()))
    .ok_or_else(|| ProbeError::invalid_response("missing serviceResult in version response"))
}
