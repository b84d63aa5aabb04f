//! Load balancer (F5 BIG-IP) version probe.

use async_trait::async_trait;
use fabrix_workflow::{Probe, ProbeError};
use reqwest::Client;

use crate::client::{check_status, transport_error};

/// Queries a BIG-IP's iControl REST API for its system version.
pub struct F5Probe {
  address: String,
  username: String,
  password: String,
  client: Client,
}

impl F5Probe {
  pub fn new(address: &str, username: &str, password: &str, client: Client) -> Self {
    Self {
      address: address.to_string(),
      username: username.to_string(),
      password: password.to_string(),
      client,
    }
  }
}

#[async_trait]
impl Probe for F5Probe {
  async fn call(&self) -> Result<serde_json::Value, ProbeError> {
    let url = format!("https://{}/mgmt/tm/sys/version", self.address);
    let response = self
      .client
      .get(&url)
      .basic_auth(&self.username, Some(&self.password))
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
  // The version lives under a single self-link-keyed entry.
  body
    .get("entries")
    .and_then(serde_json::Value::as_object)
    .and_then(|entries| entries.values().next())
    .and_then(|entry| entry.pointer("/nestedStats/entries/Version/description"))
    .and_then(serde_json::Value::as_str)
    .map(|version| serde_json::Value::String(version.to_string()))
    .ok_or_else(|| ProbeError::invalid_response("missing Version entry in sys/version document"))
}
