//! Virtualization manager (vCenter) version probe.

use async_trait::async_trait;
use fabrix_workflow::{Probe, ProbeError};
use reqwest::Client;

use crate::client::{check_status, transport_error};

/// Queries the vCenter appliance REST API for its version.
pub struct VcenterProbe {
  address: String,
  username: String,
  password: String,
  client: Client,
}

impl VcenterProbe {
  pub fn new(address: &str, username: &str, password: &str, client: Client) -> Self {
    Self {
      address: address.to_string(),
      username: username.to_string(),
      password: password.to_string(),
      client,
    }
  }

  async fn create_session(&self) -> Result<String, ProbeError> {
    let url = format!("https://{}/rest/com/vmware/cis/session", self.address);
    let response = self
      .client
      .post(&url)
      .basic_auth(&self.username, Some(&self.password))
      .send()
      .await
      .map_err(transport_error)?;

    let body: serde_json::Value = check_status(response)?
      .json()
      .await
      .map_err(|e| ProbeError::invalid_response(format!("invalid session response: {}", e)))?;

    body
      .get("value")
      .and_then(serde_json::Value::as_str)
      .map(str::to_string)
      .ok_or_else(|| ProbeError::auth("session response carried no token"))
  }
}

#[async_trait]
impl Probe for VcenterProbe {
  async fn call(&self) -> Result<serde_json::Value, ProbeError> {
    let session = self.create_session().await?;

    let url = format!("https://{}/rest/appliance/system/version", self.address);
    let response = self
      .client
      .get(&url)
      .header("vmware-api-session-id", session)
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
    .pointer("/value/version")
    .and_then(serde_json::Value::as_str)
    .map(|version| serde_json::Value::String(version.to_string()))
    .ok_or_else(|| ProbeError::invalid_response("missing version in appliance document"))
}
