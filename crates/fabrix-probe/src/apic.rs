//! Fabric controller (APIC) version probe.

use async_trait::async_trait;
use fabrix_workflow::{Probe, ProbeError};
use reqwest::Client;
use serde_json::json;

use crate::client::{check_status, transport_error};

/// Queries an APIC for its running controller firmware version.
///
/// Logs in for a session token, then reads the controller firmware
/// class. Some APIC releases do not populate the version attribute; in
/// that case the probe returns an empty string rather than failing, and
/// the (advisory) halt policy decides what to do with it.
pub struct ApicProbe {
  address: String,
  username: String,
  password: String,
  client: Client,
}

impl ApicProbe {
  pub fn new(address: &str, username: &str, password: &str, client: Client) -> Self {
    Self {
      address: address.to_string(),
      username: username.to_string(),
      password: password.to_string(),
      client,
    }
  }

  async fn login(&self) -> Result<String, ProbeError> {
    let url = format!("https://{}/api/aaaLogin.json", self.address);
    let body = json!({
      "aaaUser": {
        "attributes": { "name": self.username, "pwd": self.password }
      }
    });
    let response = self
      .client
      .post(&url)
      .json(&body)
      .send()
      .await
      .map_err(transport_error)?;

    let body: serde_json::Value = check_status(response)?
      .json()
      .await
      .map_err(|e| ProbeError::invalid_response(format!("invalid login response: {}", e)))?;

    body
      .pointer("/imdata/0/aaaLogin/attributes/token")
      .and_then(serde_json::Value::as_str)
      .map(str::to_string)
      .ok_or_else(|| ProbeError::auth("login response carried no session token"))
  }
}

#[async_trait]
impl Probe for ApicProbe {
  async fn call(&self) -> Result<serde_json::Value, ProbeError> {
    let token = self.login().await?;

    let url = format!("https://{}/api/class/firmwareCtrlrRunning.json", self.address);
    let response = self
      .client
      .get(&url)
      .header("Cookie", format!("APIC-cookie={}", token))
      .send()
      .await
      .map_err(transport_error)?;

    let body: serde_json::Value = check_status(response)?
      .json()
      .await
      .map_err(|e| ProbeError::invalid_response(format!("invalid JSON body: {}", e)))?;

    Ok(extract_version(&body))
  }
}

fn extract_version(body: &serde_json::Value) -> serde_json::Value {
  let version = body
    .pointer("/imdata/0/firmwareCtrlrRunning/attributes/version")
    .and_then(serde_json::Value::as_str)
    .unwrap_or("");
  serde_json::Value::String(version.to_string())
}
