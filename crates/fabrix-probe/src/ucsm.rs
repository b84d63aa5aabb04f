//! Compute system manager (UCS Manager) version probe.
//!
//! UCS Manager speaks an XML API on a single endpoint. The two documents
//! we touch are flat, attribute-only elements, so the responses are read
//! with a plain attribute scan instead of a full XML parser.

use async_trait::async_trait;
use fabrix_workflow::{Probe, ProbeError};
use reqwest::Client;

use crate::client::{check_status, transport_error};

/// Queries UCS Manager for its running system firmware version.
pub struct UcsmProbe {
  address: String,
  username: String,
  password: String,
  client: Client,
}

impl UcsmProbe {
  pub fn new(address: &str, username: &str, password: &str, client: Client) -> Self {
    Self {
      address: address.to_string(),
      username: username.to_string(),
      password: password.to_string(),
      client,
    }
  }

  async fn post_xml(&self, payload: String) -> Result<String, ProbeError> {
    let url = format!("https://{}/nuova", self.address);
    let response = self
      .client
      .post(&url)
      .header("Content-Type", "application/xml")
      .body(payload)
      .send()
      .await
      .map_err(transport_error)?;

    check_status(response)?
      .text()
      .await
      .map_err(|e| ProbeError::invalid_response(format!("unreadable response body: {}", e)))
  }
}

#[async_trait]
impl Probe for UcsmProbe {
  async fn call(&self) -> Result<serde_json::Value, ProbeError> {
    let login = format!(
      "<aaaLogin inName=\"{}\" inPassword=\"{}\" />",
      self.username, self.password
    );
    let login_body = self.post_xml(login).await?;
    let cookie = xml_attr(&login_body, "outCookie")
      .filter(|token| !token.is_empty())
      .ok_or_else(|| ProbeError::auth("login response carried no session cookie"))?
      .to_string();

    let resolve = format!(
      "<configResolveDn cookie=\"{}\" dn=\"sys/mgmt/fw-system\" inHierarchical=\"false\" />",
      cookie
    );
    let resolve_body = self.post_xml(resolve).await?;

    let version = xml_attr(&resolve_body, "version")
      .ok_or_else(|| ProbeError::invalid_response("no version attribute in firmware document"))?;

    Ok(serde_json::Value::String(version.to_string()))
  }
}

/// First occurrence of `name="value"` in an XML document.
fn xml_attr<'a>(document: &'a str, name: &str) -> Option<&'a str> {
  let needle = format!("{}=\"", name);
  let start = document.find(&needle)? + needle.len();
  let rest = &document[start..];
  rest.find('"').map(|end| &rest[..end])
}
