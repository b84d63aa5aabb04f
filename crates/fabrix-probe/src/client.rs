//! Shared http plumbing for the vendor probes.

use fabrix_workflow::ProbeError;
use reqwest::{Client, Response, StatusCode};

use crate::settings::ProbeSettings;

/// Build the http client shared by all probes.
///
/// Infrastructure endpoints almost universally present self-signed
/// certificates, so verification is disabled, matching how the endpoints
/// are actually deployed.
pub(crate) fn build_client(settings: &ProbeSettings) -> Result<Client, reqwest::Error> {
  Client::builder()
    .danger_accept_invalid_certs(true)
    .timeout(settings.timeout)
    .build()
}

/// Map a transport error into the probe fault taxonomy.
pub(crate) fn transport_error(e: reqwest::Error) -> ProbeError {
  if e.is_timeout() {
    ProbeError::timeout(e.to_string())
  } else if e.is_connect() {
    ProbeError::connect(e.to_string())
  } else {
    ProbeError::other(e.to_string())
  }
}

/// Reject non-success responses, classifying credential rejections.
pub(crate) fn check_status(response: Response) -> Result<Response, ProbeError> {
  let status = response.status();
  if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
    return Err(ProbeError::auth(format!(
      "endpoint rejected credentials ({})",
      status
    )));
  }
  if !status.is_success() {
    return Err(ProbeError::invalid_response(format!(
      "unexpected status {}",
      status
    )));
  }
  Ok(response)
}
