use std::time::Duration;

/// Transport settings shared by all probes.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
  /// Per-request timeout. A hung endpoint blocks the whole run, so this
  /// is the only bound on a single probe call.
  pub timeout: Duration,
}

impl Default for ProbeSettings {
  fn default() -> Self {
    Self {
      timeout: Duration::from_secs(30),
    }
  }
}
