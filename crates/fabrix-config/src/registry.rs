//! Endpoint registry definition.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Endpoints that authenticate with an API key (the compute manager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyEndpoints {
  pub addresses: Vec<String>,
  pub api_key: String,
}

/// Endpoints that authenticate with a username and password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialEndpoints {
  pub addresses: Vec<String>,
  pub username: String,
  pub password: String,
}

/// The full endpoint registry, grouped by site label per endpoint kind.
///
/// The compute manager check runs against the first address of the
/// `primary_site` only; every other kind is checked at every configured
/// address across all sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryDef {
  /// Site whose compute manager anchors the run (e.g. "LND").
  pub primary_site: String,
  /// Compute manager (orchestration REST API), keyed by site.
  pub ucsd: HashMap<String, ApiKeyEndpoints>,
  /// Fabric controllers, keyed by site.
  pub apic: HashMap<String, CredentialEndpoints>,
  /// Compute system managers, keyed by site.
  pub ucsm: HashMap<String, CredentialEndpoints>,
  /// Load balancers, keyed by site.
  pub f5: HashMap<String, CredentialEndpoints>,
  /// Virtualization managers, keyed by site.
  pub vcenter: HashMap<String, CredentialEndpoints>,
}

impl RegistryDef {
  /// Parse a registry from a JSON string.
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  /// Read and parse a registry file.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Self::from_json(&content)
  }

  /// The compute manager endpoint for the primary site.
  pub fn primary_compute_manager(&self) -> Result<(&str, &str), ConfigError> {
    let group = self
      .ucsd
      .get(&self.primary_site)
      .ok_or_else(|| ConfigError::UnknownPrimarySite {
        site: self.primary_site.clone(),
      })?;
    let address = group.addresses.first().ok_or_else(|| ConfigError::EmptySite {
      kind: "ucsd".to_string(),
      site: self.primary_site.clone(),
    })?;
    Ok((address, &group.api_key))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const FIXTURE: &str = r#"{
    "primary_site": "LND",
    "ucsd": {
      "LND": { "addresses": ["10.1.0.10"], "api_key": "0A1B2C3D" }
    },
    "apic": {
      "LND": { "addresses": ["10.1.0.2", "10.1.0.3"], "username": "admin", "password": "secret" },
      "FRK": { "addresses": ["10.2.0.2"], "username": "admin", "password": "secret" }
    },
    "ucsm": {
      "LND": { "addresses": ["10.1.0.20"], "username": "admin", "password": "secret" }
    },
    "f5": {
      "LND": { "addresses": ["10.1.0.30"], "username": "admin", "password": "secret" }
    },
    "vcenter": {
      "LND": { "addresses": ["10.1.0.40"], "username": "admin@vsphere.local", "password": "secret" }
    }
  }"#;

  #[test]
  fn test_parse_fixture() {
    let registry = RegistryDef::from_json(FIXTURE).unwrap();
    assert_eq!(registry.primary_site, "LND");
    assert_eq!(registry.apic.len(), 2);
    assert_eq!(registry.apic["LND"].addresses.len(), 2);
    assert_eq!(registry.vcenter["LND"].username, "admin@vsphere.local");
  }

  #[test]
  fn test_primary_compute_manager() {
    let registry = RegistryDef::from_json(FIXTURE).unwrap();
    let (address, api_key) = registry.primary_compute_manager().unwrap();
    assert_eq!(address, "10.1.0.10");
    assert_eq!(api_key, "0A1B2C3D");
  }

  #[test]
  fn test_unknown_primary_site() {
    let mut registry = RegistryDef::from_json(FIXTURE).unwrap();
    registry.primary_site = "NYC".to_string();
    assert!(matches!(
      registry.primary_compute_manager(),
      Err(ConfigError::UnknownPrimarySite { .. })
    ));
  }

  #[test]
  fn test_empty_primary_site_addresses() {
    let mut registry = RegistryDef::from_json(FIXTURE).unwrap();
    registry.ucsd.get_mut("LND").unwrap().addresses.clear();
    assert!(matches!(
      registry.primary_compute_manager(),
      Err(ConfigError::EmptySite { .. })
    ));
  }

  #[test]
  fn test_round_trip() {
    let registry = RegistryDef::from_json(FIXTURE).unwrap();
    let json = serde_json::to_string(&registry).unwrap();
    let reparsed = RegistryDef::from_json(&json).unwrap();
    assert_eq!(registry, reparsed);
  }
}
