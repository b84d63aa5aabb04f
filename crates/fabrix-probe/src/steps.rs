//! Verification step building.
//!
//! Turns an endpoint registry into the fixed verification sequence: the
//! primary-site compute manager first, then every fabric controller,
//! compute system manager, load balancer and virtualization manager, in
//! sorted site order so the task sequence is stable run to run.

use std::collections::HashMap;
use std::sync::Arc;

use fabrix_config::{CredentialEndpoints, RegistryDef};
use fabrix_workflow::{VerificationStep, VersionCheck, task_name};
use tracing::debug;

use crate::apic::ApicProbe;
use crate::client::build_client;
use crate::error::SetupError;
use crate::f5::F5Probe;
use crate::settings::ProbeSettings;
use crate::ucsd::UcsdProbe;
use crate::ucsm::UcsmProbe;
use crate::vcenter::VcenterProbe;

/// The compute manager check keeps its unsuffixed name; there is exactly
/// one primary endpoint per run.
const COMPUTE_MANAGER_TASK: &str = "UcsdVer";

const FABRIC_CONTROLLER_LABEL: &str = "ApicVer";
const SYSTEM_MANAGER_LABEL: &str = "UCSMVer";
const LOAD_BALANCER_LABEL: &str = "F5Ver";
const VIRT_MANAGER_LABEL: &str = "vCenterVer";

/// Build the full verification sequence for one run.
///
/// Per-kind halt policy: the compute manager halts on a version of four
/// characters or fewer; compute system managers, load balancers and
/// virtualization managers halt below four characters; fabric
/// controllers are advisory-only because their version attribute is not
/// reliably populated upstream.
pub fn build_steps(
  registry: &RegistryDef,
  settings: &ProbeSettings,
) -> Result<Vec<VerificationStep>, SetupError> {
  let client = build_client(settings)?;
  let mut steps = Vec::new();

  let (address, api_key) = registry.primary_compute_manager()?;
  steps.push(VerificationStep::new(
    COMPUTE_MANAGER_TASK,
    Arc::new(UcsdProbe::new(address, api_key, client.clone())),
    VersionCheck::enforce(5),
  ));

  for (address, creds) in sorted_endpoints(&registry.apic) {
    steps.push(VerificationStep::new(
      task_name(FABRIC_CONTROLLER_LABEL, address),
      Arc::new(ApicProbe::new(
        address,
        &creds.username,
        &creds.password,
        client.clone(),
      )),
      VersionCheck::advisory(4),
    ));
  }

  for (address, creds) in sorted_endpoints(&registry.ucsm) {
    steps.push(VerificationStep::new(
      task_name(SYSTEM_MANAGER_LABEL, address),
      Arc::new(UcsmProbe::new(
        address,
        &creds.username,
        &creds.password,
        client.clone(),
      )),
      VersionCheck::enforce(4),
    ));
  }

  for (address, creds) in sorted_endpoints(&registry.f5) {
    steps.push(VerificationStep::new(
      task_name(LOAD_BALANCER_LABEL, address),
      Arc::new(F5Probe::new(
        address,
        &creds.username,
        &creds.password,
        client.clone(),
      )),
      VersionCheck::enforce(4),
    ));
  }

  for (address, creds) in sorted_endpoints(&registry.vcenter) {
    steps.push(VerificationStep::new(
      task_name(VIRT_MANAGER_LABEL, address),
      Arc::new(VcenterProbe::new(
        address,
        &creds.username,
        &creds.password,
        client.clone(),
      )),
      VersionCheck::enforce(4),
    ));
  }

  debug!(steps = steps.len(), "verification steps built");
  Ok(steps)
}

/// Flatten site groups into (address, credentials) pairs in sorted site
/// order, preserving the address order within each site.
fn sorted_endpoints(
  groups: &HashMap<String, CredentialEndpoints>,
) -> Vec<(&str, &CredentialEndpoints)> {
  let mut sites: Vec<_> = groups.keys().collect();
  sites.sort();

  let mut endpoints = Vec::new();
  for site in sites {
    let creds = &groups[site];
    for address in &creds.addresses {
      endpoints.push((address.as_str(), creds));
    }
  }
  endpoints
}

#[cfg(test)]
mod tests {
  use super::*;
  use fabrix_workflow::PolicyMode;

  fn fixture() -> RegistryDef {
    RegistryDef::from_json(
      r#"{
        "primary_site": "LND",
        "ucsd": {
          "LND": { "addresses": ["10.1.0.10"], "api_key": "0A1B2C3D" },
          "FRK": { "addresses": ["10.2.0.10"], "api_key": "FF00FF00" }
        },
        "apic": {
          "LND": { "addresses": ["10.1.0.2", "10.1.0.3"], "username": "admin", "password": "s" },
          "FRK": { "addresses": ["10.2.0.2"], "username": "admin", "password": "s" }
        },
        "ucsm": {
          "LND": { "addresses": ["10.1.0.20"], "username": "admin", "password": "s" }
        },
        "f5": {
          "LND": { "addresses": ["10.1.0.30"], "username": "admin", "password": "s" }
        },
        "vcenter": {
          "LND": { "addresses": ["10.1.0.40"], "username": "admin", "password": "s" }
        }
      }"#,
    )
    .unwrap()
  }

  #[test]
  fn test_reference_order_and_names() {
    let steps = build_steps(&fixture(), &ProbeSettings::default()).unwrap();
    let names: Vec<_> = steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
      names,
      vec![
        "UcsdVer",
        "ApicVer-10.2.0.2",
        "ApicVer-10.1.0.2",
        "ApicVer-10.1.0.3",
        "UCSMVer-10.1.0.20",
        "F5Ver-10.1.0.30",
        "vCenterVer-10.1.0.40",
      ]
    );
  }

  #[test]
  fn test_per_kind_policy() {
    let steps = build_steps(&fixture(), &ProbeSettings::default()).unwrap();

    let by_name = |name: &str| steps.iter().find(|s| s.name == name).unwrap();
    assert_eq!(by_name("UcsdVer").check, VersionCheck::enforce(5));
    assert_eq!(
      by_name("ApicVer-10.1.0.2").check.mode,
      PolicyMode::Advisory
    );
    assert_eq!(by_name("UCSMVer-10.1.0.20").check, VersionCheck::enforce(4));
    assert_eq!(by_name("F5Ver-10.1.0.30").check, VersionCheck::enforce(4));
    assert_eq!(
      by_name("vCenterVer-10.1.0.40").check,
      VersionCheck::enforce(4)
    );
  }

  #[test]
  fn test_unknown_primary_site_is_a_setup_error() {
    let mut registry = fixture();
    registry.primary_site = "NYC".to_string();
    assert!(matches!(
      build_steps(&registry, &ProbeSettings::default()),
      Err(SetupError::Config(_))
    ));
  }
}
