//! End-to-end runner scenarios: complete, halted and failed runs.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use fabrix_workflow::{
  Probe, ProbeError, RunStatus, VerificationStep, VersionCheck, WorkflowRunner, task_name,
};
use serde_json::json;

/// Probe returning a fixed value, counting how often it was invoked.
struct StaticProbe {
  value: serde_json::Value,
  calls: Arc<AtomicUsize>,
}

impl StaticProbe {
  fn new(value: serde_json::Value) -> (Self, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    (
      Self {
        value,
        calls: calls.clone(),
      },
      calls,
    )
  }
}

#[async_trait]
impl Probe for StaticProbe {
  async fn call(&self) -> Result<serde_json::Value, ProbeError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Ok(self.value.clone())
  }
}

struct TimeoutProbe;

#[async_trait]
impl Probe for TimeoutProbe {
  async fn call(&self) -> Result<serde_json::Value, ProbeError> {
    Err(ProbeError::timeout("connection timed out after 30s"))
  }
}

fn step(name: &str, value: serde_json::Value, check: VersionCheck) -> VerificationStep {
  let (probe, _) = StaticProbe::new(value);
  VerificationStep::new(name, Arc::new(probe), check)
}

#[tokio::test]
async fn test_all_probes_succeed_run_completes_with_every_result() {
  let names = [
    "UcsdVer",
    "ApicVer-10.0.0.2",
    "UCSMVer-10.0.0.3",
    "F5Ver-10.0.0.5",
    "vCenterVer-10.0.0.9",
  ];
  let steps = names
    .iter()
    .map(|name| step(name, json!("v1.2.3"), VersionCheck::enforce(4)))
    .collect();

  let report = WorkflowRunner::new(steps).run().await;

  assert_eq!(report.status, RunStatus::Complete);
  assert_eq!(report.tasks.len(), names.len());
  for name in names {
    assert_eq!(report.tasks.get(name), Some(&json!("v1.2.3")));
  }
  assert!(report.halt_reason.is_none());
  assert!(report.failure.is_none());
}

#[tokio::test]
async fn test_enforced_empty_version_halts_and_skips_later_steps() {
  let (late_probe, late_calls) = StaticProbe::new(json!("15.1.0"));
  let steps = vec![
    step("UcsdVer", json!("6.7.4.0"), VersionCheck::enforce(5)),
    // Compute system manager comes back empty: hard stop.
    step("UCSMVer-10.0.0.3", json!(""), VersionCheck::enforce(4)),
    VerificationStep::new(
      "F5Ver-10.0.0.5",
      Arc::new(late_probe),
      VersionCheck::enforce(4),
    ),
  ];

  let report = WorkflowRunner::new(steps).run().await;

  assert_eq!(report.status, RunStatus::Halted);
  assert_eq!(report.halt_reason.as_deref(), Some("Ver Check Failed"));
  // Everything up to and including the halting task is recorded.
  assert_eq!(report.tasks.len(), 2);
  assert_eq!(report.tasks.get("UcsdVer"), Some(&json!("6.7.4.0")));
  assert_eq!(report.tasks.get("UCSMVer-10.0.0.3"), Some(&json!("")));
  // The step after the halt never executed.
  assert_eq!(late_calls.load(Ordering::SeqCst), 0);
  assert!(!report.tasks.contains_key("F5Ver-10.0.0.5"));
}

#[tokio::test]
async fn test_advisory_empty_version_continues_to_completion() {
  let steps = vec![
    step("UcsdVer", json!("6.7.4.0"), VersionCheck::enforce(5)),
    // Fabric controller version is unreliable upstream: warn only.
    step("ApicVer-10.0.0.2", json!(""), VersionCheck::advisory(4)),
    step("F5Ver-10.0.0.5", json!("15.1.0"), VersionCheck::enforce(4)),
  ];

  let report = WorkflowRunner::new(steps).run().await;

  assert_eq!(report.status, RunStatus::Complete);
  assert_eq!(report.tasks.len(), 3);
  assert_eq!(report.tasks.get("ApicVer-10.0.0.2"), Some(&json!("")));
}

#[tokio::test]
async fn test_probe_fault_fails_the_run_and_skips_later_steps() {
  let (late_probe, late_calls) = StaticProbe::new(json!("6.7.0"));
  let steps = vec![
    step("UcsdVer", json!("6.7.4.0"), VersionCheck::enforce(5)),
    VerificationStep::new(
      "F5Ver-10.0.0.5",
      Arc::new(TimeoutProbe),
      VersionCheck::enforce(4),
    ),
    VerificationStep::new(
      "vCenterVer-10.0.0.9",
      Arc::new(late_probe),
      VersionCheck::enforce(4),
    ),
  ];

  let report = WorkflowRunner::new(steps).run().await;

  assert_eq!(report.status, RunStatus::Failed);
  // No entry for a task that never returned.
  assert_eq!(report.tasks.len(), 1);
  assert!(!report.tasks.contains_key("F5Ver-10.0.0.5"));
  assert_eq!(late_calls.load(Ordering::SeqCst), 0);

  let failure = report.failure.expect("failed run carries a diagnostic");
  assert_eq!(failure.task.as_deref(), Some("F5Ver-10.0.0.5"));
  assert_eq!(failure.kind, "Timeout");
  assert!(failure.error.contains("timed out"));
}

#[tokio::test]
async fn test_empty_sequence_completes_with_empty_report() {
  let report = WorkflowRunner::new(Vec::new()).run().await;
  assert_eq!(report.status, RunStatus::Complete);
  assert!(report.tasks.is_empty());
}

#[tokio::test]
async fn test_per_endpoint_steps_generated_in_a_loop_do_not_collide() {
  let addresses = ["10.0.0.2", "10.0.0.3", "10.0.0.4"];
  let steps = addresses
    .iter()
    .map(|addr| {
      step(
        &task_name("ApicVer", addr),
        json!("4.2(3l)"),
        VersionCheck::advisory(4),
      )
    })
    .collect();

  let report = WorkflowRunner::new(steps).run().await;

  assert_eq!(report.status, RunStatus::Complete);
  assert_eq!(report.tasks.len(), addresses.len());
  for addr in addresses {
    assert!(report.tasks.contains_key(&task_name("ApicVer", addr)));
  }
}

#[tokio::test]
async fn test_report_renders_with_sorted_keys_and_four_space_indent() {
  let steps = vec![
    step("vCenterVer-10.0.0.9", json!("6.7.0"), VersionCheck::enforce(4)),
    step("ApicVer-10.0.0.2", json!("4.2(3l)"), VersionCheck::advisory(4)),
  ];

  let report = WorkflowRunner::new(steps).run().await;
  let rendered = report.render().unwrap();

  assert!(rendered.contains("    \"status\": \"Complete\""));
  let apic = rendered.find("ApicVer").unwrap();
  let vcenter = rendered.find("vCenterVer").unwrap();
  assert!(apic < vcenter);
}
