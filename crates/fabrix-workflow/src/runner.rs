//! Sequential verification runner.
//!
//! The runner drives one workflow run: it executes the configured steps
//! in order, evaluates each step's halt policy against the freshly
//! recorded result, and wraps the whole sequence in a single supervisory
//! boundary that converts any escaped fault into the `Failed` transition.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::engine::WorkflowEngine;
use crate::error::WorkflowError;
use crate::policy::{CheckOutcome, VER_CHECK_FAILED, VersionCheck};
use crate::probe::Probe;
use crate::report::WorkflowReport;

/// Deterministic task name for a per-endpoint check.
///
/// Distinct addresses under one label always yield distinct names.
pub fn task_name(label: &str, address: &str) -> String {
  format!("{}-{}", label, address)
}

/// One unit of the verification sequence: a named probe plus the halt
/// policy applied to its recorded result.
pub struct VerificationStep {
  pub name: String,
  pub probe: Arc<dyn Probe>,
  pub check: VersionCheck,
}

impl VerificationStep {
  pub fn new(name: impl Into<String>, probe: Arc<dyn Probe>, check: VersionCheck) -> Self {
    Self {
      name: name.into(),
      probe,
      check,
    }
  }
}

/// Drives a fixed sequence of verification steps through a fresh engine.
///
/// One runner per run; the engine is not shared across runs.
pub struct WorkflowRunner {
  engine: WorkflowEngine,
  steps: Vec<VerificationStep>,
}

impl WorkflowRunner {
  pub fn new(steps: Vec<VerificationStep>) -> Self {
    Self {
      engine: WorkflowEngine::new(),
      steps,
    }
  }

  /// Run the whole sequence and return the final report.
  ///
  /// Always produces a report, whatever the outcome. This is the only
  /// place that converts faults into the `Failed` transition.
  #[instrument(name = "workflow_run", skip(self), fields(steps = self.steps.len()))]
  pub async fn run(mut self) -> WorkflowReport {
    info!("workflow_started");

    match Self::drive(&mut self.engine, &self.steps).await {
      Ok(()) => {
        // A halt inside the loop already moved the status; anything else
        // ran to the end cleanly.
        self.engine.complete();
      }
      Err(e) => {
        self.engine.fail(&e);
      }
    }

    self.engine.report()
  }

  /// Execute steps in order, halting on the first enforced violation.
  ///
  /// Step N's result is recorded before step N+1 starts, and each check
  /// reads its own step's result back through the recorder.
  async fn drive(
    engine: &mut WorkflowEngine,
    steps: &[VerificationStep],
  ) -> Result<(), WorkflowError> {
    for step in steps {
      engine.run_task(&step.name, step.probe.as_ref()).await?;

      match step.check.evaluate(engine.recorder().get(&step.name)) {
        CheckOutcome::Pass => {}
        CheckOutcome::SoftFail => {
          warn!(task = %step.name, "version check failed (advisory)");
        }
        CheckOutcome::HardFail => {
          engine.halt(VER_CHECK_FAILED);
          return Ok(());
        }
      }
    }
    Ok(())
  }
}
