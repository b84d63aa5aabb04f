//! Workflow execution engine.
//!
//! The `WorkflowEngine` owns the task recorder, the run status and the
//! failure diagnostic for exactly one run. It executes probe tasks one at
//! a time, records every result, and renders the final report. Concurrent
//! runs must use independent engine instances.

use tracing::{error, info, instrument};

use crate::error::WorkflowError;
use crate::probe::Probe;
use crate::recorder::TaskRecorder;
use crate::report::{FailureDiagnostic, WorkflowReport};
use crate::status::RunStatus;

/// Single-run workflow engine.
#[derive(Debug, Default)]
pub struct WorkflowEngine {
  recorder: TaskRecorder,
  status: RunStatus,
  current_task: Option<String>,
  halt_reason: Option<String>,
  failure: Option<FailureDiagnostic>,
}

impl WorkflowEngine {
  /// Create a new engine in the `Running` state with an empty recorder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Current run status.
  pub fn status(&self) -> RunStatus {
    self.status
  }

  /// Read access to the recorder, for halt-condition evaluation.
  pub fn recorder(&self) -> &TaskRecorder {
    &self.recorder
  }

  /// Name of the task in flight, if any.
  pub fn current_task(&self) -> Option<&str> {
    self.current_task.as_deref()
  }

  /// Execute one named task: invoke the probe and record its result.
  ///
  /// The task name is marked as in flight before the probe runs and
  /// cleared on success, so a mid-task fault is attributable in the
  /// report. A same-name entry is overwritten (later write wins). On a
  /// probe fault nothing is recorded for the task and the fault is
  /// returned for the supervisory boundary to convert into `Failed`.
  #[instrument(name = "task_execute", skip(self, probe), fields(task = %name))]
  pub async fn run_task(
    &mut self,
    name: &str,
    probe: &dyn Probe,
  ) -> Result<&serde_json::Value, WorkflowError> {
    self.current_task = Some(name.to_string());
    info!("task_started");

    let value = probe.call().await.map_err(|e| {
      error!(error = %e, "task_failed");
      WorkflowError::ProbeFault {
        task: name.to_string(),
        source: e,
      }
    })?;

    self.recorder.put(name, value);
    self.current_task = None;
    info!("task_completed");

    Ok(self.recorder.get(name).expect("result recorded above"))
  }

  /// Intentional early termination: `Running -> Halted`.
  ///
  /// Not an error. Settable only between task executions by the
  /// orchestrating logic. No-op once the run is terminal.
  pub fn halt(&mut self, reason: impl Into<String>) {
    if self.status.is_terminal() {
      return;
    }
    let reason = reason.into();
    info!(reason = %reason, "workflow_halted");
    self.halt_reason = Some(reason);
    self.status = RunStatus::Halted;
  }

  /// Unhandled fault: `Running -> Failed`.
  ///
  /// Captures the fault kind, message and the task in flight. No-op once
  /// the run is terminal, so whichever terminal outcome is detected first
  /// wins.
  pub fn fail(&mut self, cause: &WorkflowError) {
    if self.status.is_terminal() {
      return;
    }
    error!(error = %cause, "workflow_failed");
    self.failure = Some(FailureDiagnostic {
      task: self.current_task.clone(),
      kind: cause.kind(),
      error: cause.to_string(),
    });
    self.status = RunStatus::Failed;
  }

  /// All tasks executed without halt or failure: `Running -> Complete`.
  pub fn complete(&mut self) {
    if self.status.is_terminal() {
      return;
    }
    self.current_task = None;
    info!(tasks = self.recorder.len(), "workflow_completed");
    self.status = RunStatus::Complete;
  }

  /// Snapshot the run into a report. Callable from any state, including
  /// before any task ran.
  pub fn report(&self) -> WorkflowReport {
    WorkflowReport {
      status: self.status,
      tasks: self
        .recorder
        .snapshot()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect(),
      halt_reason: self.halt_reason.clone(),
      failure: self.failure.clone(),
    }
  }

  /// Render the final report. Never fails: falls back to a minimal
  /// status-only object if the full report cannot be serialized.
  pub fn output(&self) -> String {
    self.report().render_lossy()
  }
}
