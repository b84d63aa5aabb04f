//! Per-task halt policy.
//!
//! Halt conditions are evaluated by the orchestrating logic after each
//! task, against the result the task just recorded. They are policy, not
//! engine internals: each step carries its own check, preserving the
//! per-endpoint-kind asymmetry (some kinds hard-stop on a bad version,
//! others only warn because the upstream field is not reliably populated).

use serde::{Deserialize, Serialize};

/// Halt reason used by version checks.
pub const VER_CHECK_FAILED: &str = "Ver Check Failed";

/// Whether a violated check stops the run or only logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyMode {
  /// Violation halts the run.
  Enforce,
  /// Violation is logged and the run continues.
  Advisory,
}

/// Minimum-length check on a recorded version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCheck {
  pub min_len: usize,
  pub mode: PolicyMode,
}

/// Outcome of evaluating a check against a recorded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
  Pass,
  /// Violation under `Advisory` mode; the run continues.
  SoftFail,
  /// Violation under `Enforce` mode; the run halts.
  HardFail,
}

impl VersionCheck {
  pub fn enforce(min_len: usize) -> Self {
    Self {
      min_len,
      mode: PolicyMode::Enforce,
    }
  }

  pub fn advisory(min_len: usize) -> Self {
    Self {
      min_len,
      mode: PolicyMode::Advisory,
    }
  }

  /// Evaluate this check against a recorded result.
  ///
  /// A missing result means the task has not executed yet ("not yet
  /// checked") and passes. A non-string result cannot be length-checked
  /// and is at most a soft failure, never a hard stop.
  pub fn evaluate(&self, recorded: Option<&serde_json::Value>) -> CheckOutcome {
    let Some(value) = recorded else {
      return CheckOutcome::Pass;
    };
    let Some(version) = value.as_str() else {
      return CheckOutcome::SoftFail;
    };
    if version.len() >= self.min_len {
      return CheckOutcome::Pass;
    }
    match self.mode {
      PolicyMode::Enforce => CheckOutcome::HardFail,
      PolicyMode::Advisory => CheckOutcome::SoftFail,
    }
  }
}
