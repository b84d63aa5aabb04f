//! Run status machine.

use serde::{Deserialize, Serialize};

/// Overall status of a workflow run.
///
/// `Running` is the initial state. The other three are terminal: once a
/// run completes, halts or fails, no further transition is possible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
  /// The run is in progress (or has not started yet).
  #[default]
  Running,
  /// All tasks executed, no halt condition fired and nothing failed.
  Complete,
  /// A halt condition fired; an intentional early stop, not an error.
  Halted,
  /// An unhandled fault aborted the run.
  Failed,
}

impl RunStatus {
  /// Whether this status is terminal.
  pub fn is_terminal(&self) -> bool {
    !matches!(self, RunStatus::Running)
  }
}

impl std::fmt::Display for RunStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      RunStatus::Running => "Running",
      RunStatus::Complete => "Complete",
      RunStatus::Halted => "Halted",
      RunStatus::Failed => "Failed",
    };
    f.write_str(s)
  }
}
