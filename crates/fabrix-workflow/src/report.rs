//! Final run report.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::WorkflowError;
use crate::status::RunStatus;

/// Diagnostic context captured when a run fails.
#[derive(Debug, Clone, Serialize)]
pub struct FailureDiagnostic {
  /// Name of the task in flight when the fault occurred, if any.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub task: Option<String>,
  /// Fault classification (probe error kind).
  pub kind: String,
  /// Human-readable fault message. For operator diagnostics only.
  pub error: String,
}

/// Immutable snapshot of a run: final status, every recorded result and
/// optional diagnostic context.
///
/// Serialized with keys sorted lexicographically and 4-space indentation;
/// this is the run's sole externally observable artifact.
#[derive(Debug, Serialize)]
pub struct WorkflowReport {
  pub status: RunStatus,
  pub tasks: BTreeMap<String, serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub halt_reason: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub failure: Option<FailureDiagnostic>,
}

impl WorkflowReport {
  /// Render the report as pretty-printed JSON with 4-space indentation.
  pub fn render(&self) -> Result<String, WorkflowError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    self
      .serialize(&mut ser)
      .map_err(|e| WorkflowError::Reporting {
        message: e.to_string(),
      })?;
    String::from_utf8(buf).map_err(|e| WorkflowError::Reporting {
      message: e.to_string(),
    })
  }

  /// Render the report, falling back to a minimal status-only object if
  /// the full report cannot be serialized. Never fails.
  pub fn render_lossy(&self) -> String {
    self.render().unwrap_or_else(|e| {
      serde_json::json!({
        "status": self.status,
        "report_error": e.to_string(),
      })
      .to_string()
    })
  }
}
