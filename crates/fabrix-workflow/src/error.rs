//! Workflow and probe errors.

/// Classification of a probe fault, surfaced in the run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
  /// Could not reach the endpoint.
  Connect,
  /// The endpoint did not answer in time.
  Timeout,
  /// The endpoint rejected the credentials.
  Auth,
  /// The endpoint answered with something we could not interpret.
  InvalidResponse,
  /// Anything else.
  Other,
}

impl std::fmt::Display for ProbeErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      ProbeErrorKind::Connect => "Connect",
      ProbeErrorKind::Timeout => "Timeout",
      ProbeErrorKind::Auth => "Auth",
      ProbeErrorKind::InvalidResponse => "InvalidResponse",
      ProbeErrorKind::Other => "Other",
    };
    f.write_str(s)
  }
}

/// A fault raised while invoking an endpoint probe.
///
/// Always fatal to the run. Carries a kind and a message so the failure
/// diagnostic in the report stays useful to operators; the message is
/// never parsed by callers.
#[derive(Debug, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ProbeError {
  pub kind: ProbeErrorKind,
  pub message: String,
}

impl ProbeError {
  pub fn new(kind: ProbeErrorKind, message: impl Into<String>) -> Self {
    Self {
      kind,
      message: message.into(),
    }
  }

  pub fn connect(message: impl Into<String>) -> Self {
    Self::new(ProbeErrorKind::Connect, message)
  }

  pub fn timeout(message: impl Into<String>) -> Self {
    Self::new(ProbeErrorKind::Timeout, message)
  }

  pub fn auth(message: impl Into<String>) -> Self {
    Self::new(ProbeErrorKind::Auth, message)
  }

  pub fn invalid_response(message: impl Into<String>) -> Self {
    Self::new(ProbeErrorKind::InvalidResponse, message)
  }

  pub fn other(message: impl Into<String>) -> Self {
    Self::new(ProbeErrorKind::Other, message)
  }
}

/// Errors that can abort a workflow run.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
  /// A probe fault escaped task execution.
  #[error("probe fault in task '{task}': {source}")]
  ProbeFault {
    task: String,
    #[source]
    source: ProbeError,
  },

  /// The final report could not be rendered.
  #[error("report rendering failed: {message}")]
  Reporting { message: String },
}

impl WorkflowError {
  /// Short classification used in the failure diagnostic.
  pub fn kind(&self) -> String {
    match self {
      WorkflowError::ProbeFault { source, .. } => source.kind.to_string(),
      WorkflowError::Reporting { .. } => "Reporting".to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_probe_error_display() {
    let err = ProbeError::timeout("connection timed out after 30s");
    assert_eq!(err.to_string(), "Timeout: connection timed out after 30s");
  }

  #[test]
  fn test_workflow_error_carries_task_name() {
    let err = WorkflowError::ProbeFault {
      task: "F5Ver-10.0.0.5".to_string(),
      source: ProbeError::connect("no route to host"),
    };
    assert!(err.to_string().contains("F5Ver-10.0.0.5"));
    assert_eq!(err.kind(), "Connect");
  }
}
