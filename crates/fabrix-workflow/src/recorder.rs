//! Keyed store of task results.

use std::collections::HashMap;

/// Append-only keyed store of task outcomes.
///
/// Results are looked up by task name, but insertion order is preserved so
/// that enumeration at report time is deterministic. Writing a name twice
/// overwrites the previous value; the name keeps its original position.
#[derive(Debug, Default)]
pub struct TaskRecorder {
  order: Vec<String>,
  results: HashMap<String, serde_json::Value>,
}

impl TaskRecorder {
  /// Create an empty recorder.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a task result, overwriting any prior entry with the same name.
  pub fn put(&mut self, name: &str, result: serde_json::Value) {
    if self.results.insert(name.to_string(), result).is_none() {
      self.order.push(name.to_string());
    }
  }

  /// Look up a recorded result by task name.
  ///
  /// `None` means the task has not executed yet. Halt evaluators must
  /// treat a missing result as "not yet checked", never as a failure.
  pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
    self.results.get(name)
  }

  /// Enumerate all recorded results in insertion order.
  ///
  /// Each name appears exactly once, with its most recent value.
  pub fn snapshot(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
    self.order.iter().filter_map(|name| {
      self
        .results
        .get(name)
        .map(|value| (name.as_str(), value))
    })
  }

  /// Number of recorded tasks.
  pub fn len(&self) -> usize {
    self.order.len()
  }

  /// Whether no task has been recorded yet.
  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }
}
