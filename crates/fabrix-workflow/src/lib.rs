//! Fabrix Workflow
//!
//! This crate provides the workflow engine core for fabrix: a single-run
//! orchestrator that executes an ordered sequence of named probe tasks,
//! records every result into a keyed recorder, evaluates per-task halt
//! policy between tasks, and renders one final JSON report.
//!
//! The engine owns the recorder and the run status for exactly one run.
//! Probes are supplied by the caller through the [`Probe`] trait; the
//! engine treats them uniformly regardless of the endpoint behind them.

mod engine;
mod error;
mod policy;
mod probe;
mod recorder;
mod report;
mod runner;
mod status;

pub use engine::WorkflowEngine;
pub use error::{ProbeError, ProbeErrorKind, WorkflowError};
pub use policy::{CheckOutcome, PolicyMode, VER_CHECK_FAILED, VersionCheck};
pub use probe::Probe;
pub use recorder::TaskRecorder;
pub use report::{FailureDiagnostic, WorkflowReport};
pub use runner::{VerificationStep, WorkflowRunner, task_name};
pub use status::RunStatus;
