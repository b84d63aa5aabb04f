//! Fabrix Probe
//!
//! Vendor glue for fabrix: one thin "get version" probe per endpoint
//! kind, plus [`build_steps`] which turns an endpoint registry into the
//! fixed verification sequence the workflow runner executes. Probes are
//! deliberately small; all run semantics live in `fabrix-workflow`.

mod apic;
mod client;
mod error;
mod f5;
mod settings;
mod steps;
mod ucsd;
mod ucsm;
mod vcenter;

pub use apic::ApicProbe;
pub use error::SetupError;
pub use f5::F5Probe;
pub use settings::ProbeSettings;
pub use steps::build_steps;
pub use ucsd::UcsdProbe;
pub use ucsm::UcsmProbe;
pub use vcenter::VcenterProbe;
