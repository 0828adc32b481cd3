//! Programmatic entry points behind the `nextver` binary

pub mod orchestration;

pub use orchestration::{run_version_workflow, VersionWorkflowArgs, WorkflowResult};
