//! Service Module
//!
//! Business logic layer for the orchestrator.
//! The workflow service drives the agents and hands results to the repository.

pub mod workflow;

pub use workflow::{Orchestrator, WorkflowError};
