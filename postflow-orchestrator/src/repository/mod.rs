//! Repository Module
//!
//! Data access layer for the orchestrator.
//! Completed workflow results are the only persisted entity.

pub mod result;

pub use result::{FileResultStore, ResultStore, StoreError};
