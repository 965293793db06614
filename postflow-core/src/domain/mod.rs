//! Core domain types
//!
//! This module contains the domain structures used across Postflow services.
//! The orchestrator produces and persists them, the gateway and CLI read them.

pub mod history;
pub mod workflow;
