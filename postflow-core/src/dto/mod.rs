//! Data Transfer Objects for inter-service communication
//!
//! This module contains the wire bodies used between Postflow services:
//! - `agent`: the contracts of the external generation agents
//! - `gateway`: the bodies served by the gateway to its callers

pub mod agent;
pub mod gateway;
