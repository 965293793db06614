//! Postflow Core
//!
//! Core types shared by the Postflow services.
//!
//! This crate contains:
//! - Domain types: pipeline requests, workflow results, history entries
//! - DTOs: wire bodies exchanged with the generation agents and the gateway

pub mod domain;
pub mod dto;
