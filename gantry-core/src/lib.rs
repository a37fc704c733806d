//! Gantry Core
//!
//! Core types and abstractions for the Gantry remote job launcher.
//!
//! This crate contains:
//! - Domain types: Core business entities (ImageSpec, ResourceRequest, JobResult)
//! - DTOs: Data transfer objects for communication with the execution platform

pub mod domain;
pub mod dto;
