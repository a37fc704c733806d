//! Core domain types
//!
//! This module contains the core domain structures used across Gantry crates.
//! These types represent the launcher's fundamental entities: the image
//! recipe, the resource-constrained execution request, and the job outcome.

pub mod image;
pub mod job;
pub mod request;
