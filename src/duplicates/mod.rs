//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Partitioning file records into duplicate groups ([`group`])
//! - Tracking a review session over those groups ([`Registry`])

pub mod groups;
pub mod registry;

pub use groups::{group, EquivalenceMode, Group, GroupKey, GroupMap, Member};
pub use registry::{DeleteOutcome, Registry, RegistryError};
