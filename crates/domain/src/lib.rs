//! # scenecast-domain
//!
//! Pure domain model for the scenecast scene dispatcher.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Lamps** (addressable light endpoints) and **Zones** (named
//!   groups of lamps)
//! - Define **Scenes** (ordered setting-groups, each naming its target zones)
//! - Define **Command Jobs** (one dispatch attempt per lamp, with its bounded
//!   retry state)
//! - Define the **Scene Catalog** (read-only scene/zone directory handed to
//!   inbound adapters)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod catalog;
pub mod job;
pub mod scene;
pub mod zone;
