#![deny(missing_docs)]
//! # ar-coordinator — routing decision makers
//!
//! [`DefaultCoordinator`] is the orchestrator's fallback when no
//! registered agent advertises coordinator capability: it matches the
//! incoming message against a legacy [`RoutingRule`] list and fails with
//! `NoRoute` if nothing matches, so a turn never silently misroutes for
//! lack of a coordinator. [`KeywordCoordinator`] is a small reference
//! implementation that routes by matching the incoming message against
//! per-agent capability keywords — no model call, useful for tests and
//! for deployments that don't need LLM-driven routing.

pub mod default_coordinator;
pub mod keyword;

pub use default_coordinator::{DefaultCoordinator, RoutingRule};
pub use keyword::KeywordCoordinator;
