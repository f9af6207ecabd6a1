//! Mock database standing in for the future relational backend.
//!
//! The whole dataset is a [`fixture::Fixture`] snapshot loaded once at
//! startup. Accessors filter, join, and aggregate over it; an artificial
//! delay emulates network latency. Simulated writes return detached rows
//! and never touch the snapshot.
//!
//! Migration contract: a real database integration replaces the bodies of
//! the [`MockStore`] methods but keeps their names, parameters, and return
//! shapes so callers do not change.

pub mod activity;
pub mod charts;
pub mod dashboard;
pub mod daterange;
pub mod details;
pub mod domain;
pub mod fixture;
mod mock;
pub mod mutation;
pub mod ranking;

pub use mock::{LatencyProfile, MockStore};
