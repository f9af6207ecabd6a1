//! Recruitment pipeline domain library.
//!
//! The crate centers on [`store::MockStore`], an in-memory stand-in for the
//! relational backend the product will eventually run against. Queries are
//! pure reads over a static [`store::fixture::Fixture`] snapshot; mutations
//! are simulated and never persist. The accessor signatures are the seam a
//! real database integration must preserve.

pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
