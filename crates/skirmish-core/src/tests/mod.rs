//! Test module for determinism and integration tests.
//!
//! - **Determinism tests**: the same seed replays a round exactly
//! - **Integration tests**: turn order, turn hooks and round end working
//!   together on a zone
//! - **Helpers**: scripted random sources, recording listeners and scenario
//!   builders shared with the unit tests of every module
//!
//! # Test Structure
//!
//! - `determinism.rs`: seeded replays
//! - `integration.rs`: end-to-end rounds
//! - `helpers.rs`: test setup utilities and factory functions

mod determinism;
pub(crate) mod helpers;
