//! Request logger API server library.
//!
//! Exposes the building blocks (config, store bootstrap, state, error
//! handling, the capture handler, router) so integration tests and the binary
//! entrypoint can both access them.

pub mod capture;
pub mod config;
pub mod error;
pub mod response;
pub mod router;
pub mod startup;
pub mod state;
