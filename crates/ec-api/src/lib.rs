//! Event carbon API: library crate for the JSON HTTP server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `ec-e2e-tests`) can reach `AppState`, `build_router` and the
//! extraction chain.

pub mod config;
pub mod error;
pub mod inference;
pub mod routes;
pub mod state;
