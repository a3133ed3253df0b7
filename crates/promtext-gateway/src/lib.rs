//! promtext gateway library entry.
//!
//! Wires config, app state, and the axum router that serves a metrics source
//! in the Prometheus text format. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod ops;
pub mod router;
