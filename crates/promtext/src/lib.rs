//! Top-level facade crate for promtext.
//!
//! Re-exports the exposition core and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use promtext_core::*;
}

pub mod gateway {
    pub use promtext_gateway::*;
}
