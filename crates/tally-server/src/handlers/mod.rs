//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod filters;
pub mod goals;
pub mod health;
pub mod profile;
pub mod spending;
pub mod transactions;

// Re-export all handlers for use in router
pub use filters::*;
pub use goals::*;
pub use health::*;
pub use profile::*;
pub use spending::*;
pub use transactions::*;
