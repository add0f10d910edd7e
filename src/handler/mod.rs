//! Request handler module
//!
//! Dispatches incoming requests through the route table and turns page
//! results into HTTP responses.

pub mod router;

// Re-export main entry point
pub use router::handle_request;
