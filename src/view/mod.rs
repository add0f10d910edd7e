//! View layer module
//!
//! Owns the per-request view-model, the stateless greeter service exposed to
//! templates, and the renderer that merges a model into a named template.

pub mod greeter;
pub mod model;
pub mod renderer;

// Re-export commonly used types
pub use greeter::Greeter;
pub use model::Model;
pub use renderer::Renderer;

/// Logical template name, resolved by the renderer to a file on disk.
pub type View = &'static str;
