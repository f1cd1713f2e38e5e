//! Template renderer adapters.

mod engine;
mod filters;

pub use engine::TeraRenderer;
