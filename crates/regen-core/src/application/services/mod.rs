//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "regenerate every output for every entity".

pub mod generate_service;

pub use generate_service::{FileReport, GenerateService, GenerationReport};
