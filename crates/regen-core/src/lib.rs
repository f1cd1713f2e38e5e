//! Regen Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the regen
//! schema-driven code generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            regen-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (GenerateService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (SchemaSource, TemplateStore, Render,   │
//! │              Filesystem)                │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     regen-adapters (Infrastructure)     │
//! │ (YamlSchemaSource, TeraRenderer, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Entity, naming, sections, MergeEngine) │
//! │          No I/O of any kind             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use regen_core::{application::GenerateService, domain::GenerationPlan};
//!
//! // Adapters come from regen-adapters
//! let service = GenerateService::new(schemas, templates, renderer, filesystem);
//! let report = service.generate(&plan)?;
//! println!("{} files changed", report.changed_count());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FileReport, GenerateService, GenerationReport,
        ports::{Filesystem, SchemaSource, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        Attribute, AttributeKind, Entity, FunctionTable, GenerationPlan, MarkerSyntax,
        MergeEngine, MergeStrategy, OutputKind, RenderInput, TemplateText,
    };
    pub use crate::error::{RegenError, RegenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
