//! Aura: a deep-research engine for Web3 projects.
//!
//! Given a project name or ticker, Aura composes a prompt from a fixed
//! corpus of research protocols, runs one grounded call against a hosted
//! model, and reconciles the raw response into a structured
//! [`models::ResearchReport`]. The pipeline is resilient by construction:
//! JSON is carved out of whatever prose the model wraps it in, off-schema
//! enum values degrade to an explicit unknown instead of failing the
//! parse, and missing metadata is synthesized locally.
//!
//! The [`engine::ResearchEngine`] is the entry point; it drives the flow
//! asynchronously, narrates cosmetic progress while the model call is
//! outstanding, and publishes outcomes through an
//! [`session::AnalysisSession`] with stale-result gating.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod models;
pub mod pipeline;
pub mod session;

pub use config::EngineConfig;
pub use corpus::ProtocolCorpus;
pub use engine::ResearchEngine;
pub use models::ResearchReport;
pub use pipeline::{AnalysisError, ModelClient, ProgressUpdate};
pub use session::{AnalysisSession, AnalysisState};
