//! VedicAI Terminal Client
//!
//! A terminal front end for the VedicAI analysis service:
//! - Birth-details form with validation and normalization
//! - Single-request analysis workflow (explicit state machine)
//! - Fixed-layout North Indian chart rendering
//! - Tabbed presentation of chart, doshas, dasha, and panchang views

pub mod app;
pub mod chart;
pub mod form;
pub mod models;
pub mod present;
pub mod services;
pub mod workflow;

// Re-exports for convenience
pub use form::{validate, RawBirthInput, ValidationError};
pub use models::{AnalysisResult, BirthDetails};
pub use present::{present, RenderedView, ViewId};
pub use workflow::{AnalysisWorkflow, WorkflowState};
