//! Service Boundaries
//!
//! Trait seams for the two remote collaborators: the analysis service
//! that computes the chart, and the place resolver that hands back an
//! external search link. The app and the integration tests program
//! against the traits; the HTTP implementations live alongside.

mod analysis;
mod places;

pub use analysis::HttpAnalysisClient;
pub use places::HttpPlaceResolver;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AnalysisResult, BirthDetails, PlaceSearch};

/// Errors crossing the service boundary. The `Display` text of the
/// variant is what the Failed state shows to the user, verbatim.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// Computes a full analysis from validated birth details.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, details: &BirthDetails) -> Result<AnalysisResult, ServiceError>;
}

/// Resolves a free-text place name to an external search reference.
/// Failures here degrade the form, they never block submission.
#[async_trait]
pub trait PlaceResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<PlaceSearch, ServiceError>;
}
