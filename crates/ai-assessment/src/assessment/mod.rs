//! Assessment-facing plumbing: wizard input, report output, collaborators and HTTP routes.

pub mod fallback;
pub mod narrative;
pub mod report;
pub mod repository;
pub mod router;
pub mod wizard;

pub use router::{assessment_router, AdoptionScoreRequest};
