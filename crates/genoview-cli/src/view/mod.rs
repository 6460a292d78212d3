//! Presentation controllers
//!
//! Terminal-independent state for the browse session. Commands drive these
//! controllers and hand them to [`crate::render`] for display.

pub mod analysis;
pub mod assembly;
pub mod gene;
pub mod request;

pub use analysis::{KnownVariantMatch, VariantAnalysisForm};
pub use assembly::{AssemblyBrowser, SearchMode};
pub use gene::{validate_range, GeneViewer};
pub use request::{Panel, RequestTracker, Ticket};
