//! Subway data models, types, and traits.

pub mod line;
pub mod request;
pub mod sections;
pub mod traits;
pub mod types;

// Re-exports for convenience
pub use line::Line;
pub use request::SectionRegistrationRequest;
pub use sections::Sections;
pub use traits::LineRepository;
pub use types::{DistanceViolation, Result, Section, SectionError, Station, TopologyViolation};
