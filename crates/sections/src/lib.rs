//! # subway-sections
//!
//! Section chain management for subway lines.
//!
//! ## Features
//!
//! - **Splicing**: New sections extend a line at either end or split an
//!   existing section around a new station
//! - **Terminal removal**: Sections are removed from the down end only
//! - **Derived ordering**: End stations and full station order are derived
//!   from the unordered set of sections
//! - **Pluggable storage**: Implement [`LineRepository`] for your own store
//!
//! ## Example
//!
//! ```
//! use subway_sections::prelude::*;
//!
//! let gangnam = Station::new(1, "Gangnam");
//! let yeoksam = Station::new(2, "Yeoksam");
//! let seolleung = Station::new(3, "Seolleung");
//!
//! let mut line = Line::new(2, "Line 2", "bg-green-600");
//! line.add_section(gangnam.clone(), seolleung.clone(), 10).unwrap();
//!
//! // Lands between Gangnam and Seolleung, splitting that section
//! line.add_section(gangnam.clone(), yeoksam.clone(), 4).unwrap();
//!
//! assert_eq!(line.stations(), vec![gangnam, yeoksam, seolleung]);
//! assert_eq!(line.total_distance(), 10);
//! ```

pub mod identifiers;
pub mod models;
pub mod provider;
pub mod service;

// Re-exports for convenience
pub mod prelude {
    pub use crate::identifiers::*;
    pub use crate::models::{
        line::Line, request::SectionRegistrationRequest, sections::Sections, traits::*, types::*,
    };
    pub use crate::provider::InMemoryLineRepository;
    pub use crate::service::SectionService;
}

pub use prelude::*;
