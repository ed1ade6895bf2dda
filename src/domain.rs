//! Domain module - cruise entities, output records and service traits
//!
//! Modern Rust module organization (Rust 2018+ style):
//! - Each module is its own file in the domain/ directory
//! - Public exports are defined here for convenience

pub mod cruise;
pub mod record;
pub mod services;

pub use cruise::{Cruise, DateEntry, Itinerary, Sailing};
pub use record::{NormalizedDate, NormalizedRecord};
pub use services::PageFetcher;
