//! Domain Services
//!
//! Domain logic that spans several entities and needs repository access.

mod conflict_detector;

pub use conflict_detector::*;
