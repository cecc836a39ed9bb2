//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod date_range;
mod page;
mod reservation_status;

pub use date_range::*;
pub use page::*;
pub use reservation_status::*;
