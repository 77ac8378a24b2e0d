//! Filter implementations for the list pipeline.
//!
//! Each filter reads one attribute through an accessor function, so the
//! same five kinds serve every page.

pub mod equality;
pub mod flag;
pub mod membership;
pub mod range;
pub mod search;

// Re-export for convenience
pub use equality::EqualityFilter;
pub use flag::FlagFilter;
pub use membership::MembershipFilter;
pub use range::{Bounds, RangeFilter};
pub use search::SearchFilter;
