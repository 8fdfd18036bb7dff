//! Pure derivations over the trade and psychology histories. Everything in
//! here is recomputed on demand from the full record collections; nothing
//! is cached or incrementally maintained.

pub mod equity;
pub mod performance;
pub mod streaks;

pub use equity::{EquityPoint, EquityReport};
pub use performance::PerformanceReport;
