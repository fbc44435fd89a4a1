//! Domain models for the Sustainability Impact Dashboard

mod equivalents;
mod impact;
mod projection;
mod series;
mod snapshot;

pub use equivalents::*;
pub use impact::*;
pub use projection::*;
pub use series::*;
pub use snapshot::*;
