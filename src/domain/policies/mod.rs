//! Time-window and cross-entity policies shared across use cases.

mod effective_date;
mod reading_periodicity;

pub use effective_date::EffectiveDatePolicy;
pub use reading_periodicity::ReadingPeriodicityOfChildMustMatchParent;
