//! Driven adapters backing the application ports.

mod memory;
mod system;

pub use memory::InMemoryMeteringPointRepository;
pub use system::{AllowAll, SystemClock};
