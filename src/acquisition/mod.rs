pub mod cycle;
pub mod snapshot;

pub use cycle::run_cycle;
pub use snapshot::{RegisterOutcome, Snapshot};
