pub mod error;

pub use error::PollError;
