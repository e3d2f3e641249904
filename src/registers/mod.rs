pub mod catalog;
pub mod decode;

pub use catalog::{RegisterDescriptor, WordSize, CATALOG};
pub use decode::{decode, Measurement, Scalar};
