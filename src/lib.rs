//! Generator Telemetry over Modbus RTU
//!
//! This library polls a fixed register map from a diesel generator
//! controller over Modbus RTU, decodes raw register words into scaled
//! physical measurements, and delivers the resulting snapshots to a remote
//! collection endpoint as JSON.

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod modbus;
pub mod output;
pub mod registers;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use acquisition::{run_cycle, RegisterOutcome, Snapshot};
pub use config::Config;
pub use modbus::{ModbusClient, ModbusClientTrait};
pub use output::{ConsoleSender, DataSender, HttpSender};
pub use registers::{decode, Measurement, RegisterDescriptor, Scalar, WordSize, CATALOG};
pub use services::PollService;
pub use utils::error::PollError;

pub const VERSION: &str = "0.1.0";
