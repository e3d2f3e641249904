pub mod senders;

pub use senders::{ConsoleSender, DataSender, HttpSender};
