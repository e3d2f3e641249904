use thiserror::Error;

#[derive(Error, Debug)]
pub enum PollError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Communication error: {0}")]
    Read(String),

    #[error("CRC checksum mismatch")]
    Crc,

    #[error("Device exception response: code 0x{0:02X}")]
    Exception(u8),

    #[error("Invalid response from device")]
    InvalidResponse,

    #[error("Malformed reading: {0}")]
    MalformedReading(String),

    #[error("Timeout occurred")]
    Timeout,

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Lock acquisition failed")]
    Lock,
}

impl From<serde_json::Error> for PollError {
    fn from(err: serde_json::Error) -> Self {
        PollError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for PollError {
    fn from(err: std::io::Error) -> Self {
        PollError::Read(format!("IO error: {}", err))
    }
}
