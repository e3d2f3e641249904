use async_trait::async_trait;
use log::{debug, error, info, warn};
use serialport::SerialPort;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use super::crc::crc16_modbus;
use crate::config::settings::ParityConfig;
use crate::utils::error::PollError;

const FN_READ_HOLDING_REGISTERS: u8 = 0x03;

/// Quiet period after a request before the RTU response is read.
const TURNAROUND_DELAY_MS: u64 = 50;

#[async_trait]
pub trait ModbusClientTrait: Send + Sync {
    async fn read_words(&self, start_addr: u16, count: u16) -> Result<Vec<u16>, PollError>;
}

/// Modbus RTU master bound to a single slave device for the process lifetime.
pub struct ModbusClient {
    port: Arc<Mutex<Box<dyn SerialPort>>>,
    slave_id: u8,
}

impl ModbusClient {
    pub fn new(
        port_name: &str,
        baud_rate: u32,
        parity: &ParityConfig,
        slave_id: u8,
        timeout_ms: u64,
    ) -> Result<Self, PollError> {
        info!("🔌 Connecting to Modbus RTU port: {}", port_name);
        info!(
            "⚙️  Configuration: {} baud, 8 data bits, 1 stop bit, slave {}",
            baud_rate, slave_id
        );

        let serial_parity = match parity {
            ParityConfig::None => serialport::Parity::None,
            ParityConfig::Even => serialport::Parity::Even,
            ParityConfig::Odd => serialport::Parity::Odd,
        };

        let port = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(timeout_ms))
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serial_parity)
            .open()
            .map_err(|e| {
                error!("❌ Failed to open serial port {}: {}", port_name, e);
                PollError::Connection(format!("Failed to open port: {}", e))
            })?;

        info!("✅ Modbus RTU connection established successfully");
        Ok(Self {
            port: Arc::new(Mutex::new(port)),
            slave_id,
        })
    }
}

impl Drop for ModbusClient {
    fn drop(&mut self) {
        info!("🔌 Serial connection closed");
    }
}

fn read_failure(e: std::io::Error) -> PollError {
    if e.kind() == std::io::ErrorKind::TimedOut {
        PollError::Timeout
    } else {
        PollError::Read(format!("Read failed: {}", e))
    }
}

/// Register payload bytes -> 16-bit words, big-endian within each word.
pub fn words_from_payload(payload: &[u8]) -> Vec<u16> {
    payload
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

#[async_trait]
impl ModbusClientTrait for ModbusClient {
    async fn read_words(&self, start_addr: u16, count: u16) -> Result<Vec<u16>, PollError> {
        debug!(
            "📊 Reading {} register(s) from slave {} starting at address {}",
            count, self.slave_id, start_addr
        );

        let mut request = vec![self.slave_id, FN_READ_HOLDING_REGISTERS];
        request.extend_from_slice(&start_addr.to_be_bytes());
        request.extend_from_slice(&count.to_be_bytes());

        let crc = crc16_modbus(&request);
        request.extend_from_slice(&crc.to_le_bytes());

        debug!("📤 Request frame: {}", hex::encode(&request));

        let mut port = self.port.lock().map_err(|_| PollError::Lock)?;

        port.write_all(&request)
            .map_err(|e| PollError::Read(format!("Write failed: {}", e)))?;
        port.flush()
            .map_err(|e| PollError::Read(format!("Flush failed: {}", e)))?;

        // Wait for the slave turnaround before reading the response
        thread::sleep(Duration::from_millis(TURNAROUND_DELAY_MS));

        let mut header = [0u8; 3];
        port.read_exact(&mut header).map_err(read_failure)?;

        if header[0] != self.slave_id {
            return Err(PollError::InvalidResponse);
        }

        // Exception frame: function code with high bit set, one code byte, CRC
        if header[1] == FN_READ_HOLDING_REGISTERS | 0x80 {
            let mut tail = [0u8; 2];
            port.read_exact(&mut tail).map_err(read_failure)?;

            let received_crc = u16::from_le_bytes(tail);
            if received_crc != crc16_modbus(&header) {
                return Err(PollError::Crc);
            }

            warn!(
                "⚠️  Slave {} rejected read at address {}: exception 0x{:02X}",
                self.slave_id, start_addr, header[2]
            );
            return Err(PollError::Exception(header[2]));
        }

        if header[1] != FN_READ_HOLDING_REGISTERS {
            return Err(PollError::InvalidResponse);
        }

        let byte_count = header[2] as usize;
        if byte_count != count as usize * 2 {
            return Err(PollError::InvalidResponse);
        }

        let mut rest = vec![0u8; byte_count + 2];
        port.read_exact(&mut rest).map_err(read_failure)?;

        let mut frame = header.to_vec();
        frame.extend_from_slice(&rest[..byte_count]);

        let received_crc = u16::from_le_bytes([rest[byte_count], rest[byte_count + 1]]);
        if received_crc != crc16_modbus(&frame) {
            return Err(PollError::Crc);
        }

        debug!("📥 Response payload: {}", hex::encode(&rest[..byte_count]));

        Ok(words_from_payload(&rest[..byte_count]))
    }
}
