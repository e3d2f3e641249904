use clap::ArgMatches;
use log::info;

use crate::services::PollService;
use crate::utils::error::PollError;

/// Handle one-shot subcommands that need a connected service. Returns true
/// when a subcommand ran and the process should exit instead of polling.
pub async fn handle_subcommands(
    matches: &ArgMatches,
    service: &PollService,
) -> Result<bool, PollError> {
    if matches.subcommand_matches("getdata").is_some() {
        info!("🔍 Executing getdata command...");

        let snapshot = service.acquire_once().await;
        println!("{}", snapshot.to_json()?);

        return Ok(true);
    }

    Ok(false)
}

/// Enumerate serial ports; needs no device connection.
pub fn list_ports() -> Result<(), PollError> {
    let ports = serialport::available_ports()
        .map_err(|e| PollError::Connection(format!("Port enumeration failed: {}", e)))?;

    if ports.is_empty() {
        println!("⚠️  No serial ports found");
        return Ok(());
    }

    println!("📡 Available Serial Ports:");
    for (index, port) in ports.iter().enumerate() {
        println!("   {}. {}", index + 1, port.port_name);
        if let serialport::SerialPortType::UsbPort(usb_info) = &port.port_type {
            if let Some(manufacturer) = &usb_info.manufacturer {
                println!("      Manufacturer: {}", manufacturer);
            }
            if let Some(serial_number) = &usb_info.serial_number {
                println!("      Serial Number: {}", serial_number);
            }
        }
    }

    Ok(())
}
