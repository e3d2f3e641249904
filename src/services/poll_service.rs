use log::{error, info};
use std::sync::Arc;
use tokio::time::{interval, Duration};

use crate::acquisition::{run_cycle, Snapshot};
use crate::config::Config;
use crate::modbus::ModbusClient;
use crate::output::{ConsoleSender, DataSender, HttpSender};
use crate::registers::CATALOG;
use crate::utils::error::PollError;

/// Drives the acquisition/delivery loop at a fixed cadence. Owns the serial
/// link exclusively for the process lifetime; the link is released when the
/// service is dropped.
pub struct PollService {
    config: Config,
    client: Arc<ModbusClient>,
    senders: Vec<Box<dyn DataSender>>,
}

impl PollService {
    /// Connects the serial link. This is the only fatal failure path: if the
    /// port cannot be opened, no cycle ever runs.
    pub fn new(config: Config) -> Result<Self, PollError> {
        info!("🚀 Initializing generator telemetry service");
        info!("📋 Register catalog: {} entries", CATALOG.len());

        let client = ModbusClient::new(
            &config.serial_port,
            config.baud_rate,
            &config.parity,
            config.slave_address,
            config.timeout_ms,
        )?;

        let mut senders: Vec<Box<dyn DataSender>> = Vec::new();
        if let Some(http) = config.http_output.as_ref().filter(|h| h.enabled) {
            senders.push(Box::new(HttpSender::new(
                http.endpoint.clone(),
                http.timeout_seconds,
            )));
        }
        if config.console_output {
            senders.push(Box::new(ConsoleSender));
        }

        info!(
            "📤 Output destinations: {}",
            senders
                .iter()
                .map(|s| format!("{}({})", s.sender_type(), s.destination()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(Self {
            config,
            client: Arc::new(client),
            senders,
        })
    }

    /// One acquisition pass over the full catalog.
    pub async fn acquire_once(&self) -> Snapshot {
        run_cycle(self.client.as_ref(), CATALOG).await
    }

    async fn deliver(&self, snapshot: &Snapshot) {
        let payload = match snapshot.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                error!("❌ Failed to serialize snapshot: {}", e);
                return;
            }
        };

        let (sent, failed) = broadcast_to(&self.senders, &payload).await;
        if failed > 0 {
            info!("📊 Delivery summary: {} successful, {} failed", sent, failed);
        }
    }

    /// Poll until interrupted. Per-register and delivery failures never stop
    /// the loop; Ctrl-C breaks it between cycles.
    pub async fn run(&self) -> Result<(), PollError> {
        info!(
            "🔁 Polling every {} second(s); press Ctrl+C to stop",
            self.config.poll_interval_seconds
        );

        let mut ticker = interval(Duration::from_secs(self.config.poll_interval_seconds));

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("🛑 Interrupt received, stopping poll loop");
                    break;
                }
                _ = ticker.tick() => {
                    let snapshot = self.acquire_once().await;
                    self.deliver(&snapshot).await;
                }
            }
        }

        info!("🔚 Poll service stopped");
        Ok(())
    }
}

/// Fan a payload out to every sender. Sender failures are logged and counted,
/// never propagated; a dead endpoint must not affect the next cycle.
pub async fn broadcast_to(senders: &[Box<dyn DataSender>], payload: &str) -> (usize, usize) {
    let mut success_count = 0;
    let mut error_count = 0;

    for sender in senders {
        match sender.send(payload).await {
            Ok(_) => {
                info!(
                    "✅ Data sent via {} to {}",
                    sender.sender_type(),
                    sender.destination()
                );
                success_count += 1;
            }
            Err(e) => {
                error!(
                    "❌ Failed to send data via {} to {}: {}",
                    sender.sender_type(),
                    sender.destination(),
                    e
                );
                error_count += 1;
            }
        }
    }

    (success_count, error_count)
}
