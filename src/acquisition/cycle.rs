//! Per-cycle register acquisition with per-register failure isolation.

use log::{info, warn};

use super::snapshot::{RegisterOutcome, Snapshot};
use crate::modbus::client::ModbusClientTrait;
use crate::registers::catalog::RegisterDescriptor;
use crate::registers::decode::decode;

/// Read every catalog register once, in catalog order, against the given
/// link. A failed register is recorded and skipped, never aborting the rest
/// of the cycle; the returned snapshot always holds one entry per
/// descriptor. The timestamp is captured once at entry.
pub async fn run_cycle(
    link: &dyn ModbusClientTrait,
    catalog: &[RegisterDescriptor],
) -> Snapshot {
    let mut snapshot = Snapshot::now();
    info!("🔄 Acquisition cycle started ({} registers)", catalog.len());

    for desc in catalog {
        let outcome = match link.read_words(desc.address, desc.word_count()).await {
            Ok(words) => match decode(&words, desc) {
                Ok(measurement) => {
                    info!("  📈 {}: {} {}", desc.name, measurement.value, desc.unit);
                    RegisterOutcome::Value(measurement)
                }
                Err(e) => {
                    warn!("  ⚠️  Decode failed for '{}': {}", desc.name, e);
                    RegisterOutcome::Failed(e)
                }
            },
            Err(e) => {
                warn!("  ⚠️  Read failed for '{}': {}", desc.name, e);
                RegisterOutcome::Failed(e)
            }
        };
        snapshot.push(desc.name, outcome);
    }

    info!(
        "📊 Cycle complete: {}/{} registers read",
        snapshot.len() - snapshot.failed_count(),
        snapshot.len()
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::catalog::{RegisterDescriptor, WordSize, CATALOG};
    use crate::registers::decode::Scalar;
    use crate::utils::error::PollError;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};

    struct FakeLink {
        responses: HashMap<u16, Vec<u16>>,
        failing: HashSet<u16>,
    }

    impl FakeLink {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                failing: HashSet::new(),
            }
        }

        fn respond(mut self, addr: u16, words: Vec<u16>) -> Self {
            self.responses.insert(addr, words);
            self
        }

        fn fail(mut self, addr: u16) -> Self {
            self.failing.insert(addr);
            self
        }
    }

    #[async_trait]
    impl ModbusClientTrait for FakeLink {
        async fn read_words(&self, start_addr: u16, _count: u16) -> Result<Vec<u16>, PollError> {
            if self.failing.contains(&start_addr) {
                return Err(PollError::Timeout);
            }
            self.responses
                .get(&start_addr)
                .cloned()
                .ok_or(PollError::InvalidResponse)
        }
    }

    fn reg(name: &'static str, address: u16, size: WordSize) -> RegisterDescriptor {
        RegisterDescriptor {
            name,
            address,
            size,
            signed: false,
            scale: 1.0,
            unit: "kPa",
        }
    }

    #[tokio::test]
    async fn test_single_register_end_to_end() {
        let catalog = [reg("OIL_PRESSURE", 1024, WordSize::U16)];
        let link = FakeLink::new().respond(1024, vec![0x0064]);

        let snapshot = run_cycle(&link, &catalog).await;

        assert_eq!(snapshot.len(), 1);
        let outcome = snapshot.get("OIL_PRESSURE").unwrap();
        assert_eq!(outcome.measurement().unwrap().value, Scalar::Int(100));
    }

    #[tokio::test]
    async fn test_read_timeout_becomes_null_entry() {
        let catalog = [reg("OIL_PRESSURE", 1024, WordSize::U16)];
        let link = FakeLink::new().fail(1024);

        let snapshot = run_cycle(&link, &catalog).await;

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get("OIL_PRESSURE").unwrap().is_failed());
        assert!(snapshot.to_json().unwrap().contains("\"OIL_PRESSURE\":null"));
    }

    #[tokio::test]
    async fn test_partial_failures_do_not_abort_cycle() {
        let catalog = [
            reg("A", 100, WordSize::U16),
            reg("B", 101, WordSize::U16),
            reg("C", 102, WordSize::U16),
            reg("D", 103, WordSize::U16),
        ];
        let link = FakeLink::new()
            .fail(100)
            .respond(101, vec![11])
            .fail(102)
            .respond(103, vec![13]);

        let snapshot = run_cycle(&link, &catalog).await;

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.failed_count(), 2);
        assert!(snapshot.get("A").unwrap().is_failed());
        assert_eq!(
            snapshot.get("B").unwrap().measurement().unwrap().value,
            Scalar::Int(11)
        );
        assert!(snapshot.get("C").unwrap().is_failed());
        assert_eq!(
            snapshot.get("D").unwrap().measurement().unwrap().value,
            Scalar::Int(13)
        );
    }

    #[tokio::test]
    async fn test_short_reading_recorded_as_failure() {
        // Link returns a single word where the descriptor expects two
        let catalog = [reg("RUN_TIME", 1798, WordSize::U32)];
        let link = FakeLink::new().respond(1798, vec![0x0001]);

        let snapshot = run_cycle(&link, &catalog).await;

        let outcome = snapshot.get("RUN_TIME").unwrap();
        assert!(matches!(
            outcome,
            RegisterOutcome::Failed(PollError::MalformedReading(_))
        ));
    }

    #[tokio::test]
    async fn test_full_catalog_always_fully_populated() {
        let mut link = FakeLink::new();
        for desc in CATALOG {
            link.responses
                .insert(desc.address, vec![0; desc.word_count() as usize]);
        }

        let snapshot = run_cycle(&link, CATALOG).await;

        assert_eq!(snapshot.len(), CATALOG.len());
        assert_eq!(snapshot.failed_count(), 0);
        for desc in CATALOG {
            assert!(snapshot.get(desc.name).is_some());
        }
    }
}
