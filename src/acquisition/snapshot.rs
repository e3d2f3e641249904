use chrono::Utc;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::registers::decode::Measurement;
use crate::utils::error::PollError;

/// Outcome of a single register acquisition. Failures keep their cause for
/// logging and inspection; they only collapse to JSON null at the
/// serialization boundary.
#[derive(Debug)]
pub enum RegisterOutcome {
    Value(Measurement),
    Failed(PollError),
}

impl RegisterOutcome {
    pub fn measurement(&self) -> Option<&Measurement> {
        match self {
            RegisterOutcome::Value(m) => Some(m),
            RegisterOutcome::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RegisterOutcome::Failed(_))
    }
}

/// One complete acquisition cycle: an entry for every catalog register plus
/// a single timestamp captured at cycle start. Cycle-local, handed to the
/// senders and dropped.
#[derive(Debug)]
pub struct Snapshot {
    pub timestamp: i64,
    readings: Vec<(&'static str, RegisterOutcome)>,
}

impl Snapshot {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            readings: Vec::new(),
        }
    }

    pub fn now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    pub fn push(&mut self, name: &'static str, outcome: RegisterOutcome) {
        self.readings.push((name, outcome));
    }

    pub fn get(&self, name: &str) -> Option<&RegisterOutcome> {
        self.readings
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, outcome)| outcome)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.readings.iter().filter(|(_, o)| o.is_failed()).count()
    }

    pub fn readings(&self) -> &[(&'static str, RegisterOutcome)] {
        &self.readings
    }

    pub fn to_json(&self) -> Result<String, PollError> {
        serde_json::to_string(self).map_err(PollError::from)
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.readings.len() + 1))?;
        map.serialize_entry("timestamp", &self.timestamp)?;
        for (name, outcome) in &self.readings {
            match outcome {
                RegisterOutcome::Value(m) => map.serialize_entry(name, &m.value)?,
                RegisterOutcome::Failed(_) => map.serialize_entry(name, &Option::<f64>::None)?,
            }
        }
        map.end()
    }
}
