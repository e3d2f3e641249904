//! Holding-register map for the DSE73xx MKII generator controller.
//!
//! Catalog order defines both the read order within an acquisition cycle and
//! the key order of the outbound payload.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordSize {
    U16,
    U32,
}

#[derive(Debug, Clone, Copy)]
pub struct RegisterDescriptor {
    pub name: &'static str,
    pub address: u16,
    pub size: WordSize,
    pub signed: bool,
    pub scale: f64,
    pub unit: &'static str,
}

impl RegisterDescriptor {
    pub const fn word_count(&self) -> u16 {
        match self.size {
            WordSize::U16 => 1,
            WordSize::U32 => 2,
        }
    }
}

const fn reg(
    name: &'static str,
    address: u16,
    size: WordSize,
    signed: bool,
    scale: f64,
    unit: &'static str,
) -> RegisterDescriptor {
    RegisterDescriptor {
        name,
        address,
        size,
        signed,
        scale,
        unit,
    }
}

pub static CATALOG: &[RegisterDescriptor] = &[
    // Engine instrumentation, 16-bit
    reg("OIL_PRESSURE", 1024, WordSize::U16, false, 1.0, "kPa"),
    reg("COOLANT_TEMPERATURE", 1025, WordSize::U16, true, 1.0, "°C"),
    reg("OIL_TEMPERATURE", 1026, WordSize::U16, true, 1.0, "°C"),
    reg("FUEL_LEVEL", 1027, WordSize::U16, false, 1.0, "%"),
    reg("CHARGE_ALTERNATOR_VOLTAGE", 1028, WordSize::U16, false, 0.1, "V"),
    reg("BATTERY_VOLTAGE", 1029, WordSize::U16, false, 0.1, "V"),
    reg("ENGINE_RPM", 1030, WordSize::U16, false, 1.0, "RPM"),
    reg("GENERATOR_FREQUENCY", 1031, WordSize::U16, false, 0.1, "Hz"),
    // Generator phase-to-neutral voltages, 32-bit
    reg("GEN_VOLTAGE_L1_N", 1032, WordSize::U32, false, 0.1, "V"),
    reg("GEN_VOLTAGE_L2_N", 1034, WordSize::U32, false, 0.1, "V"),
    reg("GEN_VOLTAGE_L3_N", 1036, WordSize::U32, false, 0.1, "V"),
    // Generator phase-to-phase voltages, 32-bit
    reg("GEN_VOLTAGE_L1_L2", 1038, WordSize::U32, false, 0.1, "V"),
    reg("GEN_VOLTAGE_L2_L3", 1040, WordSize::U32, false, 0.1, "V"),
    reg("GEN_VOLTAGE_L3_L1", 1042, WordSize::U32, false, 0.1, "V"),
    // Generator phase currents, 32-bit
    reg("GEN_CURRENT_L1", 1044, WordSize::U32, false, 0.1, "A"),
    reg("GEN_CURRENT_L2", 1046, WordSize::U32, false, 0.1, "A"),
    reg("GEN_CURRENT_L3", 1048, WordSize::U32, false, 0.1, "A"),
    // Accumulated counters, 32-bit
    reg("ENGINE_RUN_TIME", 1798, WordSize::U32, false, 1.0, "s"),
    reg("ENGINE_START_COUNT", 1802, WordSize::U32, false, 1.0, "count"),
    reg("TIME_TO_NEXT_SERVICE", 1804, WordSize::U32, false, 1.0, "s"),
    reg("ACCUMULATED_KWH", 1800, WordSize::U32, false, 0.1, "kWh"),
    reg("ACCUMULATED_KVAH", 1806, WordSize::U32, false, 0.1, "kVAh"),
    reg("ACCUMULATED_KVARH", 1808, WordSize::U32, false, 0.1, "kVARh"),
    // Instantaneous power, 32-bit
    reg("TOTAL_ACTIVE_POWER", 1540, WordSize::U32, true, 0.1, "kW"),
    reg("TOTAL_APPARENT_POWER", 1542, WordSize::U32, false, 0.1, "kVA"),
];
