//! Compile-time configuration of the rangefinder: wiring, sensor timing, pacing and output mode.

use crate::zones::{ZoneTable, PROXIMITY_ZONES, TRAFFIC_LIGHT_ZONES};

/// Speed of sound in centimeters per microsecond
pub const SOUND_SPEED_CM_US: f64 = 0.0343;

/// GPIO numbers the sensor and indicators are wired to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinAssignment {
    pub trig: usize,
    pub echo: usize,
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
}

/// Timing of a single HC-SR04 measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// Time the trigger is held low before the burst
    pub trigger_idle_us: u32,
    /// Length of the trigger burst
    pub trigger_pulse_us: u32,
    /// Bound for the whole echo measurement. A reading that hits it is reported as 0 cm
    pub echo_timeout_us: u64,
    pub sound_speed_cm_us: f64,
}

/// How the classification of each reading is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Three zones, one of the red, yellow or green indicators lit per zone
    TrafficLight,
    /// Five zones, reported on the console only
    ProximityReport,
}

impl OutputMode {
    /// The zone table this mode classifies with
    pub fn zone_table(&self) -> &'static ZoneTable<'static> {
        match self {
            OutputMode::TrafficLight => &TRAFFIC_LIGHT_ZONES,
            OutputMode::ProximityReport => &PROXIMITY_ZONES,
        }
    }

    /// Whether this mode drives the red, yellow and green outputs
    pub fn drives_indicators(&self) -> bool {
        matches!(self, OutputMode::TrafficLight)
    }

    /// Mode selected at build time through the `proximity-report` feature
    pub const fn from_features() -> OutputMode {
        if cfg!(feature = "proximity-report") {
            OutputMode::ProximityReport
        } else {
            OutputMode::TrafficLight
        }
    }
}

/// Read-only configuration shared by the sampler, the classifier and the monitor loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangefinderConfig {
    pub pins: PinAssignment,
    pub sensor: SensorConfig,
    /// Wait after the outputs are forced off, so a console can attach before the banner
    pub settle_ms: u32,
    /// Sleep between two measurement cycles
    pub cycle_ms: u32,
    pub mode: OutputMode,
}

pub const DEFAULT_PINS: PinAssignment = PinAssignment {
    trig: 22,
    echo: 19,
    red: 4,
    yellow: 16,
    green: 17,
};

pub const DEFAULT_SENSOR_CONFIG: SensorConfig = SensorConfig {
    trigger_idle_us: 2,
    trigger_pulse_us: 10,
    echo_timeout_us: 1_000_000,
    sound_speed_cm_us: SOUND_SPEED_CM_US,
};

pub const DEFAULT_CONFIG: RangefinderConfig = RangefinderConfig {
    pins: DEFAULT_PINS,
    sensor: DEFAULT_SENSOR_CONFIG,
    settle_ms: 2000,
    cycle_ms: 500,
    mode: OutputMode::from_features(),
};

impl Default for RangefinderConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}

impl RangefinderConfig {
    /// Same configuration with another output mode
    pub const fn with_mode(self, mode: OutputMode) -> Self {
        RangefinderConfig { mode, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wiring_matches_the_board() {
        let config = RangefinderConfig::default();
        assert_eq!(config.pins.trig, 22);
        assert_eq!(config.pins.echo, 19);
        assert_eq!(
            (config.pins.red, config.pins.yellow, config.pins.green),
            (4, 16, 17)
        );
        assert_eq!(config.settle_ms, 2000);
        assert_eq!(config.cycle_ms, 500);
    }

    #[test]
    fn only_the_traffic_light_drives_indicators() {
        assert!(OutputMode::TrafficLight.drives_indicators());
        assert!(!OutputMode::ProximityReport.drives_indicators());
    }

    #[test]
    fn modes_select_their_zone_tables() {
        let traffic = OutputMode::TrafficLight.zone_table();
        let proximity = OutputMode::ProximityReport.zone_table();
        assert_eq!(traffic.classify(10.0).label, "TOO CLOSE");
        assert_eq!(proximity.classify(10.0).label, "CLOSE");
    }
}
