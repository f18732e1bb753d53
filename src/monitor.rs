//! The measurement loop: sample, classify, actuate, report, sleep.

use std::io::Write;

use crate::{
    actuators::TrafficLight,
    config::{OutputMode, RangefinderConfig},
    gpio::{Clock, OutputLine},
    sensors::{Measurement, Sampler},
    utils::rangefinder_error::RangefinderError,
    zones::{Zone, ZoneTable, BANNER_RANGE_WIDTH},
};

const BANNER_SEPARATOR: &str = "===========================================";

/// Outcome of one measurement cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub measurement: Measurement,
    pub zone: Zone,
}

/// Drives the rangefinder: owns the sampler, the optional traffic light and the console the status
/// lines are written to.
pub struct Monitor<S, O, C, W> {
    config: RangefinderConfig,
    zones: &'static ZoneTable<'static>,
    sampler: S,
    traffic_light: Option<TrafficLight<O>>,
    clock: C,
    console: W,
}

impl<S: Sampler, O: OutputLine, C: Clock, W: Write> Monitor<S, O, C, W> {
    /// Creates a monitor classifying with the zone table of `config.mode`. The traffic light is only
    /// driven in `OutputMode::TrafficLight`; in any other mode it is dropped.
    pub fn new(
        config: &RangefinderConfig,
        sampler: S,
        traffic_light: Option<TrafficLight<O>>,
        clock: C,
        console: W,
    ) -> Self {
        let traffic_light = traffic_light.filter(|_| config.mode.drives_indicators());
        Monitor {
            config: *config,
            zones: config.mode.zone_table(),
            sampler,
            traffic_light,
            clock,
            console,
        }
    }

    /// Startup sequence: indicators forced off, settle wait so a console can attach, banner.
    ///
    /// # Errors
    ///
    /// - `RangefinderError::DigitalOut`: If an indicator cannot be switched off.
    /// - `RangefinderError::Console`: If the banner cannot be written.
    pub fn start(&mut self) -> Result<(), RangefinderError> {
        if let Some(traffic_light) = &mut self.traffic_light {
            traffic_light.all_off()?;
        }
        self.clock.delay_ms(self.config.settle_ms);
        write_banner(&mut self.console, &self.config, self.zones)?;
        log::info!(
            "Rangefinder started in {:?} mode, measuring every {} ms",
            self.config.mode,
            self.config.cycle_ms
        );
        Ok(())
    }

    /// Takes one reading, classifies it, updates the indicators and writes the status line.
    ///
    /// A reading the sampler could not take counts as a missing echo, so the cycle still reports
    /// OUT OF RANGE and switches the indicators off. Every step runs even if an earlier one failed;
    /// the first failure is returned afterwards.
    ///
    /// # Errors
    ///
    /// - `RangefinderError::Sensor`: If the trigger could not be driven.
    /// - `RangefinderError::DigitalOut`: If an indicator cannot be driven.
    /// - `RangefinderError::Console`: If the status line cannot be written.
    pub fn run_cycle(&mut self) -> Result<CycleReport, RangefinderError> {
        let sampled = self.sampler.sample();
        let measurement = match &sampled {
            Ok(measurement) => *measurement,
            Err(_) => Measurement::NO_ECHO,
        };
        let zone = *self.zones.classify(measurement.distance_cm);
        log::debug!("Echo {} us -> {}", measurement.echo_us, zone.label);

        let actuated = match &mut self.traffic_light {
            Some(traffic_light) => traffic_light.show(zone.light),
            None => Ok(()),
        };
        let reported = self.report(&measurement, &zone);

        sampled?;
        actuated?;
        reported?;
        Ok(CycleReport { measurement, zone })
    }

    fn report(&mut self, measurement: &Measurement, zone: &Zone) -> std::io::Result<()> {
        writeln!(self.console, "{}", status_line(measurement, zone))?;
        self.console.flush()
    }

    /// Runs one cycle and sleeps the cycle period. Errors are logged, never fatal.
    pub fn step(&mut self) -> Option<CycleReport> {
        let report = match self.run_cycle() {
            Ok(report) => Some(report),
            Err(err) => {
                log::error!("Measurement cycle failed: {:?}", err);
                None
            }
        };
        self.clock.delay_ms(self.config.cycle_ms);
        report
    }

    /// Measures forever
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn traffic_light(&self) -> Option<&TrafficLight<O>> {
        self.traffic_light.as_ref()
    }

    pub fn console(&self) -> &W {
        &self.console
    }
}

/// The line printed after every reading, e.g. `Distance: 19.98 cm [TOO CLOSE]`
pub fn status_line(measurement: &Measurement, zone: &Zone) -> String {
    format!("Distance: {:.2} cm [{}]", measurement.distance_cm, zone.label)
}

/// Writes the startup banner: pin assignments and the range table of the active mode
pub fn write_banner<W: Write>(
    console: &mut W,
    config: &RangefinderConfig,
    zones: &ZoneTable,
) -> std::io::Result<()> {
    let title = match config.mode {
        OutputMode::TrafficLight => "HC-SR04 Ultrasonic Sensor + Traffic Light",
        OutputMode::ProximityReport => "HC-SR04 Ultrasonic Sensor + Proximity Report",
    };

    writeln!(console, "{BANNER_SEPARATOR}")?;
    writeln!(console, "  {title}")?;
    writeln!(console, "              ESP32 Control")?;
    writeln!(console, "{BANNER_SEPARATOR}")?;
    writeln!(console, "TRIG Pin: {}", config.pins.trig)?;
    writeln!(console, "ECHO Pin: {}", config.pins.echo)?;
    if config.mode.drives_indicators() {
        writeln!(console, "RED Pin: {}", config.pins.red)?;
        writeln!(console, "YELLOW Pin: {}", config.pins.yellow)?;
        writeln!(console, "GREEN Pin: {}", config.pins.green)?;
    }
    writeln!(console, "{BANNER_SEPARATOR}")?;
    writeln!(console, "Distance Ranges:")?;
    for rule in zones.rules() {
        writeln!(console, "  {rule}")?;
    }
    writeln!(
        console,
        "  {:<width$}: {}",
        zones.fallback_caption(),
        zones.fallback().description,
        width = BANNER_RANGE_WIDTH
    )?;
    writeln!(console, "{BANNER_SEPARATOR}")?;
    writeln!(console)?;
    console.flush()
}
