//! Rangefinder firmware. The sensor is wired with TRIG on GPIO22 and ECHO on GPIO19, the red, yellow
//! and green LEDs on GPIO4, GPIO16 and GPIO17. Build with the `proximity-report` feature to report
//! five proximity zones on the console instead of driving the LEDs.
//!
//! On a host target the same loop runs against the simulated bench, so the console output can be
//! checked without a board.

use esp32rangefinder::config::RangefinderConfig;

#[cfg(target_os = "espidf")]
fn main() {
    let config = RangefinderConfig::default();
    if let Err(err) = run(&config) {
        log::error!("Rangefinder could not start: {:?}", err);
    }
}

#[cfg(target_os = "espidf")]
fn run(config: &RangefinderConfig) -> Result<(), esp32rangefinder::rangefinder_error::RangefinderError> {
    use esp32rangefinder::{monitor::Monitor, sensors::HCSR04, Microcontroller};

    let mut micro = Microcontroller::new();
    let trig = micro.set_pin_as_digital_out(config.pins.trig)?;
    let echo = micro.set_pin_as_digital_in(config.pins.echo)?;
    let traffic_light = if config.mode.drives_indicators() {
        Some(micro.set_pins_for_traffic_light(&config.pins)?)
    } else {
        None
    };

    let sensor = HCSR04::new(trig, echo, micro.clock(), &config.sensor);
    let mut monitor = Monitor::new(config, sensor, traffic_light, micro.clock(), std::io::stdout());
    monitor.start()?;
    monitor.run()
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    use esp32rangefinder::{
        actuators::TrafficLight,
        monitor::Monitor,
        sensors::HCSR04,
        sim::{SimBench, SimOutput},
    };

    /// Echo widths of an object walking away from the sensor, then out of range
    const DRY_RUN_ECHOES_US: [u64; 8] = [250, 1165, 2000, 2915, 6000, 11660, 23316, 0];

    let config = RangefinderConfig {
        settle_ms: 0,
        ..RangefinderConfig::default()
    };
    let bench = SimBench::new();
    let traffic_light = TrafficLight::new(SimOutput::new(), SimOutput::new(), SimOutput::new());
    let sensor = HCSR04::new(bench.trigger(), bench.echo(), bench.clock(), &config.sensor);
    let mut monitor = Monitor::new(
        &config,
        sensor,
        Some(traffic_light),
        bench.clock(),
        std::io::stdout(),
    );

    if let Err(err) = monitor.start() {
        eprintln!("Dry run could not start: {:?}", err);
        return;
    }
    for echo_us in DRY_RUN_ECHOES_US {
        bench.plan_echo(echo_us);
        monitor.step();
    }
}
