use crate::{
    config::SensorConfig,
    gpio::{pulse_in, Clock, DigitalOutError, InputLine, Level, OutputLine},
};

/// Enums the different errors possible when working with the HC-SR04
#[derive(Debug)]
pub enum HCSR04Error {
    /// The trigger line could not be driven
    Trigger(DigitalOutError),
}

/// One reading of the sensor. A missing echo is a reading of 0 cm, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Time the echo line stayed high, 0 if the measurement timed out
    pub echo_us: u64,
    pub distance_cm: f64,
}

impl Measurement {
    /// Reading of a burst whose echo never came back
    pub const NO_ECHO: Measurement = Measurement {
        echo_us: 0,
        distance_cm: 0.0,
    };
}

/// Anything that produces one distance reading per call
pub trait Sampler {
    fn sample(&mut self) -> Result<Measurement, HCSR04Error>;
}

/// Converts the echo width into the distance to the object. The burst travels to the object and
/// back, hence the halving.
///
/// # Arguments
///
/// - `echo_us`: Time the echo line stayed high, in microseconds.
/// - `sound_speed_cm_us`: Speed of sound in centimeters per microsecond.
///
/// # Returns
///
/// A f64 representing the distance in centimeters
pub fn distance_cm_from_echo(echo_us: u64, sound_speed_cm_us: f64) -> f64 {
    echo_us as f64 * sound_speed_cm_us / 2.0
}

/// Simple abstraction of the HCSR04 that facilitates its handling
pub struct HCSR04<T, E, C> {
    trig: T,
    echo: E,
    clock: C,
    config: SensorConfig,
}

impl<T: OutputLine, E: InputLine, C: Clock> HCSR04<T, E, C> {
    pub fn new(trig: T, echo: E, clock: C, config: &SensorConfig) -> HCSR04<T, E, C> {
        HCSR04 {
            trig,
            echo,
            clock,
            config: *config,
        }
    }

    /// Returns the distance of the object in front of the sensor in centimeters
    ///
    /// # Returns
    ///
    /// A `Result` with the distance in centimeters, 0 when no echo came back before the timeout.
    ///
    /// # Errors
    ///
    /// - `HCSR04Error::Trigger`: If the trigger line cannot be driven.
    pub fn get_distance(&mut self) -> Result<f64, HCSR04Error> {
        self.measure().map(|measurement| measurement.distance_cm)
    }

    /// Fires a burst and times its echo
    ///
    /// # Errors
    ///
    /// - `HCSR04Error::Trigger`: If the trigger line cannot be driven.
    pub fn measure(&mut self) -> Result<Measurement, HCSR04Error> {
        self.send_burst().map_err(HCSR04Error::Trigger)?;

        let echo_us = pulse_in(
            &self.echo,
            Level::High,
            &self.clock,
            self.config.echo_timeout_us,
        );
        if echo_us == 0 {
            log::debug!("No echo within {} us", self.config.echo_timeout_us);
        }

        Ok(Measurement {
            echo_us,
            distance_cm: distance_cm_from_echo(echo_us, self.config.sound_speed_cm_us),
        })
    }

    /// First set the trigger to Low for a few micro-seconds to get a clean signal,
    /// then set the trigger pin high to send the sonic burst
    fn send_burst(&mut self) -> Result<(), DigitalOutError> {
        self.trig.set_low()?;
        self.clock.delay_us(self.config.trigger_idle_us);
        self.trig.set_high()?;
        self.clock.delay_us(self.config.trigger_pulse_us);
        self.trig.set_low()
    }
}

impl<T: OutputLine, E: InputLine, C: Clock> Sampler for HCSR04<T, E, C> {
    fn sample(&mut self) -> Result<Measurement, HCSR04Error> {
        self.measure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{DEFAULT_SENSOR_CONFIG, SOUND_SPEED_CM_US},
        sim::{SimBench, SimClock, SimEcho, SimTrigger},
    };

    fn sensor(bench: &SimBench) -> HCSR04<SimTrigger, SimEcho, SimClock> {
        let config = SensorConfig {
            echo_timeout_us: 30_000,
            ..DEFAULT_SENSOR_CONFIG
        };
        HCSR04::new(bench.trigger(), bench.echo(), bench.clock(), &config)
    }

    #[test]
    fn distance_is_half_the_round_trip() {
        assert_eq!(distance_cm_from_echo(0, SOUND_SPEED_CM_US), 0.0);
        assert!((distance_cm_from_echo(1000, SOUND_SPEED_CM_US) - 17.15).abs() < 1e-9);
        assert!((distance_cm_from_echo(23316, SOUND_SPEED_CM_US) - 399.8694).abs() < 1e-6);
    }

    #[test]
    fn distance_never_decreases_with_the_echo() {
        let mut previous = 0.0;
        for echo_us in (0..40_000).step_by(7) {
            let distance = distance_cm_from_echo(echo_us, SOUND_SPEED_CM_US);
            assert!(distance >= previous);
            previous = distance;
        }
    }

    #[test]
    fn sends_a_ten_microsecond_burst_per_reading() {
        let bench = SimBench::new();
        let mut sensor = sensor(&bench);
        bench.plan_echo(1165);
        bench.plan_echo(2915);

        sensor.measure().unwrap();
        sensor.measure().unwrap();

        assert_eq!(bench.trigger_pulses(), vec![10, 10]);
    }

    #[test]
    fn converts_the_echo_into_centimeters() {
        let bench = SimBench::new();
        let mut sensor = sensor(&bench);
        bench.plan_echo(2915);

        let measurement = sensor.measure().unwrap();

        assert!(measurement.echo_us.abs_diff(2915) <= 2);
        assert!((measurement.distance_cm - 50.0).abs() < 0.1);
    }

    #[test]
    fn missing_echo_reads_as_zero() {
        let bench = SimBench::new();
        let mut sensor = sensor(&bench);
        bench.plan_echo(0);

        let measurement = sensor.sample().unwrap();

        assert_eq!(measurement, Measurement::NO_ECHO);
    }

    #[test]
    fn trigger_failures_are_reported() {
        let bench = SimBench::new();
        let trig = crate::sim::SimOutput::new();
        trig.set_failing(true);
        let mut sensor = HCSR04::new(trig, bench.echo(), bench.clock(), &DEFAULT_SENSOR_CONFIG);

        assert!(matches!(
            sensor.get_distance(),
            Err(HCSR04Error::Trigger(DigitalOutError::InvalidPin))
        ));
    }
}
