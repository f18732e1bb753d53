use crate::{
    gpio::{DigitalInError, DigitalOutError},
    microcontroller_src::peripherals::PeripheralError,
    sensors::HCSR04Error,
};

/// Every error the firmware can run into, grouped by the driver that produced it
#[derive(Debug)]
pub enum RangefinderError {
    DigitalIn(DigitalInError),
    DigitalOut(DigitalOutError),
    Peripheral(PeripheralError),
    Sensor(HCSR04Error),
    /// The status line or banner could not be written to the console
    Console(std::io::Error),
}

impl From<DigitalInError> for RangefinderError {
    fn from(value: DigitalInError) -> Self {
        RangefinderError::DigitalIn(value)
    }
}

impl From<DigitalOutError> for RangefinderError {
    fn from(value: DigitalOutError) -> Self {
        RangefinderError::DigitalOut(value)
    }
}

impl From<PeripheralError> for RangefinderError {
    fn from(value: PeripheralError) -> Self {
        RangefinderError::Peripheral(value)
    }
}

impl From<HCSR04Error> for RangefinderError {
    fn from(value: HCSR04Error) -> Self {
        RangefinderError::Sensor(value)
    }
}

impl From<std::io::Error> for RangefinderError {
    fn from(value: std::io::Error) -> Self {
        RangefinderError::Console(value)
    }
}
