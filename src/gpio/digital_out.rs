use crate::microcontroller_src::peripherals::PeripheralError;
#[cfg(target_os = "espidf")]
use crate::microcontroller_src::peripherals::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio::{self as hal_gpio, AnyIOPin, Output, PinDriver};

#[cfg(target_os = "espidf")]
use super::{Level, OutputLine};

/// Enums the different errors possible when working with the digital out
#[derive(Debug)]
pub enum DigitalOutError {
    CannotSetPinAsOutput,
    InvalidPin,
    InvalidPeripheral(PeripheralError),
}

/// Driver to handle a digital output for a particular Pin
/// - `pin_driver`: A PinDriver instance that handles the output signals
/// - `pin_num`: The GPIO number, kept for logging
#[cfg(target_os = "espidf")]
pub struct DigitalOut<'a> {
    pin_driver: PinDriver<'a, AnyIOPin, Output>,
    pin_num: usize,
}

#[cfg(target_os = "espidf")]
impl<'a> DigitalOut<'a> {
    /// Creates a new `DigitalOut` for a specified pin. The pin starts driven low.
    ///
    /// # Arguments
    ///
    /// - `per`: A `Peripheral` that can be transformed into an AnyIOPin.
    ///
    /// # Returns
    ///
    /// A `Result` containing the new `DigitalOut` instance, or a `DigitalOutError` if the initialization fails.
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPeripheral`: If the peripheral cannot be converted into an AnyIOPin.
    /// - `DigitalOutError::CannotSetPinAsOutput`: If the pin cannot be set as an output.
    /// - `DigitalOutError::InvalidPin`: If the pin cannot be driven low.
    pub(crate) fn new(per: Peripheral) -> Result<DigitalOut<'a>, DigitalOutError> {
        let pin_num = per.pin_number().map_err(DigitalOutError::InvalidPeripheral)?;
        let gpio = per
            .into_any_io_pin()
            .map_err(DigitalOutError::InvalidPeripheral)?;
        let pin_driver =
            PinDriver::output(gpio).map_err(|_| DigitalOutError::CannotSetPinAsOutput)?;

        let mut digital_out = DigitalOut { pin_driver, pin_num };
        digital_out.set_low()?;
        Ok(digital_out)
    }

    /// Returns the GPIO number this driver owns
    pub fn pin_num(&self) -> usize {
        self.pin_num
    }
}

#[cfg(target_os = "espidf")]
impl OutputLine for DigitalOut<'_> {
    fn set_level(&mut self, level: Level) -> Result<(), DigitalOutError> {
        let level = match level {
            Level::High => hal_gpio::Level::High,
            Level::Low => hal_gpio::Level::Low,
        };
        self.pin_driver
            .set_level(level)
            .map_err(|_| DigitalOutError::InvalidPin)
    }

    fn get_level(&self) -> Level {
        if self.pin_driver.is_set_high() {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<PeripheralError> for DigitalOutError {
    fn from(value: PeripheralError) -> Self {
        DigitalOutError::InvalidPeripheral(value)
    }
}
