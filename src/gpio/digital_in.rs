use crate::microcontroller_src::peripherals::PeripheralError;
#[cfg(target_os = "espidf")]
use crate::microcontroller_src::peripherals::Peripheral;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio::{self as hal_gpio, AnyIOPin, Input, PinDriver};
#[cfg(target_os = "espidf")]
pub use esp_idf_svc::hal::gpio::Pull;

#[cfg(target_os = "espidf")]
use super::{InputLine, Level};

/// Enums the different errors possible when working with the digital in
#[derive(Debug)]
pub enum DigitalInError {
    CannotSetPinAsInput,
    CannotSetPullForPin,
    InvalidPeripheral(PeripheralError),
}

/// Driver for receiving digital inputs from a particular Pin
/// - `pin_driver`: An instance of PinDriver that implements AnyIOPin
/// - `pin_num`: The GPIO number, kept for logging
#[cfg(target_os = "espidf")]
pub struct DigitalIn<'a> {
    pin_driver: PinDriver<'a, AnyIOPin, Input>,
    pin_num: usize,
}

#[cfg(target_os = "espidf")]
impl<'a> DigitalIn<'a> {
    /// Create a new DigitalIn for a Pin, by default pull is set to Down so a floating echo line
    /// reads as Low.
    ///
    /// # Arguments
    ///
    /// - `per`: A Peripheral capable of transforming into an AnyIOPin.
    ///
    /// # Returns
    ///
    /// A `Result` containing the new `DigitalIn` instance, or a `DigitalInError` if initialization fails.
    ///
    /// # Errors
    ///
    /// - `DigitalInError::InvalidPeripheral`: If per parameter is not capable of transforming into an AnyIOPin,
    ///   or pin has already been used for another driver.
    /// - `DigitalInError::CannotSetPinAsInput`: If the per parameter is not capable of supporting input
    /// - `DigitalInError::CannotSetPullForPin`: If the pull down cannot be set
    pub(crate) fn new(per: Peripheral) -> Result<DigitalIn<'a>, DigitalInError> {
        let pin_num = per.pin_number().map_err(DigitalInError::InvalidPeripheral)?;
        let gpio = per
            .into_any_io_pin()
            .map_err(DigitalInError::InvalidPeripheral)?;
        let pin_driver = PinDriver::input(gpio).map_err(|_| DigitalInError::CannotSetPinAsInput)?;

        let mut digital_in = DigitalIn { pin_driver, pin_num };
        digital_in.set_pull(Pull::Down)?;
        Ok(digital_in)
    }

    /// Set the pin Pull either to Pull Up or Down
    ///
    /// # Errors
    ///
    /// - `DigitalInError::CannotSetPullForPin`: If the pin driver is unable to support a setting of the pull
    pub fn set_pull(&mut self, pull_type: Pull) -> Result<(), DigitalInError> {
        self.pin_driver
            .set_pull(pull_type)
            .map_err(|_| DigitalInError::CannotSetPullForPin)
    }

    /// Returns the GPIO number this driver owns
    pub fn pin_num(&self) -> usize {
        self.pin_num
    }
}

#[cfg(target_os = "espidf")]
impl InputLine for DigitalIn<'_> {
    fn get_level(&self) -> Level {
        match self.pin_driver.get_level() {
            hal_gpio::Level::High => Level::High,
            hal_gpio::Level::Low => Level::Low,
        }
    }
}

impl From<PeripheralError> for DigitalInError {
    fn from(value: PeripheralError) -> Self {
        DigitalInError::InvalidPeripheral(value)
    }
}
