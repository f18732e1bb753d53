use crate::{
    actuators::TrafficLight,
    config::PinAssignment,
    gpio::{DigitalIn, DigitalInError, DigitalOut, DigitalOutError},
    microcontroller_src::{esp_clock::EspClock, peripherals::Peripherals},
};

/// Primary abstraction for interacting with the microcontroller, providing access to the pins and
/// the time base the firmware needs.
///
/// - `peripherals`: The digital pins not yet handed out to a driver.
/// - `clock`: The `EspClock` shared by the sensor and the measurement loop.
pub struct Microcontroller {
    peripherals: Peripherals,
    clock: EspClock,
}

impl Microcontroller {
    /// Creates a new Microcontroller instance. Applies the ESP-IDF runtime patches and installs the
    /// ESP logger as the `log` backend.
    ///
    /// # Returns
    ///
    /// The new Microcontroller
    pub fn new() -> Self {
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();

        Microcontroller {
            peripherals: Peripherals::new(),
            clock: EspClock::new(),
        }
    }

    /// Creates a DigitalIn on the ESP pin with number 'pin_num' to read digital inputs.
    ///
    /// # Arguments
    ///
    /// - `pin_num`: The number of the pin on the microcontroller to configure as a digital input.
    ///
    /// # Returns
    ///
    /// A `DigitalIn` instance that can be used to read digital inputs from the specified pin.
    ///
    /// # Errors
    ///
    /// - `DigitalInError::InvalidPeripheral`: If the pin does not exist, is reserved or was already taken.
    /// - `DigitalInError::CannotSetPinAsInput`: If the driver cannot be created.
    pub fn set_pin_as_digital_in<'a>(&mut self, pin_num: usize) -> Result<DigitalIn<'a>, DigitalInError> {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num)?;
        let digital_in = DigitalIn::new(pin_peripheral)?;
        log::info!("GPIO{} set as digital input", digital_in.pin_num());
        Ok(digital_in)
    }

    /// Creates a DigitalOut on the ESP pin with number 'pin_num' to write digital outputs. The pin
    /// starts driven low.
    ///
    /// # Arguments
    ///
    /// - `pin_num`: The number of the pin on the microcontroller to configure as a digital output.
    ///
    /// # Returns
    ///
    /// A `DigitalOut` instance that can be used to write digital outputs to the specified pin.
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPeripheral`: If the pin does not exist, is reserved or was already taken.
    /// - `DigitalOutError::CannotSetPinAsOutput`: If the driver cannot be created.
    pub fn set_pin_as_digital_out<'a>(&mut self, pin_num: usize) -> Result<DigitalOut<'a>, DigitalOutError> {
        let pin_peripheral = self.peripherals.get_digital_pin(pin_num)?;
        let digital_out = DigitalOut::new(pin_peripheral)?;
        log::info!("GPIO{} set as digital output", digital_out.pin_num());
        Ok(digital_out)
    }

    /// Creates the red, yellow and green outputs of the traffic light, all of them off
    ///
    /// # Errors
    ///
    /// - `DigitalOutError`: If any of the three pins cannot be set as output.
    pub fn set_pins_for_traffic_light<'a>(
        &mut self,
        pins: &PinAssignment,
    ) -> Result<TrafficLight<DigitalOut<'a>>, DigitalOutError> {
        let red = self.set_pin_as_digital_out(pins.red)?;
        let yellow = self.set_pin_as_digital_out(pins.yellow)?;
        let green = self.set_pin_as_digital_out(pins.green)?;
        Ok(TrafficLight::new(red, yellow, green))
    }

    /// Returns a handle to the microsecond clock
    pub fn clock(&self) -> EspClock {
        self.clock.clone()
    }
}

impl Default for Microcontroller {
    fn default() -> Self {
        Self::new()
    }
}
