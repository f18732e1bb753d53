use std::mem;
#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::gpio::*;

const PIN_COUNT: usize = 34;
const DIGITAL_PINS_BOUNDS: (usize, usize) = (0, 33);
/// Pins wired to the SPI flash (6 to 11) or to the UART0 console (1 and 3), plus the gaps of the
/// ESP32 GPIO matrix. 34 and up are input only and cannot back an AnyIOPin.
const UNAVAILABLE_PINS: [usize; 14] = [1, 3, 6, 7, 8, 9, 10, 11, 20, 24, 28, 29, 30, 31];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    NotAPin,
    /// The pin number is outside the digital pins of the ESP32
    OutOfBounds(usize),
    /// The pin exists but is reserved for flash, console or has no IO function
    Unavailable(usize),
    /// The pin was already handed out to another driver
    AlreadyTaken(usize),
}

/// Represents an esp32 Peripheral that can later be turned into its driver
#[derive(Debug, Default, PartialEq, Eq)]
pub enum Peripheral {
    Pin(u8),
    #[default]
    None,
}

impl Peripheral {
    fn take(&mut self) -> Peripheral {
        mem::take(self)
    }

    /// If the Peripheral is a Pin returns its GPIO number.
    /// If not it returns PeripheralError::NotAPin
    pub fn pin_number(&self) -> Result<usize, PeripheralError> {
        match self {
            Peripheral::Pin(pin_num) => Ok(*pin_num as usize),
            Peripheral::None => Err(PeripheralError::NotAPin),
        }
    }

    /// If the Peripheral is a Pin returns the corresponding AnyIoPin.
    /// If not it returns PeripheralError::NotAPin
    #[cfg(target_os = "espidf")]
    pub fn into_any_io_pin(self) -> Result<AnyIOPin, PeripheralError> {
        let pin = match self {
            Peripheral::Pin(pin_num) => match pin_num {
                0 => unsafe { Gpio0::new().downgrade() },
                2 => unsafe { Gpio2::new().downgrade() },
                4 => unsafe { Gpio4::new().downgrade() },
                5 => unsafe { Gpio5::new().downgrade() },
                12 => unsafe { Gpio12::new().downgrade() },
                13 => unsafe { Gpio13::new().downgrade() },
                14 => unsafe { Gpio14::new().downgrade() },
                15 => unsafe { Gpio15::new().downgrade() },
                16 => unsafe { Gpio16::new().downgrade() },
                17 => unsafe { Gpio17::new().downgrade() },
                18 => unsafe { Gpio18::new().downgrade() },
                19 => unsafe { Gpio19::new().downgrade() },
                21 => unsafe { Gpio21::new().downgrade() },
                22 => unsafe { Gpio22::new().downgrade() },
                23 => unsafe { Gpio23::new().downgrade() },
                25 => unsafe { Gpio25::new().downgrade() },
                26 => unsafe { Gpio26::new().downgrade() },
                27 => unsafe { Gpio27::new().downgrade() },
                32 => unsafe { Gpio32::new().downgrade() },
                33 => unsafe { Gpio33::new().downgrade() },
                _ => return Err(PeripheralError::NotAPin),
            },
            Peripheral::None => return Err(PeripheralError::NotAPin),
        };
        Ok(pin)
    }
}

/// Represents the digital pins of the ESP32 and hands each one out at most once. Pins that are not
/// usable as general purpose IO are never handed out.
pub struct Peripherals {
    pins: [Peripheral; PIN_COUNT],
}

impl Peripherals {
    pub fn new() -> Peripherals {
        let pins: [Peripheral; PIN_COUNT] = std::array::from_fn(|pin_num| {
            if UNAVAILABLE_PINS.contains(&pin_num) {
                Peripheral::None
            } else {
                Peripheral::Pin(pin_num as u8)
            }
        });
        Peripherals { pins }
    }

    /// Takes the digital pin `pin_num`
    ///
    /// # Errors
    ///
    /// - `PeripheralError::OutOfBounds`: If the number is not a digital pin of the chip.
    /// - `PeripheralError::Unavailable`: If the pin is reserved.
    /// - `PeripheralError::AlreadyTaken`: If the pin was handed out before.
    pub fn get_digital_pin(&mut self, pin_num: usize) -> Result<Peripheral, PeripheralError> {
        self.get_pin_on_bound(pin_num, DIGITAL_PINS_BOUNDS)
    }

    fn get_pin_on_bound(
        &mut self,
        pin_num: usize,
        bound: (usize, usize),
    ) -> Result<Peripheral, PeripheralError> {
        if pin_num < bound.0 || pin_num > bound.1 {
            return Err(PeripheralError::OutOfBounds(pin_num));
        }
        if UNAVAILABLE_PINS.contains(&pin_num) {
            return Err(PeripheralError::Unavailable(pin_num));
        }
        match self.pins[pin_num].take() {
            Peripheral::None => Err(PeripheralError::AlreadyTaken(pin_num)),
            pin => Ok(pin),
        }
    }
}

impl Default for Peripherals {
    fn default() -> Self {
        Self::new()
    }
}
