mod digital_in;
mod digital_out;
mod pulse_in;

pub use {
    digital_in::*,
    digital_out::*,
    pulse_in::*,
};

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Returns the opposite level
    pub fn inverse(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// A digital line the firmware drives, such as the HC-SR04 trigger or an indicator LED.
pub trait OutputLine {
    /// Drives the line to `level`.
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPin`: If the pin level cannot be set.
    fn set_level(&mut self, level: Level) -> Result<(), DigitalOutError>;

    /// Returns the level the line is currently driven to
    fn get_level(&self) -> Level;

    fn set_high(&mut self) -> Result<(), DigitalOutError> {
        self.set_level(Level::High)
    }

    fn set_low(&mut self) -> Result<(), DigitalOutError> {
        self.set_level(Level::Low)
    }

    fn is_set_high(&self) -> bool {
        self.get_level() == Level::High
    }
}

/// A digital line the firmware samples, such as the HC-SR04 echo.
pub trait InputLine {
    fn get_level(&self) -> Level;

    fn is_high(&self) -> bool {
        self.get_level() == Level::High
    }

    fn is_low(&self) -> bool {
        self.get_level() == Level::Low
    }
}

/// Monotonic microsecond time base plus the blocking delays used by the firmware.
pub trait Clock {
    /// Microseconds since an arbitrary, fixed origin
    fn now_us(&self) -> i64;

    /// Busy waits for `micro_seconds`
    fn delay_us(&self, micro_seconds: u32);

    /// Blocks the calling task for `mili_seconds`
    fn delay_ms(&self, mili_seconds: u32);
}
