use crate::{
    gpio::{DigitalOutError, OutputLine},
    zones::Light,
};

/// Red, yellow and green indicators of which at most one is lit at any time
pub struct TrafficLight<O> {
    red: O,
    yellow: O,
    green: O,
}

impl<O: OutputLine> TrafficLight<O> {
    pub fn new(red: O, yellow: O, green: O) -> TrafficLight<O> {
        TrafficLight { red, yellow, green }
    }

    /// Switches every indicator off
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPin`: If one of the outputs cannot be driven.
    pub fn all_off(&mut self) -> Result<(), DigitalOutError> {
        self.red.set_low()?;
        self.yellow.set_low()?;
        self.green.set_low()
    }

    /// Switches every indicator off, then lights `light` if there is one
    ///
    /// # Errors
    ///
    /// - `DigitalOutError::InvalidPin`: If one of the outputs cannot be driven.
    pub fn show(&mut self, light: Option<Light>) -> Result<(), DigitalOutError> {
        self.all_off()?;
        match light {
            Some(light) => self.output(light).set_high(),
            None => Ok(()),
        }
    }

    /// The indicator currently lit, if any
    pub fn lit(&self) -> Option<Light> {
        [Light::Red, Light::Yellow, Light::Green]
            .into_iter()
            .find(|light| self.output_ref(*light).is_set_high())
    }

    fn output(&mut self, light: Light) -> &mut O {
        match light {
            Light::Red => &mut self.red,
            Light::Yellow => &mut self.yellow,
            Light::Green => &mut self.green,
        }
    }

    fn output_ref(&self, light: Light) -> &O {
        match light {
            Light::Red => &self.red,
            Light::Yellow => &self.yellow,
            Light::Green => &self.green,
        }
    }
}
