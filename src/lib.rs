//! HC-SR04 rangefinder firmware for the ESP32: measures the distance to the nearest object twice a
//! second, reports it on the console and shows its zone on a red, yellow and green traffic light.

mod microcontroller_src;
mod utils;

pub mod actuators;
pub mod config;
pub mod gpio;
pub mod monitor;
pub mod sensors;
#[cfg(any(test, not(target_os = "espidf")))]
pub mod sim;
pub mod zones;

#[cfg(target_os = "espidf")]
pub use microcontroller_src::{EspClock, Microcontroller};
pub use microcontroller_src::peripherals;
pub use utils::rangefinder_error;
