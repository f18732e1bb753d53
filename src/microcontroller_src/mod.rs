#[cfg(target_os = "espidf")]
pub mod esp_clock;
#[cfg(target_os = "espidf")]
pub mod microcontroller;
pub mod peripherals;

#[cfg(target_os = "espidf")]
pub use self::{esp_clock::EspClock, microcontroller::Microcontroller};
