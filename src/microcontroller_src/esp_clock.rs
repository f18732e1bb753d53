use esp_idf_svc::{
    hal::delay::{Delay, FreeRtos},
    sys::esp_timer_get_time,
};

use crate::gpio::Clock;

/// Clock backed by the ESP high resolution timer. Microsecond delays busy wait, millisecond delays
/// yield to FreeRTOS.
#[derive(Clone)]
pub struct EspClock {
    delay: Delay,
}

impl EspClock {
    pub fn new() -> Self {
        EspClock {
            delay: Delay::new_default(),
        }
    }
}

impl Default for EspClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for EspClock {
    fn now_us(&self) -> i64 {
        unsafe { esp_timer_get_time() }
    }

    fn delay_us(&self, micro_seconds: u32) {
        self.delay.delay_us(micro_seconds);
    }

    fn delay_ms(&self, mili_seconds: u32) {
        FreeRtos::delay_ms(mili_seconds);
    }
}
