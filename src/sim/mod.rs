//! Simulated HC-SR04 bench: a virtual microsecond clock, a trigger line that answers each burst
//! with a scripted echo, and plain outputs that remember every level they were driven to.
//!
//! Time only moves when the firmware looks at it: every [`SimClock::now_us`] read advances the
//! clock by one tick, and delays advance it by their full length. Busy-wait loops therefore make
//! progress without real waiting.

use std::{
    cell::RefCell,
    collections::VecDeque,
    rc::Rc,
};

use crate::gpio::{Clock, DigitalOutError, InputLine, Level, OutputLine};

/// Microseconds between the falling edge of the trigger and the rising edge of the echo
pub const DEFAULT_ECHO_LATENCY_US: i64 = 450;

const DEFAULT_TICK_US: i64 = 1;

struct BenchState {
    now_us: i64,
    tick_us: i64,
    echo_latency_us: i64,
    echo_pulses: Vec<(i64, i64)>,
    echo_plan: VecDeque<u64>,
    trigger_level: Level,
    trigger_high_since: Option<i64>,
    trigger_pulses: Vec<u64>,
    sleeps_ms: Vec<u32>,
}

impl BenchState {
    fn echo_level(&self) -> Level {
        let now = self.now_us;
        if self
            .echo_pulses
            .iter()
            .any(|&(start, end)| start <= now && now < end)
        {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Shared state of the simulated wiring. Every line handed out by the bench observes the same clock.
#[derive(Clone)]
pub struct SimBench {
    state: Rc<RefCell<BenchState>>,
}

impl SimBench {
    pub fn new() -> Self {
        SimBench {
            state: Rc::new(RefCell::new(BenchState {
                now_us: 0,
                tick_us: DEFAULT_TICK_US,
                echo_latency_us: DEFAULT_ECHO_LATENCY_US,
                echo_pulses: Vec::new(),
                echo_plan: VecDeque::new(),
                trigger_level: Level::Low,
                trigger_high_since: None,
                trigger_pulses: Vec::new(),
                sleeps_ms: Vec::new(),
            })),
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock { state: self.state.clone() }
    }

    pub fn trigger(&self) -> SimTrigger {
        SimTrigger { state: self.state.clone() }
    }

    pub fn echo(&self) -> SimEcho {
        SimEcho { state: self.state.clone() }
    }

    /// Queues the echo width (µs) the sensor answers the next unanswered trigger burst with.
    /// A width of 0 means the burst gets no echo at all.
    pub fn plan_echo(&self, width_us: u64) {
        self.state.borrow_mut().echo_plan.push_back(width_us);
    }

    /// Raises the echo line from `start_us` for `width_us`, independent of the trigger
    pub fn schedule_pulse(&self, start_us: i64, width_us: u64) {
        self.state
            .borrow_mut()
            .echo_pulses
            .push((start_us, start_us + width_us as i64));
    }

    /// Widths of the trigger bursts seen so far, in µs
    pub fn trigger_pulses(&self) -> Vec<u64> {
        self.state.borrow().trigger_pulses.clone()
    }

    /// Every blocking sleep requested so far, in ms
    pub fn sleeps_ms(&self) -> Vec<u32> {
        self.state.borrow().sleeps_ms.clone()
    }

    pub fn now_us(&self) -> i64 {
        self.state.borrow().now_us
    }
}

impl Default for SimBench {
    fn default() -> Self {
        Self::new()
    }
}

/// Virtual clock of a [`SimBench`]
#[derive(Clone)]
pub struct SimClock {
    state: Rc<RefCell<BenchState>>,
}

impl Clock for SimClock {
    fn now_us(&self) -> i64 {
        let mut state = self.state.borrow_mut();
        state.now_us += state.tick_us;
        state.now_us
    }

    fn delay_us(&self, micro_seconds: u32) {
        self.state.borrow_mut().now_us += micro_seconds as i64;
    }

    fn delay_ms(&self, mili_seconds: u32) {
        let mut state = self.state.borrow_mut();
        state.now_us += mili_seconds as i64 * 1000;
        state.sleeps_ms.push(mili_seconds);
    }
}

/// Trigger line of the simulated sensor. A high to low transition counts as a burst and schedules
/// the next planned echo.
pub struct SimTrigger {
    state: Rc<RefCell<BenchState>>,
}

impl OutputLine for SimTrigger {
    fn set_level(&mut self, level: Level) -> Result<(), DigitalOutError> {
        let mut state = self.state.borrow_mut();
        let now = state.now_us;
        match (state.trigger_level, level) {
            (Level::Low, Level::High) => state.trigger_high_since = Some(now),
            (Level::High, Level::Low) => {
                if let Some(since) = state.trigger_high_since.take() {
                    state.trigger_pulses.push((now - since) as u64);
                }
                if let Some(width) = state.echo_plan.pop_front() {
                    if width > 0 {
                        let start = now + state.echo_latency_us;
                        state.echo_pulses.push((start, start + width as i64));
                    }
                }
            }
            _ => {}
        }
        state.trigger_level = level;
        Ok(())
    }

    fn get_level(&self) -> Level {
        self.state.borrow().trigger_level
    }
}

/// Echo line of the simulated sensor
pub struct SimEcho {
    state: Rc<RefCell<BenchState>>,
}

impl InputLine for SimEcho {
    fn get_level(&self) -> Level {
        self.state.borrow().echo_level()
    }
}

struct OutputState {
    history: Vec<Level>,
    failing: bool,
}

/// A bare output, such as an indicator LED. Clones share the same line so a test can keep one
/// handle while the firmware owns the other.
#[derive(Clone)]
pub struct SimOutput {
    state: Rc<RefCell<OutputState>>,
}

impl SimOutput {
    pub fn new() -> Self {
        SimOutput {
            state: Rc::new(RefCell::new(OutputState {
                history: vec![Level::Low],
                failing: false,
            })),
        }
    }

    /// Makes every following write fail as if the pin driver rejected it
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }

    /// Every level the line has been driven to, starting with its initial Low
    pub fn history(&self) -> Vec<Level> {
        self.state.borrow().history.clone()
    }

    pub fn level(&self) -> Level {
        *self.state.borrow().history.last().unwrap_or(&Level::Low)
    }
}

impl Default for SimOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputLine for SimOutput {
    fn set_level(&mut self, level: Level) -> Result<(), DigitalOutError> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(DigitalOutError::InvalidPin);
        }
        state.history.push(level);
        Ok(())
    }

    fn get_level(&self) -> Level {
        self.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_burst_schedules_the_planned_echo() {
        let bench = SimBench::new();
        let mut trigger = bench.trigger();
        let clock = bench.clock();
        let echo = bench.echo();
        bench.plan_echo(300);

        trigger.set_high().unwrap();
        clock.delay_us(10);
        trigger.set_low().unwrap();

        assert_eq!(bench.trigger_pulses(), vec![10]);
        assert!(echo.is_low());
        clock.delay_us(DEFAULT_ECHO_LATENCY_US as u32);
        assert!(echo.is_high());
        clock.delay_us(300);
        assert!(echo.is_low());
    }

    #[test]
    fn zero_width_plan_means_no_echo() {
        let bench = SimBench::new();
        let mut trigger = bench.trigger();
        let clock = bench.clock();
        let echo = bench.echo();
        bench.plan_echo(0);

        trigger.set_high().unwrap();
        trigger.set_low().unwrap();
        clock.delay_us(DEFAULT_ECHO_LATENCY_US as u32 + 1);

        assert!(echo.is_low());
    }

    #[test]
    fn outputs_share_state_between_clones() {
        let led = SimOutput::new();
        let mut handle = led.clone();

        handle.set_high().unwrap();
        led.set_failing(true);

        assert_eq!(led.level(), Level::High);
        assert!(handle.set_low().is_err());
        assert_eq!(led.history(), vec![Level::Low, Level::High]);
    }

    #[test]
    fn delays_advance_the_clock_and_are_recorded() {
        let bench = SimBench::new();
        let clock = bench.clock();

        clock.delay_ms(500);

        assert_eq!(bench.now_us(), 500_000);
        assert_eq!(bench.sleeps_ms(), vec![500]);
    }
}
