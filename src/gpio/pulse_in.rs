use super::{Clock, InputLine, Level};

/// Measures how long `line` stays at `level`, in microseconds.
///
/// Any pulse already in progress when the call starts is skipped, then the function waits for the
/// line to reach `level` and times how long it holds it. `timeout_us` bounds the whole call, counted
/// from its start. If it elapses in any of the three phases the result is 0.
///
/// # Arguments
///
/// - `line`: The input to sample.
/// - `level`: The level whose duration is measured.
/// - `clock`: The time base used both for the timeout and for the pulse width.
/// - `timeout_us`: Upper bound for the whole measurement.
///
/// # Returns
///
/// The width of the pulse in microseconds, or 0 on timeout.
pub fn pulse_in<L, C>(line: &L, level: Level, clock: &C, timeout_us: u64) -> u64
where
    L: InputLine + ?Sized,
    C: Clock + ?Sized,
{
    let started_at = clock.now_us();

    if !wait_while(line, level, clock, started_at, timeout_us) {
        return 0;
    }
    if !wait_while(line, level.inverse(), clock, started_at, timeout_us) {
        return 0;
    }
    let pulse_started_at = clock.now_us();
    if !wait_while(line, level, clock, started_at, timeout_us) {
        return 0;
    }
    elapsed_us(clock, pulse_started_at)
}

/// Spins while `line` reads `level`. Returns false if the deadline passed first.
fn wait_while<L, C>(line: &L, level: Level, clock: &C, started_at: i64, timeout_us: u64) -> bool
where
    L: InputLine + ?Sized,
    C: Clock + ?Sized,
{
    while line.get_level() == level {
        if elapsed_us(clock, started_at) > timeout_us {
            return false;
        }
    }
    true
}

fn elapsed_us<C: Clock + ?Sized>(clock: &C, since: i64) -> u64 {
    clock.now_us().saturating_sub(since).max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimBench;

    #[test]
    fn measures_the_width_of_a_pulse() {
        let bench = SimBench::new();
        let echo = bench.echo();
        let clock = bench.clock();
        bench.schedule_pulse(100, 1165);

        let width = pulse_in(&echo, Level::High, &clock, 50_000);

        assert!(width.abs_diff(1165) <= 2, "measured {width}");
    }

    #[test]
    fn returns_zero_when_no_pulse_arrives() {
        let bench = SimBench::new();
        let echo = bench.echo();
        let clock = bench.clock();

        assert_eq!(pulse_in(&echo, Level::High, &clock, 5_000), 0);
        assert!(clock.now_us() > 5_000);
    }

    #[test]
    fn returns_zero_when_the_pulse_outlasts_the_timeout() {
        let bench = SimBench::new();
        let echo = bench.echo();
        let clock = bench.clock();
        bench.schedule_pulse(10, 40_000);

        assert_eq!(pulse_in(&echo, Level::High, &clock, 30_000), 0);
    }

    #[test]
    fn skips_a_pulse_already_in_progress() {
        let bench = SimBench::new();
        let echo = bench.echo();
        let clock = bench.clock();
        bench.schedule_pulse(0, 300);
        bench.schedule_pulse(1_000, 500);

        let width = pulse_in(&echo, Level::High, &clock, 50_000);

        assert!(width.abs_diff(500) <= 2, "measured {width}");
    }

    #[test]
    fn can_time_low_pulses() {
        let bench = SimBench::new();
        let echo = bench.echo();
        let clock = bench.clock();
        bench.schedule_pulse(0, 200);

        // Line is high until 200, then low forever: the low phase never ends
        assert_eq!(pulse_in(&echo, Level::Low, &clock, 2_000), 0);
    }
}
