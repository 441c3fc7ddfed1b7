use core::fmt::Write;

use heapless::{String, Vec};

use super::state::Health;
use super::view::MAX_LINES;
use super::{
    Clock, MonitorConfig, MonitorState, OutputSink, Reading, SensorError, SensorSource,
    StatusView, ERROR_THRESHOLD, POLL_INTERVAL_MS,
};

/// Log lines are short; anything longer is truncated.
type LogLine = String<64>;

/// What a single [`ReadingMonitor::run_once()`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// Valid reading, no preceding failures.
    Ok(Reading),
    /// Valid reading that ended a run of failures.
    Recovered(Reading),
    /// Failed poll below the threshold.
    Retrying { attempt: u8, error: SensorError },
    /// Failed poll at or above the threshold.
    Degraded { count: u8, error: SensorError },
}

/// Polls a [`SensorSource`], tracks consecutive failures, and reports every
/// cycle to an [`OutputSink`].
///
/// The monitor owns its collaborators and the only mutable state carried
/// between cycles, so there is nothing global to share or lock.
///
/// # Example
///
/// ```
/// use hygro::monitor::{OutputSink, Reading, ReadingMonitor, SensorError, SensorSource};
/// # struct Fixed;
/// # impl SensorSource for Fixed {
/// #     fn read(&mut self) -> Result<Reading, SensorError> { Ok(Reading::new(21.5, 60.0)) }
/// # }
/// # struct Discard;
/// # impl OutputSink for Discard {
/// #     fn render(&mut self, _lines: &[&str]) {}
/// #     fn log(&mut self, _line: &str) {}
/// # }
/// # struct NoDelay;
/// # impl embedded_hal::delay::DelayNs for NoDelay { fn delay_ns(&mut self, _ns: u32) {} }
///
/// let mut monitor = ReadingMonitor::new(Fixed, Discard, NoDelay);
/// monitor.run_once();
/// assert_eq!(monitor.consecutive_errors(), 0);
/// ```
pub struct ReadingMonitor<S, O, C> {
    sensor: S,
    sink: O,
    clock: C,
    state: MonitorState,
    config: MonitorConfig,
}

impl<S, O, C> ReadingMonitor<S, O, C>
where
    S: SensorSource,
    O: OutputSink,
    C: Clock,
{
    /// Create a monitor with [`MonitorConfig::default()`].
    pub fn new(sensor: S, sink: O, clock: C) -> Self {
        Self::with_config(sensor, sink, clock, MonitorConfig::default())
    }

    pub fn with_config(sensor: S, sink: O, clock: C, config: MonitorConfig) -> Self {
        Self {
            sensor,
            sink,
            clock,
            state: MonitorState::new(),
            config,
        }
    }

    /// Run one poll cycle: read, classify, render, log, then sleep for
    /// [`POLL_INTERVAL_MS`].
    ///
    /// Never fails. Every sensor error becomes a counter update plus output
    /// on the sink, and the sleep happens exactly once whichever branch ran.
    pub fn run_once(&mut self) -> PollOutcome {
        let outcome = match self.sensor.read() {
            Ok(reading) if reading.is_valid() => self.on_success(reading),
            Ok(_) => self.on_failure(SensorError::InvalidReading),
            Err(error) => self.on_failure(error),
        };

        self.clock.sleep_ms(POLL_INTERVAL_MS);
        outcome
    }

    /// Poll forever.
    pub fn run(&mut self) -> ! {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "Monitor started: threshold={}, interval={}ms",
            ERROR_THRESHOLD,
            POLL_INTERVAL_MS
        );

        loop {
            self.run_once();
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn consecutive_errors(&self) -> u8 {
        self.state.consecutive_errors()
    }

    pub fn health(&self) -> Health {
        self.state.health()
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn sink(&self) -> &O {
        &self.sink
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Give back the collaborators, dropping the error count.
    pub fn into_parts(self) -> (S, O, C) {
        (self.sensor, self.sink, self.clock)
    }

    // ── Branches ─────────────────────────────────────────────────────

    fn on_failure(&mut self, error: SensorError) -> PollOutcome {
        let count = self.state.record_failure();

        let mut line = LogLine::new();
        let _ = write!(line, "Sensor read failed (Error #{}): {}", count, error);
        self.sink.log(&line);

        match self.state.health() {
            Health::Retrying { attempt } => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Retrying: {}/{} ({})", attempt, ERROR_THRESHOLD, error);

                self.render(&StatusView::Retrying {
                    attempt,
                    threshold: ERROR_THRESHOLD,
                });
                PollOutcome::Retrying { attempt, error }
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Sensor degraded after {} failures ({})", count, error);

                self.render(&StatusView::Diagnostic {
                    data_pin: self.config.data_pin,
                });
                PollOutcome::Degraded { count, error }
            }
        }
    }

    fn on_success(&mut self, reading: Reading) -> PollOutcome {
        let recovered = self.state.record_success();
        if recovered {
            #[cfg(feature = "defmt")]
            defmt::info!("Sensor recovered");

            self.sink.log("Sensor recovered!");
        }

        self.render(&StatusView::Reading(reading));

        let mut line = LogLine::new();
        let _ = write!(
            line,
            "Temperature: {:.1} C Humidity: {:.1} %",
            reading.temperature_c, reading.humidity_pct
        );
        self.sink.log(&line);

        if recovered {
            PollOutcome::Recovered(reading)
        } else {
            PollOutcome::Ok(reading)
        }
    }

    fn render(&mut self, view: &StatusView) {
        let lines = view.lines();
        let refs: Vec<&str, MAX_LINES> = lines.iter().map(|l| l.as_str()).collect();
        self.sink.render(&refs);
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;
    use proptest::prelude::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::string::{String, ToString};
    use std::vec;
    use std::vec::Vec;

    // ── Fakes ────────────────────────────────────────────────────────

    /// Replays a fixed script of results, then repeats `fallback`.
    struct ScriptedSensor {
        script: vec::IntoIter<Result<Reading, SensorError>>,
        fallback: Result<Reading, SensorError>,
    }

    impl ScriptedSensor {
        fn new(script: Vec<Result<Reading, SensorError>>) -> Self {
            Self {
                script: script.into_iter(),
                fallback: Err(SensorError::Timeout),
            }
        }

        fn always(result: Result<Reading, SensorError>) -> Self {
            Self {
                script: Vec::new().into_iter(),
                fallback: result,
            }
        }
    }

    impl SensorSource for ScriptedSensor {
        fn read(&mut self) -> Result<Reading, SensorError> {
            self.script.next().unwrap_or(self.fallback)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Render(Vec<String>),
        Log(String),
        Sleep(u32),
    }

    /// Sink and clock both append here, so ordering across them is visible.
    type EventLog = Rc<RefCell<Vec<Event>>>;

    struct RecordingSink {
        events: EventLog,
    }

    impl RecordingSink {
        fn frames(&self) -> Vec<Vec<String>> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Render(lines) => Some(lines.clone()),
                    _ => None,
                })
                .collect()
        }

        fn logs(&self) -> Vec<String> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Log(line) => Some(line.clone()),
                    _ => None,
                })
                .collect()
        }

        fn logged(&self, line: &str) -> bool {
            self.logs().iter().any(|l| l == line)
        }
    }

    impl OutputSink for RecordingSink {
        fn render(&mut self, lines: &[&str]) {
            self.events
                .borrow_mut()
                .push(Event::Render(lines.iter().map(|l| l.to_string()).collect()));
        }

        fn log(&mut self, line: &str) {
            self.events.borrow_mut().push(Event::Log(line.to_string()));
        }
    }

    struct RecordingDelay {
        events: EventLog,
    }

    impl RecordingDelay {
        fn sleeps_ms(&self) -> Vec<u32> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Sleep(ms) => Some(*ms),
                    _ => None,
                })
                .collect()
        }
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, _ns: u32) {}

        fn delay_ms(&mut self, ms: u32) {
            self.events.borrow_mut().push(Event::Sleep(ms));
        }
    }

    type TestMonitor = ReadingMonitor<ScriptedSensor, RecordingSink, RecordingDelay>;

    fn monitor(sensor: ScriptedSensor) -> TestMonitor {
        monitor_with(sensor, MonitorConfig::default())
    }

    fn monitor_with(sensor: ScriptedSensor, config: MonitorConfig) -> TestMonitor {
        let events = EventLog::default();
        let sink = RecordingSink {
            events: Rc::clone(&events),
        };
        let clock = RecordingDelay { events };
        ReadingMonitor::with_config(sensor, sink, clock, config)
    }

    fn events(m: &TestMonitor) -> Vec<Event> {
        m.sink().events.borrow().clone()
    }

    fn ok(t: f32, h: f32) -> Result<Reading, SensorError> {
        Ok(Reading::new(t, h))
    }

    fn fail() -> Result<Reading, SensorError> {
        Err(SensorError::Timeout)
    }

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    fn retry_frame(attempt: u8) -> Vec<String> {
        let last = std::format!("Retry: {}/3", attempt);
        strings(&["Sensor Reading...", "Please wait...", "", last.as_str()])
    }

    fn diagnostic_frame() -> Vec<String> {
        strings(&[
            "SENSOR ERROR!",
            "",
            "Check:",
            "- GND connection",
            "- VCC (3.3-5V)",
            "- DATA pin (Pin 2)",
            "- Pull-up resistor",
        ])
    }

    // ── Classification ───────────────────────────────────────────────

    #[test]
    fn sensor_error_is_a_failure() {
        let mut m = monitor(ScriptedSensor::new(vec![Err(SensorError::ChecksumMismatch)]));
        let outcome = m.run_once();
        assert_eq!(
            outcome,
            PollOutcome::Retrying {
                attempt: 1,
                error: SensorError::ChecksumMismatch
            }
        );
        assert_eq!(m.consecutive_errors(), 1);
        assert_eq!(m.sink().logs(), ["Sensor read failed (Error #1): checksum mismatch"]);
    }

    #[test]
    fn nan_reading_is_a_failure() {
        let mut m = monitor(ScriptedSensor::new(vec![ok(f32::NAN, 50.0), ok(20.0, f32::NAN)]));

        assert_eq!(
            m.run_once(),
            PollOutcome::Retrying {
                attempt: 1,
                error: SensorError::InvalidReading
            }
        );
        assert_eq!(
            m.run_once(),
            PollOutcome::Retrying {
                attempt: 2,
                error: SensorError::InvalidReading
            }
        );
        assert_eq!(m.consecutive_errors(), 2);
        assert_eq!(m.sink().logs()[0], "Sensor read failed (Error #1): invalid reading");
    }

    // ── Threshold boundary ───────────────────────────────────────────

    #[test]
    fn failures_below_threshold_render_retry_progress() {
        let mut m = monitor(ScriptedSensor::always(fail()));
        m.run_once();
        m.run_once();

        let frames = m.sink().frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], retry_frame(1));
        assert_eq!(frames[1], retry_frame(2));
        assert_eq!(m.health(), Health::Retrying { attempt: 2 });
    }

    #[test]
    fn failures_at_or_above_threshold_render_diagnostic() {
        let mut m = monitor(ScriptedSensor::always(fail()));
        for _ in 0..6 {
            m.run_once();
        }

        let frames = m.sink().frames();
        for frame in &frames[2..] {
            assert_eq!(*frame, diagnostic_frame());
            assert!(!frame.iter().any(|l| l.starts_with("Retry")));
        }
        assert_eq!(m.health(), Health::Degraded { count: 6 });
    }

    #[test]
    fn third_failure_reports_degraded() {
        let mut m = monitor(ScriptedSensor::always(fail()));
        m.run_once();
        m.run_once();
        assert_eq!(
            m.run_once(),
            PollOutcome::Degraded {
                count: 3,
                error: SensorError::Timeout
            }
        );
    }

    #[test]
    fn diagnostic_names_configured_data_pin() {
        let config = MonitorConfig { data_pin: "GP15" };
        let mut m = monitor_with(ScriptedSensor::always(fail()), config);
        for _ in 0..3 {
            m.run_once();
        }
        let frames = m.sink().frames();
        assert!(frames[2].iter().any(|l| l == "- DATA pin (GP15)"));
    }

    // ── Success path ─────────────────────────────────────────────────

    #[test]
    fn repeated_success_renders_identical_view() {
        let mut m = monitor(ScriptedSensor::always(ok(21.5, 60.0)));
        for _ in 0..5 {
            assert_eq!(m.run_once(), PollOutcome::Ok(Reading::new(21.5, 60.0)));
            assert_eq!(m.consecutive_errors(), 0);
        }

        let expected = strings(&["Temp: 21.5 C", "Humidity: 60.0 %", "", "Status: OK"]);
        let frames = m.sink().frames();
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| *f == expected));
        assert!(m
            .sink()
            .logs()
            .iter()
            .all(|l| l == "Temperature: 21.5 C Humidity: 60.0 %"));
    }

    #[test]
    fn success_without_prior_failure_does_not_log_recovery() {
        let mut m = monitor(ScriptedSensor::new(vec![ok(20.0, 40.0)]));
        m.run_once();
        assert!(!m.sink().logged("Sensor recovered!"));
    }

    #[test]
    fn failure_never_renders_stale_reading() {
        let mut m = monitor(ScriptedSensor::new(vec![
            ok(23.4, 56.7),
            fail(),
            fail(),
            fail(),
        ]));
        for _ in 0..4 {
            m.run_once();
        }

        let frames = m.sink().frames();
        for frame in &frames[1..] {
            for line in frame.iter() {
                assert!(!line.contains("23.4"), "stale value in {:?}", frame);
                assert!(!line.contains("56.7"), "stale value in {:?}", frame);
                assert!(!line.starts_with("Temp"));
            }
        }
    }

    // ── Timing ───────────────────────────────────────────────────────

    #[test]
    fn sleeps_once_per_cycle_on_every_branch() {
        let mut m = monitor(ScriptedSensor::new(vec![
            ok(20.0, 50.0),
            fail(),
            fail(),
            fail(),
            ok(20.0, 50.0),
        ]));
        for _ in 0..5 {
            m.run_once();
        }
        assert_eq!(m.clock().sleeps_ms(), [2000; 5]);
    }

    #[test]
    fn sleep_is_the_last_thing_each_cycle_does() {
        // Success, retry, diagnostic, recovery: every branch of run_once.
        let mut m = monitor(ScriptedSensor::new(vec![
            ok(20.0, 50.0),
            fail(),
            fail(),
            fail(),
            ok(21.0, 51.0),
        ]));

        let mut seen = 0;
        for _ in 0..5 {
            m.run_once();
            let all = events(&m);
            let cycle = &all[seen..];
            seen = all.len();

            let sleeps = cycle.iter().filter(|e| matches!(e, Event::Sleep(_))).count();
            assert_eq!(sleeps, 1, "cycle events: {:?}", cycle);
            assert_eq!(cycle.last(), Some(&Event::Sleep(2000)));
            assert!(cycle.iter().any(|e| matches!(e, Event::Render(_))));
            assert!(cycle.iter().any(|e| matches!(e, Event::Log(_))));
        }
    }

    // ── End to end ───────────────────────────────────────────────────

    #[test]
    fn four_failures_then_recovery() {
        let mut m = monitor(ScriptedSensor::new(vec![
            fail(),
            fail(),
            fail(),
            fail(),
            ok(22.0, 55.0),
        ]));
        for _ in 0..4 {
            m.run_once();
        }
        assert_eq!(m.run_once(), PollOutcome::Recovered(Reading::new(22.0, 55.0)));
        assert_eq!(m.consecutive_errors(), 0);
        assert_eq!(m.health(), Health::Nominal);

        let expected = vec![
            Event::Log("Sensor read failed (Error #1): timeout".to_string()),
            Event::Render(retry_frame(1)),
            Event::Sleep(2000),
            Event::Log("Sensor read failed (Error #2): timeout".to_string()),
            Event::Render(retry_frame(2)),
            Event::Sleep(2000),
            Event::Log("Sensor read failed (Error #3): timeout".to_string()),
            Event::Render(diagnostic_frame()),
            Event::Sleep(2000),
            Event::Log("Sensor read failed (Error #4): timeout".to_string()),
            Event::Render(diagnostic_frame()),
            Event::Sleep(2000),
            Event::Log("Sensor recovered!".to_string()),
            Event::Render(strings(&[
                "Temp: 22.0 C",
                "Humidity: 55.0 %",
                "",
                "Status: OK",
            ])),
            Event::Log("Temperature: 22.0 C Humidity: 55.0 %".to_string()),
            Event::Sleep(2000),
        ];
        assert_eq!(events(&m), expected);
    }

    #[test]
    fn degraded_heals_on_next_success_and_counts_again_from_one() {
        let mut m = monitor(ScriptedSensor::new(vec![
            fail(),
            fail(),
            fail(),
            ok(21.0, 45.0),
            fail(),
        ]));
        for _ in 0..4 {
            m.run_once();
        }
        assert_eq!(
            m.run_once(),
            PollOutcome::Retrying {
                attempt: 1,
                error: SensorError::Timeout
            }
        );
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        #[test]
        fn n_failures_count_n_capped(n in 0usize..400) {
            let mut m = monitor(ScriptedSensor::always(fail()));
            for _ in 0..n {
                m.run_once();
            }
            prop_assert_eq!(m.consecutive_errors() as usize, n.min(u8::MAX as usize));
        }

        #[test]
        fn success_resets_and_logs_recovery_iff_failed(n in 0usize..20) {
            let mut script: Vec<_> = (0..n).map(|_| fail()).collect();
            script.push(ok(19.0, 30.0));
            let mut m = monitor(ScriptedSensor::new(script));
            for _ in 0..=n {
                m.run_once();
            }
            prop_assert_eq!(m.consecutive_errors(), 0);
            let recovered = m.sink().logged("Sensor recovered!");
            prop_assert_eq!(recovered, n > 0);
        }
    }
}
