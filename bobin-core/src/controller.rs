//! Panel controller
//!
//! `Winder` owns every piece of mutable panel state: the operation state,
//! the Idle input fields, run parameters, counters, marker positions, the
//! serial line buffer and the screen frame. It never touches hardware.
//! The main loop feeds it key events, input levels and received bytes,
//! renders its screen, and drains its effects (commands for the motor
//! controller, diagnostic log lines, buzzer patterns).

use core::fmt::{self, Write};

use heapless::{Deque, String};

use bobin_display::templates::{
    self, BANNER_PAUSED, BANNER_RUNNING, DIAMETER_FIELD_ROW, FIELD_COL, PROGRESS_ROW, SPEED_ROW,
    TURNS_FIELD_ROW, VALUE_COL, WIDTH_COL, WIDTH_ROW,
};
use bobin_display::{Screen, SCREEN_COLS};
use bobin_hal::{AnalogInput, KeyEvent, Level};
use bobin_protocol::{ControllerCommand, LineBuffer, PeerMessage, WorkOrder};

use crate::config::WinderConfig;
use crate::input::{Focus, InputEditor};
use crate::keys::Key;
use crate::progress::{ProgressCounters, ProgressTracker};
use crate::sampler::{Sampler, SpeedSampler};
use crate::state::{Event, OperationState};
use crate::timing::{Edge, EdgeDetector, Throttle};
use crate::tone::TonePattern;

/// Pending effects kept before the oldest are drained
pub const EFFECT_QUEUE_LEN: usize = 16;

/// Longest diagnostic log line
pub const LOG_LINE_LEN: usize = 80;

/// One diagnostic log line
pub type LogLine = String<LOG_LINE_LEN>;

/// Something the main loop must do on the controller's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write a command line to the motor controller
    Send(ControllerCommand),
    /// Write a line to the diagnostic log
    Log(LogLine),
    /// Sound the buzzer
    Tone(TonePattern),
}

/// Job parameters fixed when leaving Idle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunParameters {
    /// Target turn count
    pub total_turns: u16,
    /// Wire diameter in mm
    pub wire_diameter: f32,
    /// Target speed sampled when the job was confirmed
    pub speed: u16,
}

/// Marker positions reported by the motor controller
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Markers {
    pub first: Option<f32>,
    pub second: Option<f32>,
}

/// The panel controller
pub struct Winder {
    config: WinderConfig,
    state: OperationState,
    editor: InputEditor,
    params: RunParameters,
    progress: ProgressTracker,
    markers: Markers,
    pedal: EdgeDetector,
    sensor: EdgeDetector,
    sampler: Sampler,
    refresh: Throttle,
    shown_progress: Option<(u16, u16)>,
    shown_speed: Option<u16>,
    line: LineBuffer,
    screen: Screen,
    screen_needs_update: bool,
    effects: Deque<Effect, EFFECT_QUEUE_LEN>,
}

impl Winder {
    /// Controller in Idle with empty fields
    pub fn new(config: WinderConfig) -> Self {
        Self {
            config,
            state: OperationState::Idle,
            editor: InputEditor::new(),
            params: RunParameters::default(),
            progress: ProgressTracker::new(config.timing.sensor_debounce_ms),
            markers: Markers::default(),
            pedal: EdgeDetector::new(),
            sensor: EdgeDetector::new(),
            sampler: Sampler::from_config(config.speed),
            refresh: Throttle::new(config.timing.refresh_ms),
            shown_progress: None,
            shown_speed: None,
            line: LineBuffer::new(),
            screen: Screen::new(),
            screen_needs_update: true,
            effects: Deque::new(),
        }
    }

    pub fn config(&self) -> &WinderConfig {
        &self.config
    }

    pub fn state(&self) -> OperationState {
        self.state
    }

    pub fn editor(&self) -> &InputEditor {
        &self.editor
    }

    pub fn params(&self) -> &RunParameters {
        &self.params
    }

    pub fn progress(&self) -> &ProgressCounters {
        self.progress.counters()
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Bytes of an incomplete received line
    pub fn pending_line_len(&self) -> usize {
        self.line.len()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Screen frame for rendering
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Take the oldest pending effect
    pub fn next_effect(&mut self) -> Option<Effect> {
        self.effects.pop_front()
    }

    // ---------------------------------------------------------------
    // Keypad
    // ---------------------------------------------------------------

    /// Handle one keypad edge
    ///
    /// `adc` is read when a job is confirmed to fix its target speed.
    pub fn handle_key<A: AnalogInput>(&mut self, event: KeyEvent, now_ms: u32, adc: &mut A) {
        let Some(key) = Key::from_char(event.key) else {
            return;
        };

        if !event.is_press() {
            // Only Offset jogs are stopped; a jog key still held when C
            // starts winding is released without a Stop
            if self.state.allows_jog() && key.is_jog() {
                self.send_logged(ControllerCommand::Stop);
            }
            return;
        }

        match self.state {
            OperationState::Idle => self.idle_key(key, now_ms, adc),
            OperationState::Offset => self.offset_key(key),
            OperationState::Running => {
                if key == Key::Escape {
                    self.log(format_args!("Escape ignored while running"));
                    self.apply(Event::Escape);
                }
            }
            OperationState::Paused => {}
            OperationState::Finished => {
                if key == Key::Confirm {
                    self.finish_job();
                }
            }
        }
    }

    fn idle_key<A: AnalogInput>(&mut self, key: Key, now_ms: u32, adc: &mut A) {
        match key {
            Key::Confirm => self.start_offset(now_ms, adc),
            Key::FocusDiameter => self.editor.set_focus(Focus::Diameter),
            Key::FocusTurns => self.editor.set_focus(Focus::Turns),
            Key::Digit(d) => self.editor.type_digit(d),
            Key::Clear => self.editor.clear(),
            _ => return,
        }
        if self.state.accepts_input() {
            self.draw_fields();
        }
    }

    fn offset_key(&mut self, key: Key) {
        match key {
            Key::Confirm => self.start_winding(),
            Key::OffsetFirst => self.send(ControllerCommand::OffsetFirst),
            Key::OffsetSecond => self.send(ControllerCommand::OffsetSecond),
            Key::JogLeft => self.send_logged(ControllerCommand::Left),
            Key::JogRight => self.send_logged(ControllerCommand::Right),
            _ => {}
        }
    }

    fn start_offset<A: AnalogInput>(&mut self, now_ms: u32, adc: &mut A) {
        let speed = self.sampler.sample(adc, now_ms);
        self.params = RunParameters {
            total_turns: self.editor.total_turns(),
            wire_diameter: self.editor.wire_diameter(),
            speed,
        };
        self.progress.reset(self.params.total_turns);
        self.progress.set_speed(speed);
        self.apply(Event::Confirm);
    }

    fn start_winding(&mut self) {
        self.pedal.reset();
        self.sensor.reset();
        self.refresh.reset();
        self.apply(Event::Confirm);
    }

    fn finish_job(&mut self) {
        self.params = RunParameters::default();
        self.progress.reset(0);
        self.markers = Markers::default();
        self.pedal.reset();
        self.apply(Event::Confirm);
    }

    // ---------------------------------------------------------------
    // Pedal and turn sensor
    // ---------------------------------------------------------------

    /// Sample the pedal and turn sensor lines (both active low)
    ///
    /// Only acts while Running or Paused.
    pub fn poll_inputs(&mut self, pedal: Level, sensor: Level, now_ms: u32) {
        if !self.state.is_winding() {
            return;
        }

        match self.pedal.update(pedal) {
            Some(Edge::Falling) => {
                self.log(format_args!("Pedal: Low"));
                self.send_logged(self.work_order());
                self.apply(Event::PedalPressed);
            }
            Some(Edge::Rising) => {
                self.log(format_args!("Pedal: High"));
                if self.state == OperationState::Running {
                    self.send_logged(ControllerCommand::Pause);
                    self.apply(Event::PedalReleased);
                }
            }
            None => {}
        }

        // The first sensor read is only a baseline; a magnet parked on the
        // sensor is not a turn
        let sensor_edge = match self.sensor.last() {
            Some(_) => self.sensor.update(sensor),
            None => {
                self.sensor = EdgeDetector::with_level(sensor);
                None
            }
        };
        if sensor_edge == Some(Edge::Falling) && self.progress.pulse(now_ms) {
            if self.progress.is_complete() {
                self.complete();
            } else if !self.screen_needs_update {
                self.draw_progress();
            }
        }
    }

    fn work_order(&self) -> ControllerCommand {
        ControllerCommand::Work(WorkOrder {
            cycle: self.progress.counters().current_cycle,
            wire_diameter: self.params.wire_diameter,
            speed: self.params.speed,
        })
    }

    fn complete(&mut self) {
        let counters = *self.progress.counters();
        self.send_logged(ControllerCommand::Pause);
        self.push(Effect::Tone(TonePattern::FINISHED));
        self.log(format_args!(
            "Finished: {} / {}",
            counters.current_turns,
            self.progress.total_turns()
        ));
        self.apply(Event::TargetReached);
    }

    // ---------------------------------------------------------------
    // Serial link
    // ---------------------------------------------------------------

    /// Feed one byte received from the motor controller
    pub fn receive_byte(&mut self, byte: u8) {
        let truncated = self.line.is_truncated();
        if let Some(line) = self.line.feed(byte) {
            if truncated {
                self.log(format_args!("RX line truncated to {} bytes", line.len()));
            }
            self.handle_line(&line);
        }
    }

    /// Feed a run of received bytes
    pub fn receive_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.receive_byte(byte);
        }
    }

    fn handle_line(&mut self, line: &str) {
        if self.config.link.mirror_received {
            self.log(format_args!("RX: {}", line.trim_end()));
        }

        match PeerMessage::parse(line) {
            Some(PeerMessage::FirstMarker(pos)) => {
                self.push(Effect::Tone(TonePattern::FIRST_MARKER));
                self.markers.first = Some(pos);
                self.draw_width();
            }
            Some(PeerMessage::SecondMarker(pos)) => {
                self.push(Effect::Tone(TonePattern::SECOND_MARKER));
                self.markers.second = Some(pos);
                self.draw_width();
            }
            Some(PeerMessage::CycleFinished(n)) => {
                if self.state.is_winding() {
                    self.progress.cycle_finished(n);
                }
            }
            Some(PeerMessage::OffsetFirstDone) => {
                self.push(Effect::Tone(TonePattern::FIRST_MARKER));
            }
            Some(PeerMessage::OffsetSecondDone) => {
                self.push(Effect::Tone(TonePattern::SECOND_MARKER));
            }
            None => {}
        }
    }

    // ---------------------------------------------------------------
    // Screen
    // ---------------------------------------------------------------

    /// Per-tick screen upkeep
    ///
    /// Redraws the whole frame after a state change. While winding, also
    /// refreshes the turn and speed values at most once per refresh
    /// interval, sampling the speed input each time.
    pub fn service<A: AnalogInput>(&mut self, now_ms: u32, adc: &mut A) {
        if self.screen_needs_update {
            self.redraw();
            self.screen_needs_update = false;
        }

        if self.state.is_winding() && self.refresh.ready(now_ms) {
            self.draw_progress();
            let speed = self.sampler.sample(adc, now_ms);
            self.progress.set_speed(speed);
            self.draw_speed();
        }
    }

    fn redraw(&mut self) {
        self.shown_progress = None;
        self.shown_speed = None;

        match self.state {
            OperationState::Idle => {
                self.screen.load(&templates::IDLE);
                self.screen.set_blink(true);
                self.draw_fields();
            }
            OperationState::Offset => {
                self.screen.load(&templates::OFFSET);
                self.screen.set_blink(false);
                self.screen.set_cursor(None);
                self.draw_width();
            }
            OperationState::Running | OperationState::Paused => {
                self.screen.load(&templates::RUNNING);
                self.screen.set_blink(false);
                self.screen.set_cursor(None);
                let banner = if self.state == OperationState::Paused {
                    BANNER_PAUSED
                } else {
                    BANNER_RUNNING
                };
                self.screen.set_line(0, banner);
                self.draw_progress();
                self.draw_speed();
            }
            OperationState::Finished => {
                self.screen.load(&templates::FINISHED);
                self.screen.set_blink(false);
                self.screen.set_cursor(None);
                self.draw_progress();
            }
        }
    }

    fn draw_fields(&mut self) {
        let turns = self.editor.turns_text();
        self.screen.write_at(TURNS_FIELD_ROW, FIELD_COL, turns);
        let diameter = self.editor.diameter_text();
        self.screen.write_at(DIAMETER_FIELD_ROW, FIELD_COL, &diameter);
        self.screen.set_cursor(Some(self.editor.cursor_position()));
    }

    fn draw_width(&mut self) {
        if self.state != OperationState::Offset {
            return;
        }
        if let Some(width) = self.markers.second {
            self.screen
                .clear_span(WIDTH_ROW, WIDTH_COL, SCREEN_COLS - WIDTH_COL);
            self.screen
                .write_fmt_at(WIDTH_ROW, WIDTH_COL, format_args!("{:.2}mm", width));
        }
    }

    fn draw_progress(&mut self) {
        let value = (self.progress.counters().current_turns, self.progress.total_turns());
        if self.shown_progress == Some(value) {
            return;
        }
        self.shown_progress = Some(value);
        self.screen
            .clear_span(PROGRESS_ROW, VALUE_COL, SCREEN_COLS - VALUE_COL);
        self.screen
            .write_fmt_at(PROGRESS_ROW, VALUE_COL, format_args!("{} / {}", value.0, value.1));
    }

    fn draw_speed(&mut self) {
        let speed = self.progress.counters().current_speed;
        if self.shown_speed == Some(speed) {
            return;
        }
        self.shown_speed = Some(speed);
        self.screen
            .clear_span(SPEED_ROW, VALUE_COL, SCREEN_COLS - VALUE_COL);
        self.screen
            .write_fmt_at(SPEED_ROW, VALUE_COL, format_args!("{} rpm", speed));
    }

    // ---------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------

    fn apply(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next != self.state {
            self.state = next;
            self.screen_needs_update = true;
        }
    }

    fn push(&mut self, effect: Effect) {
        // A full queue drops the effect; the link is best effort
        let _ = self.effects.push_back(effect);
    }

    fn send(&mut self, command: ControllerCommand) {
        self.push(Effect::Send(command));
    }

    fn send_logged(&mut self, command: ControllerCommand) {
        self.send(command);
        if let Ok(text) = command.text() {
            self.log(format_args!("{}", text));
        }
    }

    fn log(&mut self, args: fmt::Arguments<'_>) {
        let mut line = LogLine::new();
        if line.write_fmt(args).is_ok() {
            self.push(Effect::Log(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakePot(u16);

    impl AnalogInput for FakePot {
        fn read_raw(&mut self) -> u16 {
            self.0
        }
    }

    fn winder() -> Winder {
        Winder::new(WinderConfig::default())
    }

    fn press(w: &mut Winder, key: char) {
        w.handle_key(KeyEvent::pressed(key), 0, &mut FakePot(255));
    }

    fn type_keys(w: &mut Winder, keys: &str) {
        for key in keys.chars() {
            press(w, key);
        }
    }

    fn drain(w: &mut Winder) -> Vec<Effect> {
        core::iter::from_fn(|| w.next_effect()).collect()
    }

    fn sent(effects: &[Effect]) -> Vec<ControllerCommand> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Send(cmd) => Some(*cmd),
                _ => None,
            })
            .collect()
    }

    fn logs(effects: &[Effect]) -> Vec<std::string::String> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Log(line) => Some(line.as_str().into()),
                _ => None,
            })
            .collect()
    }

    fn tones(effects: &[Effect]) -> Vec<TonePattern> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Tone(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// Idle → Offset → Running with the given fields
    fn running(turns: &str, diameter: &str) -> Winder {
        let mut w = winder();
        type_keys(&mut w, turns);
        press(&mut w, 'E');
        type_keys(&mut w, diameter);
        type_keys(&mut w, "CC");
        assert_eq!(w.state(), OperationState::Running);
        drain(&mut w);
        w
    }

    #[test]
    fn test_confirm_fixes_run_parameters() {
        let mut w = winder();
        type_keys(&mut w, "0610");
        press(&mut w, 'E');
        type_keys(&mut w, "320");
        press(&mut w, 'C');

        assert_eq!(w.state(), OperationState::Offset);
        assert_eq!(w.params().total_turns, 610);
        assert_eq!(w.params().wire_diameter, 3.2);
        assert_eq!(w.params().speed, map_full_scale());
        assert_eq!(w.progress().current_turns, 0);
    }

    fn map_full_scale() -> u16 {
        // One full-scale reading in an empty 10-slot window
        crate::sampler::map_range(25, 0, 255, 1, 400) as u16
    }

    #[test]
    fn test_idle_screen_shows_fields_and_cursor() {
        let mut w = winder();
        w.service(0, &mut FakePot(0));
        type_keys(&mut w, "12");
        press(&mut w, 'E');
        type_keys(&mut w, "5");

        assert_eq!(w.screen().line(0), Some("SPIR:    1200       "));
        assert_eq!(w.screen().line(1), Some("TEL CAP: 5.00mm     "));
        assert_eq!(w.screen().cursor(), Some((1, 11)));
        assert!(w.screen().blink());
    }

    #[test]
    fn test_fields_persist_across_jobs() {
        let mut w = running("0002", "100");
        w.poll_inputs(Level::High, Level::High, 0);
        w.poll_inputs(Level::High, Level::Low, 10);
        w.poll_inputs(Level::High, Level::High, 20);
        w.poll_inputs(Level::High, Level::Low, 40);
        assert_eq!(w.state(), OperationState::Finished);

        press(&mut w, 'C');
        assert_eq!(w.state(), OperationState::Idle);
        assert_eq!(w.editor().turns_text(), "0002");
        assert_eq!(w.params(), &RunParameters::default());
        assert_eq!(w.markers(), &Markers::default());
    }

    #[test]
    fn test_offset_commands_and_jog() {
        let mut w = winder();
        press(&mut w, 'C');
        drain(&mut w);

        press(&mut w, 'G');
        press(&mut w, 'H');
        press(&mut w, 'A');
        w.handle_key(KeyEvent::released('A'), 0, &mut FakePot(0));
        press(&mut w, 'B');
        w.handle_key(KeyEvent::released('B'), 0, &mut FakePot(0));
        // Release of a non-jog key sends nothing
        w.handle_key(KeyEvent::released('G'), 0, &mut FakePot(0));

        let effects = drain(&mut w);
        assert_eq!(
            sent(&effects),
            vec![
                ControllerCommand::OffsetFirst,
                ControllerCommand::OffsetSecond,
                ControllerCommand::Left,
                ControllerCommand::Stop,
                ControllerCommand::Right,
                ControllerCommand::Stop,
            ]
        );
        assert_eq!(logs(&effects), vec!["Left", "Stop", "Right", "Stop"]);
    }

    #[test]
    fn test_jog_ignored_outside_offset() {
        let mut w = winder();
        press(&mut w, 'A');
        w.handle_key(KeyEvent::released('A'), 0, &mut FakePot(0));
        assert!(sent(&drain(&mut w)).is_empty());
    }

    #[test]
    fn test_jog_held_into_running_sends_no_stop() {
        let mut w = winder();
        press(&mut w, 'C');
        press(&mut w, 'A');
        press(&mut w, 'C');
        assert_eq!(w.state(), OperationState::Running);
        w.handle_key(KeyEvent::released('A'), 0, &mut FakePot(0));

        assert_eq!(sent(&drain(&mut w)), vec![ControllerCommand::Left]);
    }

    #[test]
    fn test_offset_disables_blink() {
        let mut w = winder();
        w.service(0, &mut FakePot(0));
        assert!(w.screen().blink());
        press(&mut w, 'C');
        w.service(0, &mut FakePot(0));
        assert!(!w.screen().blink());
        assert_eq!(w.screen().line(0), Some("GENISLIK: -         "));
    }

    #[test]
    fn test_pedal_press_release_emits_work_then_pause() {
        let mut w = running("0100", "320");
        w.poll_inputs(Level::High, Level::High, 0);
        w.poll_inputs(Level::Low, Level::High, 10);
        w.poll_inputs(Level::Low, Level::High, 20);
        w.poll_inputs(Level::High, Level::High, 30);

        let effects = drain(&mut w);
        let cmds = sent(&effects);
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[0], ControllerCommand::Work(_)));
        assert_eq!(cmds[1], ControllerCommand::Pause);
        assert_eq!(w.state(), OperationState::Paused);

        let logs = logs(&effects);
        assert_eq!(logs[0], "Pedal: Low");
        assert!(logs[1].starts_with("Work: 0|3.20|"));
        assert_eq!(logs[2], "Pedal: High");
        assert_eq!(logs[3], "Pause");
    }

    #[test]
    fn test_no_pause_on_first_high_read() {
        let mut w = running("0100", "320");
        w.poll_inputs(Level::High, Level::High, 0);
        assert!(drain(&mut w).is_empty());
        assert_eq!(w.state(), OperationState::Running);
    }

    #[test]
    fn test_paused_pedal_resumes() {
        let mut w = running("0100", "320");
        w.poll_inputs(Level::Low, Level::High, 0);
        w.poll_inputs(Level::High, Level::High, 10);
        assert_eq!(w.state(), OperationState::Paused);
        drain(&mut w);

        w.poll_inputs(Level::Low, Level::High, 20);
        assert_eq!(w.state(), OperationState::Running);
        let cmds = sent(&drain(&mut w));
        assert!(matches!(cmds.as_slice(), [ControllerCommand::Work(_)]));
    }

    #[test]
    fn test_paused_keeps_counting() {
        let mut w = running("0100", "320");
        w.poll_inputs(Level::Low, Level::High, 0);
        w.poll_inputs(Level::High, Level::High, 10);
        w.poll_inputs(Level::High, Level::Low, 20);
        assert_eq!(w.state(), OperationState::Paused);
        assert_eq!(w.progress().current_turns, 1);
    }

    #[test]
    fn test_work_carries_cycle_and_target_speed() {
        let mut w = running("0100", "125");
        let target = w.params().speed;
        assert_eq!(target, map_full_scale());

        // The live reading climbs as the window fills; the order must not
        for t in 0..20 {
            w.service(t * 30, &mut FakePot(255));
        }
        assert!(w.progress().current_speed > target);

        w.receive_bytes(b"CycleFinished: 3\n");
        w.poll_inputs(Level::Low, Level::High, 600);

        let cmds = sent(&drain(&mut w));
        assert_eq!(
            cmds,
            vec![ControllerCommand::Work(WorkOrder {
                cycle: 4,
                wire_diameter: 1.25,
                speed: target,
            })]
        );
    }

    #[test]
    fn test_sensor_pulses_and_bounce() {
        let mut w = running("0100", "320");
        w.poll_inputs(Level::High, Level::High, 0);
        let mut now = 10;
        for _ in 0..10 {
            w.poll_inputs(Level::High, Level::Low, now);
            w.poll_inputs(Level::High, Level::High, now + 5);
            now += 10;
        }
        assert_eq!(w.progress().current_turns, 10);

        // Two falls 4 ms apart count once
        w.poll_inputs(Level::High, Level::Low, now);
        w.poll_inputs(Level::High, Level::High, now + 2);
        w.poll_inputs(Level::High, Level::Low, now + 4);
        assert_eq!(w.progress().current_turns, 11);
    }

    #[test]
    fn test_sensor_low_on_entry_is_not_a_turn() {
        let mut w = running("0100", "320");
        w.poll_inputs(Level::High, Level::Low, 0);
        assert_eq!(w.progress().current_turns, 0);
        w.poll_inputs(Level::High, Level::High, 5);
        w.poll_inputs(Level::High, Level::Low, 20);
        assert_eq!(w.progress().current_turns, 1);
    }

    #[test]
    fn test_sensor_ignored_outside_winding() {
        let mut w = winder();
        w.poll_inputs(Level::Low, Level::Low, 0);
        assert_eq!(w.progress().current_turns, 0);
        assert!(drain(&mut w).is_empty());
    }

    #[test]
    fn test_target_reached_finishes() {
        let mut w = running("0001", "320");
        w.poll_inputs(Level::Low, Level::High, 0);
        drain(&mut w);
        w.poll_inputs(Level::Low, Level::Low, 10);

        assert_eq!(w.state(), OperationState::Finished);
        let effects = drain(&mut w);
        assert_eq!(sent(&effects), vec![ControllerCommand::Pause]);
        assert_eq!(tones(&effects), vec![TonePattern::FINISHED]);

        // Pedal no longer does anything
        w.poll_inputs(Level::High, Level::High, 20);
        assert!(sent(&drain(&mut w)).is_empty());
    }

    #[test]
    fn test_target_reached_while_paused() {
        let mut w = running("0002", "320");
        w.poll_inputs(Level::Low, Level::High, 0);
        w.poll_inputs(Level::Low, Level::Low, 10);
        w.poll_inputs(Level::High, Level::High, 15);
        assert_eq!(w.state(), OperationState::Paused);
        drain(&mut w);

        w.poll_inputs(Level::High, Level::Low, 30);
        assert_eq!(w.state(), OperationState::Finished);
        assert_eq!(sent(&drain(&mut w)), vec![ControllerCommand::Pause]);
        assert_eq!(w.progress().current_turns, 2);
    }

    #[test]
    fn test_zero_target_never_finishes() {
        let mut w = running("0000", "320");
        w.poll_inputs(Level::High, Level::High, 0);
        w.poll_inputs(Level::High, Level::Low, 10);
        assert_eq!(w.state(), OperationState::Running);
        assert_eq!(w.progress().current_turns, 1);
    }

    #[test]
    fn test_escape_while_running_only_logs() {
        let mut w = running("0100", "320");
        press(&mut w, '*');
        assert_eq!(w.state(), OperationState::Running);
        let effects = drain(&mut w);
        assert!(sent(&effects).is_empty());
        assert_eq!(logs(&effects), vec!["Escape ignored while running"]);
    }

    #[test]
    fn test_running_ignores_digits() {
        let mut w = running("0100", "320");
        type_keys(&mut w, "99C");
        assert_eq!(w.editor().turns_text(), "0100");
        assert_eq!(w.state(), OperationState::Running);
    }

    #[test]
    fn test_first_marker_line() {
        let mut w = winder();
        w.receive_bytes(b"OFD: 12.5\n");
        assert_eq!(w.markers().first, Some(12.5));
        assert_eq!(w.pending_line_len(), 0);

        let effects = drain(&mut w);
        assert_eq!(tones(&effects), vec![TonePattern::FIRST_MARKER]);
        assert_eq!(logs(&effects), vec!["RX: OFD: 12.5"]);

        // Nothing pending: another terminator-free call changes nothing
        w.receive_bytes(b"");
        assert_eq!(w.markers().first, Some(12.5));
        assert!(drain(&mut w).is_empty());
    }

    #[test]
    fn test_second_marker_updates_width_line() {
        let mut w = winder();
        press(&mut w, 'C');
        w.service(0, &mut FakePot(0));
        w.receive_bytes(b"OSD: 40.25\r\n");

        assert_eq!(w.markers().second, Some(40.25));
        assert_eq!(w.screen().line(0), Some("GENISLIK: 40.25mm   "));
        assert_eq!(tones(&drain(&mut w)), vec![TonePattern::SECOND_MARKER]);
    }

    #[test]
    fn test_cycle_finished() {
        let mut w = running("0100", "320");
        w.receive_bytes(b"CycleFinished: 3\n");
        assert_eq!(w.progress().current_cycle, 4);
        w.receive_bytes(b"CycleFinished: abc\n");
        assert_eq!(w.progress().current_cycle, 1);
    }

    #[test]
    fn test_cycle_finished_ignored_in_idle() {
        let mut w = winder();
        w.receive_bytes(b"CycleFinished: 3\n");
        assert_eq!(w.progress().current_cycle, 0);
    }

    #[test]
    fn test_acknowledgement_tones() {
        let mut w = winder();
        w.receive_bytes(b"Offset-First-Done\nOffset-Second-Done\n");
        assert_eq!(
            tones(&drain(&mut w)),
            vec![TonePattern::FIRST_MARKER, TonePattern::SECOND_MARKER]
        );
    }

    #[test]
    fn test_unknown_line_is_dropped() {
        let mut w = Winder::new(WinderConfig {
            link: crate::config::LinkConfig {
                mirror_received: false,
                ..Default::default()
            },
            ..Default::default()
        });
        w.receive_bytes(b"Hello\n");
        assert!(drain(&mut w).is_empty());
        assert_eq!(w.pending_line_len(), 0);
    }

    #[test]
    fn test_overlong_line_is_logged() {
        let mut w = Winder::new(WinderConfig {
            link: crate::config::LinkConfig {
                mirror_received: false,
                ..Default::default()
            },
            ..Default::default()
        });
        w.receive_bytes(&[b'x'; 70]);
        w.receive_bytes(b"\nPause\n");

        assert_eq!(logs(&drain(&mut w)), vec!["RX line truncated to 64 bytes"]);
    }

    #[test]
    fn test_running_screen_partial_refresh() {
        let mut w = running("0040", "320");
        w.service(0, &mut FakePot(255));
        assert_eq!(w.screen().line(0), Some(BANNER_RUNNING));
        assert_eq!(w.screen().line(1), Some("TUR:  0 / 40        "));
        w.poll_inputs(Level::High, Level::High, 1);
        w.screen_mut().mark_clean();

        w.poll_inputs(Level::High, Level::Low, 5);
        // Turn line is refreshed right away, outside the refresh throttle
        assert_eq!(w.screen().line(1), Some("TUR:  1 / 40        "));
        assert!(w.screen().is_row_dirty(1));
        assert!(!w.screen().needs_full_redraw());
    }

    #[test]
    fn test_speed_refresh_is_throttled() {
        let mut w = running("0040", "320");
        let mut pot = FakePot(255);
        w.service(0, &mut pot);
        let first = w.progress().current_speed;
        w.service(10, &mut pot);
        assert_eq!(w.progress().current_speed, first);
        w.service(30, &mut pot);
        assert!(w.progress().current_speed > first);
        let expected = std::format!("HIZ:  {} rpm", w.progress().current_speed);
        assert!(w.screen().line(2).unwrap().starts_with(&expected));
    }

    #[test]
    fn test_paused_banner() {
        let mut w = running("0040", "320");
        w.poll_inputs(Level::Low, Level::High, 0);
        w.poll_inputs(Level::High, Level::High, 10);
        w.service(20, &mut FakePot(0));
        assert_eq!(w.screen().line(0), Some(BANNER_PAUSED));
    }

    #[test]
    fn test_effect_queue_overflow_drops() {
        let mut w = winder();
        for _ in 0..EFFECT_QUEUE_LEN + 5 {
            w.receive_bytes(b"Offset-First-Done\n");
        }
        assert_eq!(drain(&mut w).len(), EFFECT_QUEUE_LEN);
    }
}
