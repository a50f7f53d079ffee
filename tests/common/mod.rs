//! Shared test infrastructure for panel-ui integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use std::cell::Cell;
use std::rc::Rc;

use panel_ui::{
    App, ButtonMask, ButtonSource, ChordHandler, Control, DisplayFrame, EncoderSource, Event,
    EventKind,
};

// ============================================================================
// Mock Hardware
// ============================================================================

/// Mock button whose level the test can change between polls through a
/// cloned handle.
#[derive(Clone, Default)]
pub struct MockButton {
    pressed: Rc<Cell<bool>>,
}

impl MockButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self) {
        self.pressed.set(true);
    }

    pub fn release(&self) {
        self.pressed.set(false);
    }
}

impl ButtonSource for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed.get()
    }
}

/// Mock encoder accumulating raw steps through a cloned handle.
#[derive(Clone, Default)]
pub struct MockEncoder {
    steps: Rc<Cell<i32>>,
}

impl MockEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds raw steps, as the hardware would between two polls.
    pub fn turn(&self, steps: i32) {
        self.steps.set(self.steps.get() + steps);
    }
}

impl EncoderSource for MockEncoder {
    fn take_steps(&mut self) -> i32 {
        self.steps.replace(0)
    }
}

/// Creates a 4-button panel's worth of mock hardware. The returned arrays
/// are (sources for `split`, handles for the test).
pub fn mock_controls() -> ([MockButton; 4], [MockButton; 4], MockEncoder, MockEncoder) {
    let buttons: [MockButton; 4] = core::array::from_fn(|_| MockButton::new());
    let handles = buttons.clone();
    (buttons, handles, MockEncoder::new(), MockEncoder::new())
}

// ============================================================================
// Mock Collaborators
// ============================================================================

/// App that records every forwarded event.
#[derive(Default)]
pub struct RecordingApp {
    pub button_events: heapless::Vec<Event, 32>,
    pub encoder_events: heapless::Vec<Event, 32>,
}

impl RecordingApp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn button_kinds(&self) -> Vec<EventKind> {
        self.button_events.iter().map(|e| e.kind).collect()
    }

    pub fn total_events(&self) -> usize {
        self.button_events.len() + self.encoder_events.len()
    }
}

impl App for RecordingApp {
    fn handle_button_event(&mut self, event: Event) {
        self.button_events.push(event).unwrap();
    }

    fn handle_encoder_event(&mut self, event: Event) {
        self.encoder_events.push(event).unwrap();
    }
}

/// Chord handler that fires when a down event's snapshot holds the whole
/// chord, counting activations.
pub struct MaskChord {
    pub chord: ButtonMask,
    pub fired: usize,
}

impl MaskChord {
    pub fn new(chord: ButtonMask) -> Self {
        Self { chord, fired: 0 }
    }
}

impl ChordHandler for MaskChord {
    fn on_button_down(&mut self, event: &Event) -> Option<ButtonMask> {
        if !self.chord.is_empty() && event.buttons.contains_all(self.chord) {
            self.fired += 1;
            Some(self.chord)
        } else {
            None
        }
    }
}

/// Display that counts balanced frame brackets.
#[derive(Default)]
pub struct MockDisplay {
    pub frames: usize,
    pub open: bool,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisplayFrame for MockDisplay {
    fn begin_frame(&mut self) {
        assert!(!self.open, "begin_frame without matching end_frame");
        self.open = true;
    }

    fn end_frame(&mut self) {
        assert!(self.open, "end_frame without begin_frame");
        self.open = false;
        self.frames += 1;
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// A test-friendly configuration: 60 ticks per second, short long press,
/// short splash window.
pub fn test_config() -> panel_ui::UiConfig {
    panel_ui::UiConfig {
        tick_rate_hz: 60,
        long_press_ticks: 10,
        screensaver_timeout_s: 1,
        splash_ticks: 20,
        ..panel_ui::UiConfig::default()
    }
}

/// Mask helper for chord assertions.
pub fn mask_of(controls: &[Control]) -> ButtonMask {
    controls
        .iter()
        .fold(ButtonMask::EMPTY, |mask, &control| mask.with(control))
}
