//! Integration tests for the mode dispatcher

mod common;
use common::*;

use panel_ui::{Control, EventKind, PanelUi, UiMode};

#[test]
fn dispatch_drains_the_whole_queue_in_one_call() {
    let (buttons, handles, enc_l, enc_r) = mock_controls();
    let left = enc_l.clone();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    handles[2].press();
    poller.poll();
    handles[2].release();
    left.turn(3);
    poller.poll();

    let mut app = RecordingApp::new();
    dispatcher.dispatch_events(&mut app, &mut ());

    assert_eq!(app.total_events(), 3);
    assert_eq!(dispatcher.pending_events(), 0);
}

#[test]
fn settings_long_press_returns_app_settings_and_leaves_later_events_queued() {
    let (buttons, handles, enc_l, enc_r) = mock_controls();
    let left = enc_l.clone();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    handles[3].press(); // ButtonRight is the settings control
    for _ in 0..11 {
        poller.poll();
    }
    left.turn(2);
    poller.poll();

    let mut app = RecordingApp::new();
    let mode = dispatcher.dispatch_events(&mut app, &mut ());

    assert_eq!(mode, UiMode::AppSettings);
    // The encoder event behind the long press was not discarded.
    assert_eq!(dispatcher.pending_events(), 1);
    assert_eq!(app.encoder_events.len(), 0);

    let mode = dispatcher.dispatch_events(&mut app, &mut ());
    assert_eq!(mode, UiMode::Menu);
    assert_eq!(app.encoder_events.len(), 1);
}

#[test]
fn blank_long_press_engages_screensaver_until_ended() {
    let (buttons, handles, enc_l, enc_r) = mock_controls();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    handles[0].press(); // ButtonUp is the blank control
    for _ in 0..11 {
        poller.poll();
    }

    let mut app = RecordingApp::new();
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Screensaver);
    assert!(dispatcher.screensaver_active());
    // The long press was consumed by the mode machine, not forwarded.
    assert_eq!(app.button_kinds(), vec![EventKind::ButtonDown]);

    // Sticks until an external actor ends it.
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Screensaver);
    dispatcher.end_screensaver();
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Menu);
}

#[test]
fn preempted_screensaver_ignores_blank_long_press() {
    let (buttons, handles, enc_l, enc_r) = mock_controls();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    dispatcher.preempt_screensaver(true);

    handles[0].press();
    for _ in 0..11 {
        poller.poll();
    }

    let mut app = RecordingApp::new();
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Menu);
    assert!(!dispatcher.screensaver_active());
}

#[test]
fn idle_timeout_forces_screensaver() {
    let (buttons, _handles, enc_l, enc_r) = mock_controls();
    let mut panel = PanelUi::new();
    // 1 s at 60 Hz: timeout is 60 ticks.
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    let mut app = RecordingApp::new();

    for _ in 0..60 {
        poller.poll();
    }
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Menu);

    poller.poll();
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Screensaver);
}

#[test]
fn queued_input_resets_the_idle_clock() {
    let (buttons, handles, enc_l, enc_r) = mock_controls();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    let mut app = RecordingApp::new();

    for _ in 0..30 {
        poller.poll();
    }
    handles[1].press();
    poller.poll();
    handles[1].release();
    poller.poll();

    // 55 further idle ticks: under the timeout relative to the press.
    for _ in 0..55 {
        poller.poll();
    }
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Menu);

    for _ in 0..10 {
        poller.poll();
    }
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Screensaver);
}

#[test]
fn zero_timeout_is_clamped_to_twice_the_long_press() {
    let (buttons, _handles, enc_l, enc_r) = mock_controls();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    dispatcher.set_screensaver_timeout(0);

    let mut app = RecordingApp::new();
    for _ in 0..20 {
        poller.poll();
    }
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Menu);

    poller.poll();
    assert_eq!(dispatcher.dispatch_events(&mut app, &mut ()), UiMode::Screensaver);
}

#[test]
fn chord_fires_once_and_suppresses_trailing_releases() {
    let (buttons, handles, enc_l, enc_r) = mock_controls();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    let chord_mask = mask_of(&[Control::ButtonUp, Control::ButtonDown]);
    let mut chord = MaskChord::new(chord_mask);
    let mut app = RecordingApp::new();

    handles[0].press();
    poller.poll();
    handles[1].press();
    poller.poll();
    handles[0].release();
    handles[1].release();
    poller.poll();

    dispatcher.dispatch_events(&mut app, &mut chord);

    assert_eq!(chord.fired, 1);
    // Only the first down reached the app; the chord consumed the second
    // down and both trailing releases were swallowed.
    assert_eq!(app.button_kinds(), vec![EventKind::ButtonDown]);

    // A fresh interaction after full release is delivered normally.
    handles[0].press();
    poller.poll();
    handles[0].release();
    poller.poll();
    dispatcher.dispatch_events(&mut app, &mut chord);

    assert_eq!(
        app.button_kinds(),
        vec![EventKind::ButtonDown, EventKind::ButtonDown, EventKind::ButtonPress]
    );
    assert_eq!(chord.fired, 1);
}

#[test]
fn encoder_events_are_never_suppressed_by_the_ignore_mask() {
    let (buttons, _handles, enc_l, enc_r) = mock_controls();
    let left = enc_l.clone();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    dispatcher.ignore_all_buttons();

    left.turn(1);
    poller.poll();

    let mut app = RecordingApp::new();
    dispatcher.dispatch_events(&mut app, &mut ());
    assert_eq!(app.encoder_events.len(), 1);
}

#[test]
fn fresh_down_edge_clears_a_masked_control() {
    let (buttons, handles, enc_l, enc_r) = mock_controls();
    let mut panel = PanelUi::new();
    let (mut poller, mut dispatcher) = panel.split(buttons, enc_l, enc_r, test_config());

    dispatcher.ignore_all_buttons();

    // The button was not held when the mask was armed: its next edge is a
    // down, which clears the bit, so the whole click arrives.
    handles[2].press();
    poller.poll();
    handles[2].release();
    poller.poll();

    let mut app = RecordingApp::new();
    dispatcher.dispatch_events(&mut app, &mut ());
    assert_eq!(
        app.button_kinds(),
        vec![EventKind::ButtonDown, EventKind::ButtonPress]
    );
}
