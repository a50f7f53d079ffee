//! Boot-time mode selection.
//!
//! Before normal operation starts, the splashscreen loop decides the boot
//! mode from raw button levels: a held left button selects calibration, a
//! held right button selects the settings editor, and a held reset chord
//! requests a factory reset of persisted settings. Events accumulated from
//! startup transients are discarded; they never reach the dispatcher.

use crate::controls::{ButtonSource, Control, EncoderSource};
use crate::dispatcher::{Dispatcher, UiMode};
use crate::poller::Poller;

/// The display/frame collaborator.
///
/// Brackets one display frame. The pipeline uses it only during the
/// splashscreen, to keep the display driver serviced while button levels
/// are sampled; `end_frame` is also where implementations typically pace
/// the loop to the frame rate.
pub trait DisplayFrame {
    fn begin_frame(&mut self);
    fn end_frame(&mut self);
}

/// The outcome of the splashscreen window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootSelection {
    /// Mode to start in. `Calibrate` and `AppSettings` only ever come from
    /// held boot buttons; otherwise `Menu`.
    pub mode: UiMode,
    /// True if the reset chord was held at the end of the window,
    /// independent of the selected mode.
    pub reset_settings: bool,
}

/// Runs the boot-time splashscreen loop.
///
/// A bounded synchronous loop over the configured splash window: each
/// iteration polls once, re-derives the selection from raw levels inside a
/// display frame, and throws away every queued event. Run it before handing
/// the poller to its periodic context; it drives the tick counter itself.
/// On exit the ignore mask covers all buttons, so anything still held from
/// boot cannot leak a click into the application.
pub fn splashscreen<B, E, const N: usize, D>(
    poller: &mut Poller<'_, B, E, N>,
    dispatcher: &mut Dispatcher<'_>,
    display: &mut D,
) -> BootSelection
where
    B: ButtonSource,
    E: EncoderSource,
    D: DisplayFrame,
{
    let splash_ticks = poller.config().splash_ticks;
    let reset_combo = poller.config().reset_combo;

    let mut mode = UiMode::Menu;
    let mut reset_settings = false;

    for _ in 0..splash_ticks {
        poller.poll();

        display.begin_frame();

        mode = UiMode::Menu;
        if poller.is_held(Control::ButtonLeft) {
            mode = UiMode::Calibrate;
        }
        if poller.is_held(Control::ButtonRight) {
            mode = UiMode::AppSettings;
        }
        reset_settings = !reset_combo.is_empty() && poller.held_buttons().contains_all(reset_combo);

        // Startup transients queue spurious events; drop them here.
        dispatcher.discard_events();

        display.end_frame();
    }

    dispatcher.ignore_all_buttons();

    BootSelection {
        mode,
        reset_settings,
    }
}
