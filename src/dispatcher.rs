//! The event consumer and UI mode machine.
//!
//! [`Dispatcher::dispatch_events`] is the non-time-critical half of the
//! pipeline: called from the cooperative main loop, it drains the event
//! queue, applies chord and long-press semantics, forwards everything else
//! to the application, and answers with the top-level UI mode to display.

use crate::config::UiConfig;
use crate::controls::ButtonMask;
use crate::event::{Event, EventKind};
use crate::queue::EventQueue;

/// Top-level display/interaction mode.
///
/// The dispatcher only ever returns `Menu`, `Screensaver` or `AppSettings`;
/// `Calibrate` is selected exclusively by the boot-time
/// [`splashscreen`](crate::splashscreen). There is no mode history - the
/// mode is recomputed on every dispatch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiMode {
    /// Normal menu interaction.
    Menu,
    /// Display blanked after idle timeout or an explicit long press.
    Screensaver,
    /// Hardware calibration, entered only from the splashscreen.
    Calibrate,
    /// App/global settings editor.
    AppSettings,
}

/// The application collaborator receiving forwarded events.
///
/// Handlers run inside the dispatch loop and must not block.
pub trait App {
    /// Receives button down, press and long-press events not consumed by
    /// the mode machine.
    fn handle_button_event(&mut self, event: Event);

    /// Receives encoder delta events.
    fn handle_encoder_event(&mut self, event: Event);
}

/// An injected device-global chord action.
///
/// The dispatcher offers every `ButtonDown` event to the handler before
/// forwarding it. A handler that recognizes its chord performs the action
/// and returns the involved controls; the dispatcher then suppresses their
/// trailing release/long-press edges via the ignore mask.
pub trait ChordHandler {
    /// Returns `Some(involved controls)` if the chord fired, `None` to let
    /// the event through to the app.
    fn on_button_down(&mut self, event: &Event) -> Option<ButtonMask>;
}

/// The no-chord case.
impl ChordHandler for () {
    fn on_button_down(&mut self, _event: &Event) -> Option<ButtonMask> {
        None
    }
}

/// Consumer half of a panel, created by [`PanelUi::split`](crate::PanelUi::split).
pub struct Dispatcher<'a> {
    queue: &'a EventQueue,
    config: UiConfig,
    timeout_ticks: u32,
    ignore_mask: ButtonMask,
    screensaver: bool,
    preempt_screensaver: bool,
}

impl<'a> Dispatcher<'a> {
    pub(crate) fn new(queue: &'a EventQueue, config: UiConfig) -> Self {
        Self {
            queue,
            config,
            timeout_ticks: config.screensaver_timeout_ticks(config.screensaver_timeout_s),
            ignore_mask: ButtonMask::EMPTY,
            screensaver: false,
            preempt_screensaver: false,
        }
    }

    /// Drains the queue, forwards events, and returns the UI mode.
    ///
    /// Rules, in priority order:
    /// 1. `ButtonPress` goes to the app.
    /// 2. `ButtonDown` is offered to the chord handler first; a fired chord
    ///    arms the ignore mask for its controls, otherwise the app gets it.
    /// 3. `ButtonLongPress` on the settings control returns
    ///    [`UiMode::AppSettings`] immediately - events still queued stay
    ///    queued for the next call. On the blank control it engages the
    ///    screensaver unless preempted. Anything else goes to the app.
    /// 4. `Encoder` goes to the app.
    ///
    /// After draining, an idle time beyond the screensaver timeout engages
    /// the screensaver. The screensaver, once engaged, holds until an
    /// external actor calls [`end_screensaver`](Self::end_screensaver).
    pub fn dispatch_events<A: App, C: ChordHandler>(&mut self, app: &mut A, chords: &mut C) -> UiMode {
        while let Some(event) = self.pop() {
            if self.suppress(&event) {
                continue;
            }

            match event.kind {
                EventKind::ButtonPress => app.handle_button_event(event),
                EventKind::ButtonDown => match chords.on_button_down(&event) {
                    Some(involved) => self.ignore_mask |= involved,
                    None => app.handle_button_event(event),
                },
                EventKind::ButtonLongPress => {
                    if event.control == self.config.settings_control {
                        return UiMode::AppSettings;
                    } else if event.control == self.config.blank_control {
                        if !self.preempt_screensaver {
                            self.screensaver = true;
                        }
                    } else {
                        app.handle_button_event(event);
                    }
                }
                EventKind::Encoder => app.handle_encoder_event(event),
            }
        }

        if self.queue.idle_ticks() > self.timeout_ticks {
            self.screensaver = true;
        }

        if self.screensaver {
            UiMode::Screensaver
        } else {
            UiMode::Menu
        }
    }

    /// Applies the ignore mask to one event.
    ///
    /// A masked control's next edge consumes its bit: a press or long press
    /// is swallowed, while a fresh down edge only clears the bit - a down
    /// edge proves the button was released in between, so the new
    /// interaction is delivered normally. Encoder events carry no mask bit
    /// and are never suppressed.
    fn suppress(&mut self, event: &Event) -> bool {
        if !self.ignore_mask.contains(event.control) {
            return false;
        }
        self.ignore_mask = self.ignore_mask.without(event.control);
        matches!(event.kind, EventKind::ButtonPress | EventKind::ButtonLongPress)
    }

    /// Discards every queued event. Used during the boot splashscreen to
    /// throw away startup transients.
    pub fn discard_events(&mut self) -> usize {
        let mut discarded = 0;
        while self.pop().is_some() {
            discarded += 1;
        }
        discarded
    }

    /// Arms the ignore mask for the given controls.
    pub fn set_ignore_mask(&mut self, mask: ButtonMask) {
        self.ignore_mask |= mask;
    }

    /// Arms the ignore mask for every button, e.g. on splashscreen exit so
    /// buttons still held from boot don't leak clicks into the app.
    pub fn ignore_all_buttons(&mut self) {
        self.ignore_mask = ButtonMask::ALL;
    }

    /// Clears the screensaver flag; the next dispatch returns to
    /// [`UiMode::Menu`] (and restarts the idle clock from current
    /// activity).
    pub fn end_screensaver(&mut self) {
        self.screensaver = false;
        self.queue.poke();
    }

    /// Returns true while the screensaver flag is set.
    pub fn screensaver_active(&self) -> bool {
        self.screensaver
    }

    /// While set, long presses on the blank control do not engage the
    /// screensaver (e.g. a collaborator is mid-interaction).
    pub fn preempt_screensaver(&mut self, preempt: bool) {
        self.preempt_screensaver = preempt;
    }

    /// Reconfigures the idle timeout from seconds, re-applying the minimum
    /// of twice the long-press threshold, and resets the idle clock.
    pub fn set_screensaver_timeout(&mut self, seconds: u32) {
        self.timeout_ticks = self.config.screensaver_timeout_ticks(seconds);
        self.queue.poke();
    }

    /// Resets the idle clock, counting as activity.
    pub fn poke(&mut self) {
        self.queue.poke();
    }

    /// Number of events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Number of events dropped to queue overflow since startup.
    pub fn overflow_count(&self) -> u32 {
        self.queue.overflow_count()
    }

    fn pop(&mut self) -> Option<Event> {
        // SAFETY: this dispatcher is the queue's sole consumer; `split`
        // hands out exactly one.
        unsafe { self.queue.pop() }
    }
}
