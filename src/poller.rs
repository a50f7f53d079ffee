//! The per-tick event producer.
//!
//! [`Poller::poll`] is the time-critical half of the pipeline: it runs once
//! per tick (typically from a periodic interrupt), samples every control,
//! derives edges and queues the resulting events. It is allocation-free and
//! bounded; nothing in it blocks.

use heapless::Vec;

use crate::button::{ButtonEdge, ButtonTracker};
use crate::config::UiConfig;
use crate::controls::{ButtonMask, ButtonSource, Control, EncoderSource, MAX_BUTTONS};
use crate::encoder::EncoderReader;
use crate::event::{Event, EventKind};
use crate::queue::EventQueue;

/// Producer half of a panel, created by [`PanelUi::split`](crate::PanelUi::split).
///
/// Owns the button and encoder hardware and the per-button edge trackers.
/// `N` is the button count of the hardware variant (4 or 5); button slot
/// order is Up, Down, Left, Right, Mid.
pub struct Poller<'a, B: ButtonSource, E: EncoderSource, const N: usize> {
    queue: &'a EventQueue,
    buttons: [B; N],
    trackers: [ButtonTracker; N],
    encoder_left: EncoderReader<E>,
    encoder_right: EncoderReader<E>,
    button_state: ButtonMask,
    long_press_ticks: u32,
    config: UiConfig,
}

impl<'a, B: ButtonSource, E: EncoderSource, const N: usize> Poller<'a, B, E, N> {
    pub(crate) fn new(
        queue: &'a EventQueue,
        buttons: [B; N],
        encoder_left: E,
        encoder_right: E,
        config: UiConfig,
    ) -> Self {
        const {
            assert!(N <= MAX_BUTTONS, "button count exceeds the largest hardware variant");
        }

        Self {
            queue,
            buttons,
            trackers: [ButtonTracker::new(); N],
            encoder_left: EncoderReader::new(encoder_left, config.encoder_left_reversed),
            encoder_right: EncoderReader::new(encoder_right, config.encoder_right_reversed),
            button_state: ButtonMask::EMPTY,
            long_press_ticks: config.long_press_ticks,
            config,
        }
    }

    /// Runs one tick: samples all controls and queues the resulting events.
    ///
    /// Buttons are sampled first and all edges are derived before any event
    /// is queued, so every event of the tick carries the held-button
    /// snapshot as it stands after edge processing. A button whose long
    /// press fires this tick is removed from the snapshot; the long press
    /// consumed it.
    pub fn poll(&mut self) {
        let now = self.queue.advance_tick();

        let mut held = ButtonMask::EMPTY;
        let mut samples = [false; N];
        for (index, button) in self.buttons.iter_mut().enumerate() {
            let pressed = button.is_pressed();
            samples[index] = pressed;
            if pressed {
                held = held.with(Control::button(index));
            }
        }
        // Raw levels, kept for boot-time immediate reads.
        self.button_state = held;

        let mut edges: Vec<(Control, ButtonEdge), MAX_BUTTONS> = Vec::new();
        for index in 0..N {
            let control = Control::button(index);
            if let Some(edge) = self.trackers[index].sample(samples[index], now, self.long_press_ticks) {
                if edge == ButtonEdge::LongPress {
                    held = held.without(control);
                }
                // Cannot overflow: capacity is MAX_BUTTONS and N <= MAX_BUTTONS.
                let _ = edges.push((control, edge));
            }
        }

        for &(control, edge) in edges.iter() {
            let kind = match edge {
                ButtonEdge::Down => EventKind::ButtonDown,
                ButtonEdge::Press => EventKind::ButtonPress,
                ButtonEdge::LongPress => EventKind::ButtonLongPress,
            };
            self.push(Event::button(kind, control, held));
        }

        let delta = self.encoder_left.read();
        if delta != 0 {
            self.push(Event::encoder(Control::EncoderLeft, delta, held));
        }

        let delta = self.encoder_right.read();
        if delta != 0 {
            self.push(Event::encoder(Control::EncoderRight, delta, held));
        }
    }

    /// Raw sampled levels from the most recent poll, before long-press
    /// consumption. This is the boot-time "immediate read" path; normal
    /// consumers should use event snapshots instead.
    #[inline]
    pub fn held_buttons(&self) -> ButtonMask {
        self.button_state
    }

    /// Returns true if the control was sampled pressed on the most recent
    /// poll.
    #[inline]
    pub fn is_held(&self, control: Control) -> bool {
        self.button_state.contains(control)
    }

    /// Sets logical direction reversal for both encoders, typically from
    /// persisted settings.
    pub fn configure_encoders(&mut self, left_reversed: bool, right_reversed: bool) {
        self.encoder_left.set_reversed(left_reversed);
        self.encoder_right.set_reversed(right_reversed);
    }

    /// The sanitized configuration this poller runs with.
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    fn push(&mut self, event: Event) {
        // SAFETY: this poller is the queue's sole producer; `split` hands
        // out exactly one.
        unsafe { self.queue.push(event) }
    }
}
