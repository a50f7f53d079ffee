//! Per-button edge tracking.
//!
//! A [`ButtonTracker`] turns the raw "currently pressed" sample of one
//! button into press, release and long-press edges, timed in poll ticks.

/// A semantic edge derived from one button sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    /// The button went from released to pressed this tick.
    Down,
    /// The button was released before the long-press threshold (a click).
    Press,
    /// The button has been held for the long-press threshold.
    LongPress,
}

/// Edge state for a single button.
///
/// `press_start` is `Some` exactly while a press is in progress: it is set
/// on the down edge and cleared on the up edge.
#[derive(Debug, Clone, Copy)]
pub struct ButtonTracker {
    pressed: bool,
    press_start: Option<u32>,
    long_press_sent: bool,
}

impl ButtonTracker {
    /// Creates a tracker in the released state.
    pub const fn new() -> Self {
        Self {
            pressed: false,
            press_start: None,
            long_press_sent: false,
        }
    }

    /// Feeds one tick's sample and returns the edge it produced, if any.
    ///
    /// `now` is the current value of the monotonic tick counter. Elapsed
    /// time uses wrapping subtraction, so counter wraparound is harmless.
    ///
    /// The long press fires once per hold, on the first tick where the
    /// elapsed time reaches `long_press_ticks`. The `>=` comparison keeps
    /// the edge from being lost when polling jitter skips the exact
    /// threshold tick. A hold that already produced a long press yields
    /// no `Press` on release.
    pub fn sample(&mut self, pressed: bool, now: u32, long_press_ticks: u32) -> Option<ButtonEdge> {
        let was_pressed = self.pressed;
        self.pressed = pressed;

        match (was_pressed, pressed) {
            (false, true) => {
                self.press_start = Some(now);
                self.long_press_sent = false;
                Some(ButtonEdge::Down)
            }
            (true, false) => {
                let long_press_sent = self.long_press_sent;
                self.press_start = None;
                self.long_press_sent = false;
                if long_press_sent {
                    None
                } else {
                    Some(ButtonEdge::Press)
                }
            }
            (true, true) => match self.press_start {
                Some(start)
                    if !self.long_press_sent
                        && now.wrapping_sub(start) >= long_press_ticks =>
                {
                    self.long_press_sent = true;
                    Some(ButtonEdge::LongPress)
                }
                _ => None,
            },
            (false, false) => None,
        }
    }

    /// Returns the level from the most recent sample.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns the tick the current press started on, if one is in progress.
    #[inline]
    pub fn press_start(&self) -> Option<u32> {
        self.press_start
    }
}

impl Default for ButtonTracker {
    fn default() -> Self {
        Self::new()
    }
}
