//! Panel timing and mapping configuration.

use crate::controls::{ButtonMask, Control};

/// Configuration for a panel's input pipeline and mode machine.
///
/// All durations are in poll ticks except the screensaver timeout, which is
/// given in seconds and converted with [`UiConfig::screensaver_timeout_ticks`].
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiConfig {
    /// Poll rate, in ticks per second. Used only for the seconds-to-ticks
    /// conversion of the screensaver timeout.
    pub tick_rate_hz: u32,
    /// Hold duration, in ticks, at which a press becomes a long press.
    pub long_press_ticks: u32,
    /// Idle duration, in seconds, before the screensaver engages.
    pub screensaver_timeout_s: u32,
    /// Length of the boot-time splashscreen window, in ticks.
    pub splash_ticks: u32,
    /// Logical direction reversal for the left encoder.
    pub encoder_left_reversed: bool,
    /// Logical direction reversal for the right encoder.
    pub encoder_right_reversed: bool,
    /// Long-pressing this control requests the app-settings mode.
    pub settings_control: Control,
    /// Long-pressing this control blanks the display (screensaver).
    pub blank_control: Control,
    /// Holding this chord through the splashscreen requests a factory
    /// reset of persisted settings.
    pub reset_combo: ButtonMask,
}

impl UiConfig {
    /// Converts a screensaver timeout in seconds to ticks.
    ///
    /// The result is clamped to at least twice the long-press threshold so
    /// a long press can never race the screensaver, and a zero timeout
    /// cannot produce undefined timing.
    pub fn screensaver_timeout_ticks(&self, seconds: u32) -> u32 {
        let ticks = seconds.saturating_mul(self.tick_rate_hz);
        let min = self.long_press_ticks.saturating_mul(2);
        ticks.max(min)
    }

    /// Returns the configuration with out-of-range values clamped to their
    /// documented minimums.
    pub fn sanitized(mut self) -> Self {
        self.tick_rate_hz = self.tick_rate_hz.max(1);
        self.long_press_ticks = self.long_press_ticks.max(1);
        self
    }
}

impl Default for UiConfig {
    /// 1 kHz polling, 800 ms long press, 25 s screensaver, 1.5 s splash,
    /// right button for settings, up button for blanking, Up+Down for
    /// factory reset.
    fn default() -> Self {
        Self {
            tick_rate_hz: 1_000,
            long_press_ticks: 800,
            screensaver_timeout_s: 25,
            splash_ticks: 1_500,
            encoder_left_reversed: false,
            encoder_right_reversed: false,
            settings_control: Control::ButtonRight,
            blank_control: Control::ButtonUp,
            reset_combo: Control::ButtonUp.mask().union(Control::ButtonDown.mask()),
        }
    }
}
