//! Input event records.

use crate::controls::{ButtonMask, Control};

/// The semantic kind of an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// A button was pressed down.
    ButtonDown,
    /// A button was released before the long-press threshold (a click).
    ButtonPress,
    /// A button reached the long-press threshold while held.
    ButtonLongPress,
    /// An encoder moved.
    Encoder,
}

/// One queued input event.
///
/// `buttons` is the set of buttons held when the event was produced, taken
/// after the tick's edge processing (a long-pressed button is removed from
/// the snapshot, since the long press consumed it). Consumers use the
/// snapshot for chord detection without re-polling hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    pub kind: EventKind,
    pub control: Control,
    /// Signed encoder delta; 0 for button events.
    pub value: i32,
    /// Held-button snapshot at production time.
    pub buttons: ButtonMask,
}

impl Event {
    /// Creates a button event.
    #[inline]
    pub const fn button(kind: EventKind, control: Control, buttons: ButtonMask) -> Self {
        Self {
            kind,
            control,
            value: 0,
            buttons,
        }
    }

    /// Creates an encoder event with a non-zero delta.
    #[inline]
    pub const fn encoder(control: Control, delta: i32, buttons: ButtonMask) -> Self {
        Self {
            kind: EventKind::Encoder,
            control,
            value: delta,
            buttons,
        }
    }
}
