//! Logical control identifiers and hardware sampling traits.
//!
//! A panel exposes a fixed set of logical controls: four or five momentary
//! buttons (depending on hardware variant) and two rotary encoders. The set
//! is fixed at build time; the button count is a const generic on
//! [`Poller`](crate::Poller) so variants are a configuration value rather
//! than scattered conditionals.

/// Maximum number of panel buttons across hardware variants.
pub const MAX_BUTTONS: usize = 5;

/// A logical panel control.
///
/// Button slot order is fixed: Up, Down, Left, Right, Mid. A 4-button
/// variant simply has no `ButtonMid` slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    /// Center button, present only on the 5-button hardware variant.
    ButtonMid,
    EncoderLeft,
    EncoderRight,
}

impl Control {
    /// Returns the control for a button slot index.
    ///
    /// Indices follow the fixed slot order; indices at or beyond
    /// [`MAX_BUTTONS`] do not occur for valid panels.
    #[inline]
    pub const fn button(index: usize) -> Self {
        match index {
            0 => Control::ButtonUp,
            1 => Control::ButtonDown,
            2 => Control::ButtonLeft,
            3 => Control::ButtonRight,
            _ => Control::ButtonMid,
        }
    }

    /// Bitmask of this control within a held-button snapshot.
    ///
    /// Encoders have no bit; they never appear in button masks.
    #[inline]
    pub const fn mask(self) -> ButtonMask {
        match self {
            Control::ButtonUp => ButtonMask(1 << 0),
            Control::ButtonDown => ButtonMask(1 << 1),
            Control::ButtonLeft => ButtonMask(1 << 2),
            Control::ButtonRight => ButtonMask(1 << 3),
            Control::ButtonMid => ButtonMask(1 << 4),
            Control::EncoderLeft | Control::EncoderRight => ButtonMask::EMPTY,
        }
    }

    /// Returns true for button controls.
    #[inline]
    pub const fn is_button(self) -> bool {
        !matches!(self, Control::EncoderLeft | Control::EncoderRight)
    }
}

/// A set of held buttons, one bit per button control.
///
/// Events carry a `ButtonMask` snapshot of the buttons held when the event
/// was produced, so consumers can detect chords without re-polling hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u16);

impl ButtonMask {
    /// No buttons held.
    pub const EMPTY: Self = ButtonMask(0);

    /// Every button of the largest hardware variant.
    pub const ALL: Self = ButtonMask((1u16 << MAX_BUTTONS) - 1);

    /// Raw bit representation.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns true if the control's bit is set.
    #[inline]
    pub const fn contains(self, control: Control) -> bool {
        self.0 & control.mask().0 != 0
    }

    /// Returns true if every bit of `other` is set in `self`.
    ///
    /// An empty `other` is contained trivially; callers testing for a held
    /// chord should check `other` is non-empty first.
    #[inline]
    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if any bit is shared with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns the mask with the control's bit set.
    #[inline]
    pub const fn with(self, control: Control) -> Self {
        ButtonMask(self.0 | control.mask().0)
    }

    /// Returns the mask with the control's bit cleared.
    #[inline]
    pub const fn without(self, control: Control) -> Self {
        ButtonMask(self.0 & !control.mask().0)
    }

    /// Returns the union of two masks.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        ButtonMask(self.0 | other.0)
    }

    /// Returns true if no button is held.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl core::ops::BitOrAssign for ButtonMask {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

/// Trait for abstracting a single panel button.
///
/// Implement this for your hardware. The sample must already be debounced;
/// the pipeline treats it as the clean "currently pressed" level for this
/// tick. Handle any hardware errors internally - this method cannot fail.
pub trait ButtonSource {
    /// Returns true while the button is physically pressed.
    fn is_pressed(&mut self) -> bool;
}

/// Trait for abstracting a rotary encoder.
///
/// Implement this over your quadrature decoder. The accumulator collects
/// raw steps between reads; reading resets it.
pub trait EncoderSource {
    /// Returns the steps accumulated since the previous call and resets
    /// the accumulator. Positive is clockwise before reversal is applied.
    fn take_steps(&mut self) -> i32;
}
