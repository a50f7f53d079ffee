//! The owned panel context.

use crate::config::UiConfig;
use crate::controls::{ButtonSource, EncoderSource};
use crate::dispatcher::Dispatcher;
use crate::poller::Poller;
use crate::queue::EventQueue;

/// Owns the event queue and shared tick state of one panel.
///
/// There are no process-wide globals: create one `PanelUi`, keep it alive
/// for the device's lifetime (a `static` via `StaticCell` or a stack slot
/// in `main` both work), and [`split`](Self::split) it into the two
/// execution-context handles.
pub struct PanelUi {
    queue: EventQueue,
}

impl PanelUi {
    /// Creates an empty panel context. Const, so it can live in a `static`.
    pub const fn new() -> Self {
        Self {
            queue: EventQueue::new(),
        }
    }

    /// Splits the panel into its producer and consumer halves.
    ///
    /// `buttons` is the ordered control table of the hardware variant
    /// (slot order Up, Down, Left, Right, Mid). The [`Poller`] belongs to
    /// the periodic tick context, the [`Dispatcher`] to the main loop;
    /// they are the only two handles that ever touch the queue, which is
    /// what makes the lock-free handoff sound. The borrow of `self`
    /// prevents a second split while either half is alive.
    pub fn split<B, E, const N: usize>(
        &mut self,
        buttons: [B; N],
        encoder_left: E,
        encoder_right: E,
        config: UiConfig,
    ) -> (Poller<'_, B, E, N>, Dispatcher<'_>)
    where
        B: ButtonSource,
        E: EncoderSource,
    {
        let config = config.sanitized();
        let queue = &self.queue;
        (
            Poller::new(queue, buttons, encoder_left, encoder_right, config),
            Dispatcher::new(queue, config),
        )
    }
}

impl Default for PanelUi {
    fn default() -> Self {
        Self::new()
    }
}
