//! Lock-free single-producer single-consumer event ring.
//!
//! The producer is the per-tick poller, the consumer is the dispatcher;
//! nothing else ever touches the structure. Both handles are created
//! exactly once by [`PanelUi::split`](crate::PanelUi::split), which is what
//! makes the `unsafe` push/pop contracts hold structurally.
//!
//! Index publication uses Release stores paired with Acquire loads, so a
//! push completed in the producer context is visible, untorn, on the
//! consumer's next drain. The tick and activity counters are single-writer
//! values read without read-modify-write operations, which keeps the whole
//! structure usable on targets without atomic CAS.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use crate::controls::{ButtonMask, Control};
use crate::event::{Event, EventKind};

/// Ring slot count. Power of two for cheap index arithmetic; one slot stays
/// empty, so the queue holds up to `QUEUE_CAPACITY - 1` events. That covers
/// a worst-case tick (every control firing at once) across more than one
/// consumer-starvation window.
pub const QUEUE_CAPACITY: usize = 16;

const EMPTY_SLOT: Event = Event::button(EventKind::ButtonDown, Control::ButtonUp, ButtonMask::EMPTY);

/// The shared state between the two execution contexts: the event ring,
/// the monotonic tick counter, the idle clock and the overflow counter.
pub(crate) struct EventQueue {
    buffer: UnsafeCell<[Event; QUEUE_CAPACITY]>,
    /// Next write slot. Written only by the producer.
    head: AtomicUsize,
    /// Next read slot. Written only by the consumer.
    tail: AtomicUsize,
    /// Incremented exactly once per poll. Written only by the producer;
    /// wraps, so all elapsed-tick math must use wrapping subtraction.
    ticks: AtomicU32,
    /// Tick of the most recent produced event or explicit poke.
    last_activity: AtomicU32,
    /// Events dropped because the ring was full.
    overflows: AtomicU32,
}

// SAFETY: the interior mutability of `buffer` is only exercised through
// `push` and `pop`, whose contracts restrict them to one producer and one
// consumer; slot handoff is ordered by the Release/Acquire index pair.
unsafe impl Sync for EventQueue {}

impl EventQueue {
    pub(crate) const fn new() -> Self {
        Self {
            buffer: UnsafeCell::new([EMPTY_SLOT; QUEUE_CAPACITY]),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            ticks: AtomicU32::new(0),
            last_activity: AtomicU32::new(0),
            overflows: AtomicU32::new(0),
        }
    }

    /// Advances the tick counter and returns the new value.
    ///
    /// Producer context only; the single-writer load/store pair is why.
    pub(crate) fn advance_tick(&self) -> u32 {
        let now = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(now, Ordering::Relaxed);
        now
    }

    /// Current tick counter value.
    pub(crate) fn now(&self) -> u32 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Resets the idle clock to the current tick.
    pub(crate) fn poke(&self) {
        self.last_activity.store(self.now(), Ordering::Relaxed);
    }

    /// Ticks elapsed since the last produced event or poke.
    pub(crate) fn idle_ticks(&self) -> u32 {
        self.now().wrapping_sub(self.last_activity.load(Ordering::Relaxed))
    }

    /// Number of events dropped on overflow so far.
    pub(crate) fn overflow_count(&self) -> u32 {
        self.overflows.load(Ordering::Relaxed)
    }

    /// Pushes an event, recording activity.
    ///
    /// A push into a full ring drops the incoming event and increments the
    /// overflow counter; entries already queued are untouched. The drop
    /// still counts as activity for the idle clock, because the user did
    /// act on the hardware.
    ///
    /// # Safety
    /// The caller must be the queue's sole producer.
    pub(crate) unsafe fn push(&self, event: Event) {
        self.poke();

        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        let next = (head + 1) % QUEUE_CAPACITY;

        if next == tail {
            // Single writer: load/store instead of fetch_add.
            let dropped = self.overflows.load(Ordering::Relaxed).wrapping_add(1);
            self.overflows.store(dropped, Ordering::Relaxed);
            return;
        }

        // SAFETY: `head` is owned by the producer and the slot at `head`
        // is outside the consumer's window while `head` is unpublished.
        unsafe {
            (*self.buffer.get())[head] = event;
        }
        self.head.store(next, Ordering::Release);
    }

    /// Pops the oldest event, if any.
    ///
    /// # Safety
    /// The caller must be the queue's sole consumer.
    pub(crate) unsafe fn pop(&self) -> Option<Event> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);

        if tail == head {
            return None;
        }

        // SAFETY: `tail` is owned by the consumer and the Acquire load of
        // `head` ordered the producer's write of this slot before us.
        let event = unsafe { (*self.buffer.get())[tail] };
        self.tail.store((tail + 1) % QUEUE_CAPACITY, Ordering::Release);
        Some(event)
    }

    /// Number of queued events.
    pub(crate) fn len(&self) -> usize {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        (head + QUEUE_CAPACITY - tail) % QUEUE_CAPACITY
    }
}
