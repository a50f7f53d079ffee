#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`PanelUi`**: Owns one panel's event queue and tick state; split it into the two halves
//! - **`Poller`**: The per-tick producer; samples buttons and encoders and queues events
//! - **`Dispatcher`**: The main-loop consumer; drains events, applies the mode machine, forwards the rest
//! - **`Event`**: A queued input event with a held-button snapshot for chord detection
//! - **`ButtonTracker`**: Derives down/press/long-press edges from raw button samples
//! - **`ButtonSource` / `EncoderSource`**: Traits to implement for your hardware
//! - **`App`**: Trait for the application receiving forwarded events
//! - **`ChordHandler`**: Injected device-global chord action
//! - **`DisplayFrame`**: Frame bracketing used by the boot splashscreen
//! - **`UiMode`**: The top-level mode returned by dispatch (and boot selection)
//!
//! Time is counted in poll ticks: one call to `Poller::poll` is one tick, and every
//! duration (long press, idle timeout) is a tick delta. The tick counter wraps; all
//! elapsed-time math uses wrapping subtraction.

pub mod button;
pub mod config;
pub mod controls;
pub mod dispatcher;
pub mod encoder;
pub mod event;
pub mod panel;
pub mod poller;
pub mod splash;

mod queue;

pub use button::{ButtonEdge, ButtonTracker};
pub use config::UiConfig;
pub use controls::{ButtonMask, ButtonSource, Control, EncoderSource, MAX_BUTTONS};
pub use dispatcher::{App, ChordHandler, Dispatcher, UiMode};
pub use encoder::EncoderReader;
pub use event::{Event, EventKind};
pub use panel::PanelUi;
pub use poller::Poller;
pub use queue::QUEUE_CAPACITY;
pub use splash::{BootSelection, DisplayFrame, splashscreen};
