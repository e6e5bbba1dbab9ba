//! # Cafe Notify
//!
//! Transient, stacked, dismissible notifications.
//!
//! The [`Notifier`] owns every notification's lifecycle:
//!
//! ```text
//! created -> visible -> dismissing -> removed
//! ```
//!
//! It never reads a clock. Callers pass the current logical time in
//! milliseconds and the notifier fires whichever timers are due, recording
//! each phase change as a [`Transition`] that a presenter replays.
//!
//! ## Example
//!
//! ```rust
//! use cafe_notify::{Millis, NotificationKind, Notifier, Phase};
//!
//! let mut notifier = Notifier::default();
//! let handle = notifier.notify("Booking confirmed", NotificationKind::Success, Millis(0));
//!
//! notifier.advance_to(Millis(5_000));
//! assert_eq!(notifier.phase(handle), Some(Phase::Dismissing));
//!
//! notifier.advance_to(Millis(5_300));
//! assert_eq!(notifier.phase(handle), Some(Phase::Removed));
//! ```

pub mod config;
pub mod notification;
pub mod timer;
pub mod manager;

pub use config::NotifierConfig;
pub use notification::{Millis, Notification, NotificationId, NotificationKind, Phase};
pub use manager::{
    DismissReason, Message, NotificationHandle, Notifier, Transition, TransitionKind,
};
