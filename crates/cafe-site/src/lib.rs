//! # Cafe Site
//!
//! Everything the Joe Coffee page does that is not DOM plumbing:
//!
//! - **Configuration**: timings and thresholds, loaded from `cafe.toml`
//! - **Messages**: the texts fed to the notifier by bookings, product
//!   buttons and blog posts
//! - **Booking**: form submission wired to validation and notifications
//! - **Effects**: navbar state, section highlighting, parallax, staggered
//!   reveals and counter tweening as plain arithmetic

pub mod config;
pub mod messages;
pub mod booking;
pub mod effects;
pub mod counter;

pub use config::{EffectsConfig, NavigationConfig, SiteConfig};
pub use messages::SiteMessage;
pub use booking::{BookingDesk, BookingOutcome};
pub use effects::{BeanTransform, Effects, HoverTarget, SectionBounds, StyleSet};
pub use counter::CounterTween;
