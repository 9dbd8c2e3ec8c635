//! Reservation widget logic: dialog state, simulated availability checks and
//! booking confirmation, wired to a page through the [`Document`] port.

pub mod availability;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod modal;
mod panels;
pub mod page;
pub mod session;
pub mod submitter;
pub mod timers;

pub use availability::{parse_party_size, AvailabilityRules, AvailabilityValidator};
pub use config::{load_settings, WidgetSettings};
pub use document::{Capabilities, Document, MemoryDocument};
pub use error::WidgetError;
pub use events::{EventOutcome, Key, UiEvent};
pub use modal::ModalController;
pub use page::ReservationPage;
pub use submitter::ReservationSubmitter;
pub use timers::{DeferredAction, PendingTimer, TimerId, TimerQueue};
