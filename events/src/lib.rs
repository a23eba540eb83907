//! # Community Portal Events
//!
//! The event registration core of the Community Portal: an in-memory,
//! session-lifetime event store plus a presenter that projects upcoming
//! events to a display surface.
//!
//! ## Architecture
//!
//! Two components share the data, nothing else:
//!
//! - [`EventStore`] owns the event collection and mutates seat counts on
//!   registration
//! - the [`presenter`] derives a filtered view of upcoming events and
//!   renders it into a [`presenter::RenderSink`]
//!
//! User actions flow through the [`PortalReducer`]: click → store mutation
//! → re-render from updated state, one turn at a time. An event is
//! *upcoming* when its date is strictly in the future and seats remain;
//! that predicate ([`Event::is_upcoming`]) gates both display and
//! registration.
//!
//! ## Example
//!
//! ```
//! use chrono::{TimeDelta, Utc};
//! use community_portal_events::{Category, EventDraft, EventStore};
//!
//! let mut store = EventStore::new();
//! let id = store.add(EventDraft::new(
//!     "Jazz Night".to_string(),
//!     Utc::now() + TimeDelta::days(30),
//!     40,
//!     Category::Music,
//! ));
//!
//! let remaining = store.register(id, Utc::now()).unwrap();
//! assert_eq!(remaining, 39);
//! assert_eq!(store.registrations(Category::Music), 1);
//! ```

pub mod error;
pub mod presenter;
pub mod reducer;
pub mod store;
pub mod types;

pub use error::{PortalError, RegistrationError, UnknownCategory};
pub use presenter::{EventCard, RenderSink, format_label, list_upcoming, render};
pub use reducer::{PortalAction, PortalEnvironment, PortalReducer, PortalState};
pub use store::EventStore;
pub use types::{Category, DEFAULT_IMAGE, Event, EventDraft, EventId};
