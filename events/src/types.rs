//! Domain types for the event registration core.
//!
//! An event is a plain record: a unique id, a display name, a date, a
//! remaining seat count, a category from a fixed set, and an image
//! reference. Eligibility for display and registration is computed from the
//! record and the current time, never stored.

use crate::error::UnknownCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Image reference used when an event is created without one
pub const DEFAULT_IMAGE: &str = "default.jpg";

/// Unique identifier for an event
///
/// Assigned by the store at creation time as max existing id + 1;
/// ids are never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(u32);

impl EventId {
    /// Creates an `EventId` from a raw integer
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw integer value
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed set of event categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Hands-on workshop
    Workshop,
    /// Seminar or talk
    Seminar,
    /// Multi-track conference
    Conference,
    /// Live music
    Music,
    /// Art exhibition
    Art,
    /// Food fair
    Food,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Self; 6] = [
        Self::Workshop,
        Self::Seminar,
        Self::Conference,
        Self::Music,
        Self::Art,
        Self::Food,
    ];

    /// Lowercase wire name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Workshop => "workshop",
            Self::Seminar => "seminar",
            Self::Conference => "conference",
            Self::Music => "music",
            Self::Art => "art",
            Self::Food => "food",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A community event
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Display name
    pub name: String,
    /// When the event takes place
    pub date: DateTime<Utc>,
    /// Remaining seat capacity
    pub seats: u32,
    /// Event category
    pub category: Category,
    /// Opaque image reference
    pub image: String,
}

impl Event {
    /// Whether any seats remain
    #[must_use]
    pub const fn check_availability(&self) -> bool {
        self.seats > 0
    }

    /// Whether the event is upcoming: strictly in the future with seats left
    ///
    /// This predicate gates both display and registration eligibility.
    #[must_use]
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.date > now && self.seats > 0
    }
}

/// A not-yet-stored event, as submitted through the portal
///
/// The store assigns the id and applies the image default; every other
/// field is taken as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Display name
    pub name: String,
    /// When the event takes place
    pub date: DateTime<Utc>,
    /// Seat capacity
    pub seats: u32,
    /// Event category
    pub category: Category,
    /// Image reference; [`DEFAULT_IMAGE`] when absent
    pub image: Option<String>,
}

impl EventDraft {
    /// Creates a draft without an image reference
    #[must_use]
    pub const fn new(name: String, date: DateTime<Utc>, seats: u32, category: Category) -> Self {
        Self {
            name,
            date,
            seats,
            category,
            image: None,
        }
    }

    /// Sets the image reference
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}
