//! The event store: owned, in-memory, session-lifetime state.
//!
//! Owns the insertion-ordered event collection and the per-category
//! registration counters. Registration is the one real state transition in
//! the system; everything else is bookkeeping around it.

use crate::error::RegistrationError;
use crate::types::{Category, DEFAULT_IMAGE, Event, EventDraft, EventId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// In-memory store of events and registration counters
///
/// Insertion order is significant: it is the default display order. Events
/// are never removed, and ids are never reused.
#[derive(Clone, Debug)]
pub struct EventStore {
    events: Vec<Event>,
    next_id: u32,
    registrations: HashMap<Category, u32>,
}

impl Default for EventStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EventStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            next_id: 1,
            registrations: HashMap::new(),
        }
    }

    /// Creates a store seeded with the given drafts, in order
    #[must_use]
    pub fn seeded(drafts: impl IntoIterator<Item = EventDraft>) -> Self {
        let mut store = Self::new();
        for draft in drafts {
            store.add(draft);
        }
        store
    }

    /// Appends a new event with a freshly assigned id
    ///
    /// Accepts any fields, including an empty name; validation is the
    /// submitting form's job, not the store's. A missing image falls back
    /// to [`DEFAULT_IMAGE`].
    pub fn add(&mut self, draft: EventDraft) -> EventId {
        let id = EventId::new(self.next_id);
        self.next_id += 1;

        let event = Event {
            id,
            name: draft.name,
            date: draft.date,
            seats: draft.seats,
            category: draft.category,
            image: draft.image.unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        };
        tracing::debug!(%id, category = %event.category, "event added");
        self.events.push(event);
        id
    }

    /// Looks up an event by id
    #[must_use]
    pub fn find_by_id(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    /// Sets an event's seat count
    ///
    /// A no-op when no event has this id. The new count is taken as-is;
    /// range checks are the caller's responsibility.
    pub fn update_seats(&mut self, id: EventId, seats: u32) {
        match self.events.iter_mut().find(|event| event.id == id) {
            Some(event) => {
                event.seats = seats;
                tracing::debug!(%id, seats, "seats updated");
            },
            None => tracing::trace!(%id, "seat update for unknown event ignored"),
        }
    }

    /// Registers one user for an event
    ///
    /// On success decrements the event's seats by exactly one, bumps the
    /// category counter by exactly one, and returns the remaining seats.
    /// Failures never mutate state.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::NotFound`] when no event has this id
    /// - [`RegistrationError::SoldOut`] when no seats are left
    /// - [`RegistrationError::Unavailable`] when the event is not upcoming
    pub fn register(
        &mut self,
        id: EventId,
        now: DateTime<Utc>,
    ) -> Result<u32, RegistrationError> {
        let Some(event) = self.events.iter_mut().find(|event| event.id == id) else {
            tracing::warn!(%id, "registration for unknown event");
            return Err(RegistrationError::NotFound(id));
        };

        if !event.check_availability() {
            tracing::warn!(%id, "registration for sold-out event");
            return Err(RegistrationError::SoldOut(id));
        }

        // The seats half of is_upcoming is redundant after the guard above;
        // the predicate stays the single place the eligibility rule lives.
        if !event.is_upcoming(now) {
            tracing::warn!(%id, date = %event.date, "registration for unavailable event");
            return Err(RegistrationError::Unavailable(id));
        }

        event.seats -= 1;
        let category = event.category;
        let seats = event.seats;
        *self.registrations.entry(category).or_insert(0) += 1;
        tracing::debug!(%id, %category, seats_left = seats, "registration confirmed");
        Ok(seats)
    }

    /// Number of successful registrations for a category this session
    #[must_use]
    pub fn registrations(&self, category: Category) -> u32 {
        self.registrations.get(&category).copied().unwrap_or(0)
    }

    /// All events, in insertion order
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of stored events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
