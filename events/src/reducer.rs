//! Portal reducer: the single entry point through which user actions
//! mutate the event store.
//!
//! The portal is a pure state machine: every action runs to completion
//! against the state, no effects are emitted, and the caller re-renders
//! from the updated state afterwards. Failed registrations and rejected
//! submissions land in `last_error` for the glue to surface.

use crate::error::PortalError;
use crate::presenter;
use crate::store::EventStore;
use crate::types::{Category, Event, EventDraft, EventId};
use chrono::{DateTime, Utc};
use community_portal_core::{
    SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec,
};
use serde::{Deserialize, Serialize};

/// State of the portal: the store plus the current view settings
#[derive(Clone, Debug, Default)]
pub struct PortalState {
    /// The owned event store
    pub store: EventStore,
    /// Current category filter, if any
    pub filter: Option<Category>,
    /// Outcome of the last rejected action, if any
    pub last_error: Option<PortalError>,
}

impl PortalState {
    /// Creates portal state around an existing store
    #[must_use]
    pub const fn new(store: EventStore) -> Self {
        Self {
            store,
            filter: None,
            last_error: None,
        }
    }

    /// Upcoming events under the current filter
    pub fn visible(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Event> {
        presenter::list_upcoming(&self.store, self.filter, now)
    }
}

/// User actions the portal processes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PortalAction {
    /// Submit a new event through the form
    AddEvent {
        /// The submitted draft
        draft: EventDraft,
    },

    /// Register one user for an event
    Register {
        /// Target event
        id: EventId,
    },

    /// Set an event's seat count
    UpdateSeats {
        /// Target event
        id: EventId,
        /// New seat count
        seats: u32,
    },

    /// Change the category filter
    SetFilter {
        /// New filter; `None` shows all categories
        category: Option<Category>,
    },
}

/// Environment dependencies for the portal reducer
///
/// Only the clock: "upcoming" is recomputed from the current time on every
/// evaluation, and tests inject a fixed clock to keep it deterministic.
#[derive(Debug, Clone)]
pub struct PortalEnvironment<C: Clock> {
    /// Clock the eligibility predicate reads
    pub clock: C,
}

impl<C: Clock> PortalEnvironment<C> {
    /// Creates a new portal environment with the given clock
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }
}

/// Reducer for the portal
///
/// Generic over the Clock type C to work with any clock implementation.
#[derive(Debug, Clone, Copy)]
pub struct PortalReducer<C> {
    _phantom: std::marker::PhantomData<C>,
}

impl<C> PortalReducer<C> {
    /// Creates a new portal reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C> Default for PortalReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> PortalReducer<C> {
    /// Validates a submitted event draft, mirroring the portal form checks
    ///
    /// The store itself accepts anything; rejection happens here so that a
    /// bad submission never reaches it.
    fn validate_draft(draft: &EventDraft) -> Result<(), String> {
        if draft.name.trim().is_empty() {
            return Err("event name must not be empty".to_string());
        }

        Ok(())
    }
}

impl<C: Clock> Reducer for PortalReducer<C> {
    type State = PortalState;
    type Action = PortalAction;
    type Environment = PortalEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            PortalAction::AddEvent { draft } => {
                if let Err(error) = Self::validate_draft(&draft) {
                    tracing::warn!(%error, "event submission rejected");
                    state.last_error = Some(PortalError::InvalidEvent(error));
                } else {
                    state.store.add(draft);
                    state.last_error = None;
                }
            },

            PortalAction::Register { id } => match state.store.register(id, env.clock.now()) {
                Ok(_remaining) => state.last_error = None,
                Err(error) => state.last_error = Some(error.into()),
            },

            PortalAction::UpdateSeats { id, seats } => {
                state.store.update_seats(id, seats);
                state.last_error = None;
            },

            PortalAction::SetFilter { category } => {
                state.filter = category;
            },
        }

        // Pure state machine - no side effects
        smallvec![Effect::None]
    }
}
