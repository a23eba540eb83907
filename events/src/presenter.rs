//! Read side of the portal: project store state into a display structure.
//!
//! The presenter is stateless. It derives a filtered view of upcoming
//! events from the store and hands a complete replacement of the rendered
//! output to whatever sink displays it.

use crate::store::EventStore;
use crate::types::{Category, Event, EventId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One rendered event: image, name, and the id its Register affordance
/// is bound to
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventCard {
    /// Id the card's Register affordance targets
    pub event_id: EventId,
    /// Display name
    pub name: String,
    /// Opaque image reference
    pub image: String,
}

impl EventCard {
    fn from_event(event: &Event) -> Self {
        Self {
            event_id: event.id,
            name: event.name.clone(),
            image: event.image.clone(),
        }
    }
}

/// Surface the presenter renders into
///
/// Each render replaces the previous output entirely; there is no
/// incremental diffing.
pub trait RenderSink {
    /// Replace the currently displayed cards
    fn replace(&mut self, cards: Vec<EventCard>);
}

/// Upcoming events in insertion order, optionally restricted to a category
///
/// Lazy and restartable: each call returns a fresh iterator over the
/// store's current state. The filter is stable; no re-sort happens.
pub fn list_upcoming<'a>(
    store: &'a EventStore,
    category: Option<Category>,
    now: DateTime<Utc>,
) -> impl Iterator<Item = &'a Event> + 'a {
    store
        .events()
        .iter()
        .filter(move |event| event.is_upcoming(now))
        .filter(move |event| category.is_none_or(|wanted| event.category == wanted))
}

/// Projects the upcoming events into the sink, replacing prior output
pub fn render(
    store: &EventStore,
    category: Option<Category>,
    now: DateTime<Utc>,
    sink: &mut dyn RenderSink,
) {
    let cards = list_upcoming(store, category, now)
        .map(EventCard::from_event)
        .collect();
    sink.replace(cards);
}

/// `"<Category>: <name>"` with the category's first letter capitalized
#[must_use]
pub fn format_label(event: &Event) -> String {
    let mut chars = event.category.as_str().chars();
    let category = chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    });
    format!("{category}: {}", event.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EventDraft, EventId};
    use chrono::TimeDelta;

    #[derive(Default)]
    struct RecordingSink {
        cards: Vec<EventCard>,
        renders: usize,
    }

    impl RenderSink for RecordingSink {
        fn replace(&mut self, cards: Vec<EventCard>) {
            self.cards = cards;
            self.renders += 1;
        }
    }

    fn seeded_store(now: DateTime<Utc>) -> EventStore {
        EventStore::seeded([
            EventDraft::new(
                "Yoga Day".to_string(),
                now + TimeDelta::days(21),
                30,
                Category::Workshop,
            )
            .with_image("1.jpg"),
            // Sold out: must never render
            EventDraft::new(
                "Ganesh Utsav".to_string(),
                now + TimeDelta::days(60),
                0,
                Category::Seminar,
            ),
            EventDraft::new(
                "Art Exhibition".to_string(),
                now + TimeDelta::days(14),
                15,
                Category::Art,
            ),
            // Past: must never render
            EventDraft::new(
                "Harvest Fest".to_string(),
                now - TimeDelta::days(3),
                25,
                Category::Food,
            ),
            EventDraft::new(
                "Music Festival".to_string(),
                now + TimeDelta::days(90),
                50,
                Category::Music,
            ),
        ])
    }

    #[test]
    fn list_upcoming_excludes_past_and_sold_out() {
        let now = Utc::now();
        let store = seeded_store(now);

        let names: Vec<_> = list_upcoming(&store, None, now)
            .map(|e| e.name.as_str())
            .collect();

        assert_eq!(names, ["Yoga Day", "Art Exhibition", "Music Festival"]);
    }

    #[test]
    fn list_upcoming_filters_by_category() {
        let now = Utc::now();
        let store = seeded_store(now);

        let names: Vec<_> = list_upcoming(&store, Some(Category::Music), now)
            .map(|e| e.name.as_str())
            .collect();

        assert_eq!(names, ["Music Festival"]);
    }

    #[test]
    fn list_upcoming_is_idempotent_without_mutation() {
        let now = Utc::now();
        let store = seeded_store(now);

        let first: Vec<_> = list_upcoming(&store, None, now).collect();
        let second: Vec<_> = list_upcoming(&store, None, now).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn render_replaces_prior_output() {
        let now = Utc::now();
        let store = seeded_store(now);
        let mut sink = RecordingSink::default();

        render(&store, None, now, &mut sink);
        assert_eq!(sink.cards.len(), 3);

        render(&store, Some(Category::Art), now, &mut sink);
        assert_eq!(sink.renders, 2);
        assert_eq!(sink.cards.len(), 1);
        assert_eq!(sink.cards[0].name, "Art Exhibition");
        assert_eq!(sink.cards[0].event_id, EventId::new(3));
    }

    #[test]
    fn render_never_duplicates_events() {
        let now = Utc::now();
        let store = seeded_store(now);
        let mut sink = RecordingSink::default();

        render(&store, None, now, &mut sink);

        let mut ids: Vec<_> = sink.cards.iter().map(|c| c.event_id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), sink.cards.len());
    }

    #[test]
    fn format_label_capitalizes_category() {
        let now = Utc::now();
        let event = Event {
            id: EventId::new(7),
            name: "Jazz Night".to_string(),
            date: now + TimeDelta::days(1),
            seats: 40,
            category: Category::Music,
            image: "7.jpg".to_string(),
        };

        assert_eq!(format_label(&event), "Music: Jazz Night");
    }
}
