//! Command-line demo of the Community Portal event registration core.
//!
//! Replays the portal's session against a stdout rendering sink: seed the
//! event list, render it, register for events, filter by category, and add
//! a new event through the form action.

use chrono::{TimeDelta, Utc};
use community_portal_core::environment::{Clock, SystemClock};
use community_portal_events::{
    Category, EventCard, EventDraft, EventId, EventStore, PortalAction, PortalEnvironment,
    PortalReducer, PortalState, RenderSink, format_label, render,
};
use community_portal_runtime::Store;
use tracing_subscriber::EnvFilter;

/// Rendering sink that prints the replacement card list to stdout
#[derive(Default)]
struct StdoutSink;

impl RenderSink for StdoutSink {
    fn replace(&mut self, cards: Vec<EventCard>) {
        if cards.is_empty() {
            println!("  (no upcoming events)");
            return;
        }
        for card in cards {
            println!("  [{}] {} ({})", card.event_id, card.name, card.image);
        }
    }
}

/// The portal's seed list, dated relative to the current clock
fn seed_events() -> Vec<EventDraft> {
    let now = Utc::now();
    vec![
        EventDraft::new(
            "Yoga Day".to_string(),
            now + TimeDelta::days(30),
            30,
            Category::Workshop,
        )
        .with_image("1.jpg"),
        EventDraft::new(
            "Ganesh Utsav".to_string(),
            now + TimeDelta::days(60),
            0,
            Category::Seminar,
        )
        .with_image("2.jpg"),
        EventDraft::new(
            "Art Exhibition".to_string(),
            now + TimeDelta::days(45),
            15,
            Category::Art,
        )
        .with_image("3.jpg"),
        EventDraft::new(
            "Book Fair".to_string(),
            now + TimeDelta::days(75),
            20,
            Category::Seminar,
        )
        .with_image("4.jpg"),
        EventDraft::new(
            "Food Fair".to_string(),
            now + TimeDelta::days(100),
            10,
            Category::Food,
        )
        .with_image("5.jpg"),
        EventDraft::new(
            "Music Festival".to_string(),
            now + TimeDelta::days(140),
            50,
            Category::Music,
        )
        .with_image("6.jpg"),
    ]
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Community Portal ===\n");

    let clock = SystemClock;
    let env = PortalEnvironment::new(clock);
    let state = PortalState::new(EventStore::seeded(seed_events()));
    let store = Store::new(state, PortalReducer::new(), env);
    let mut sink = StdoutSink;

    println!("Upcoming events:");
    let now = clock.now();
    store
        .state(|s| render(&s.store, s.filter, now, &mut sink))
        .await;

    // Register twice for Yoga Day
    println!("\nRegistering for Yoga Day...");
    store.send(PortalAction::Register { id: EventId::new(1) }).await;
    store.send(PortalAction::Register { id: EventId::new(1) }).await;
    let seats = store
        .state(|s| s.store.find_by_id(EventId::new(1)).map(|e| e.seats))
        .await;
    if let Some(seats) = seats {
        println!("Seats left: {seats}");
    }

    // Sold out from the start
    println!("\nRegistering for Ganesh Utsav...");
    store.send(PortalAction::Register { id: EventId::new(2) }).await;
    if let Some(error) = store.state(|s| s.last_error.clone()).await {
        println!("Registration failed: {error}");
    }

    // Unknown event
    println!("\nRegistering for event 42...");
    store.send(PortalAction::Register { id: EventId::new(42) }).await;
    if let Some(error) = store.state(|s| s.last_error.clone()).await {
        println!("Registration failed: {error}");
    }

    // Only music events
    println!("\nMusic events:");
    store
        .send(PortalAction::SetFilter {
            category: Some(Category::Music),
        })
        .await;
    let now = clock.now();
    store
        .state(|s| render(&s.store, s.filter, now, &mut sink))
        .await;

    // Add an event through the form action; the filter still applies
    println!("\nAdding Jazz Night...");
    store
        .send(PortalAction::AddEvent {
            draft: EventDraft::new(
                "Jazz Night".to_string(),
                Utc::now() + TimeDelta::days(160),
                40,
                Category::Music,
            )
            .with_image("7.jpg"),
        })
        .await;
    let now = clock.now();
    store
        .state(|s| render(&s.store, s.filter, now, &mut sink))
        .await;

    // Back to the full list, with Ganesh Utsav given fresh seats
    println!("\nAll upcoming events after a seat update:");
    store.send(PortalAction::SetFilter { category: None }).await;
    store
        .send(PortalAction::UpdateSeats {
            id: EventId::new(2),
            seats: 25,
        })
        .await;
    let now = clock.now();
    store
        .state(|s| render(&s.store, s.filter, now, &mut sink))
        .await;

    // Labels and session counters
    println!("\nEvent cards:");
    let labels = store
        .state(|s| {
            s.store
                .events()
                .iter()
                .map(format_label)
                .collect::<Vec<_>>()
        })
        .await;
    for label in labels {
        println!("  {label}");
    }

    let workshop = store
        .state(|s| s.store.registrations(Category::Workshop))
        .await;
    println!("\nWorkshop registrations this session: {workshop}");

    println!("\n=== Demo Complete ===");
}
