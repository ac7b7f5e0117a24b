//! Lifecycle client CLI.
//!
//! A thin operational front over the library: watch a reservation until it
//! reaches a terminal state, resolve a chat message to the card it would
//! render, or cancel a booking.

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rendezvous::backend::HttpBackend;
use rendezvous::booking::{CancelOutcome, MessageCard, OrderManager, Reconciler, ReservationStore};
use rendezvous::config::Config;
use rendezvous::events::{EventBus, LifecycleEvent};
use rendezvous::identity::IdentityStore;
use rendezvous::ReservationBackend;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    println!("\n{}", "═".repeat(60));
    println!("📅 Rendezvous Lifecycle Client v0.1.0");
    println!("{}\n", "═".repeat(60));

    let config = Config::from_env();
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("watch") => {
            let id = args.get(2).context("usage: rendezvous watch <reservation-id>")?;
            watch(&config, id).await
        }
        Some("card") => {
            let text = args.get(2).context("usage: rendezvous card <message-text>")?;
            card(&config, text).await
        }
        Some("cancel") => {
            let id = args.get(2).context("usage: rendezvous cancel <reservation-id>")?;
            cancel(&config, id).await
        }
        _ => {
            eprintln!("usage: rendezvous <watch|card|cancel> <argument>");
            Ok(())
        }
    }
}

/// Poll a reservation and report every transition until it goes terminal.
async fn watch(config: &Config, id: &str) -> Result<()> {
    let backend: Arc<dyn ReservationBackend> = Arc::new(HttpBackend::new(&config.api_url));
    let reservation = backend
        .fetch_reservation(id)
        .await
        .context("Failed to load reservation")?;
    info!("watching reservation {} (currently {})", reservation.id, reservation.status);

    let bus = Arc::new(EventBus::new());
    let mut events = bus.subscribe();
    let store = ReservationStore::new(reservation, bus.clone());
    let handle = Reconciler::new(backend, store.clone()).spawn();

    while !store.status().await.is_terminal() {
        match events.recv().await {
            Ok(LifecycleEvent::StatusChanged { from, to, .. }) => info!("status: {from} -> {to}"),
            Ok(LifecycleEvent::MeetingReady { .. }) => info!("meeting is ready to join"),
            Ok(_) => {}
            Err(_) => break,
        }
    }
    handle.stop();
    info!("reservation {} reached {}", id, store.status().await);
    Ok(())
}

/// Resolve a chat message the way the chat surface would.
async fn card(config: &Config, text: &str) -> Result<()> {
    let backend: Arc<dyn ReservationBackend> = Arc::new(HttpBackend::new(&config.api_url));
    let identity = IdentityStore::new(&config.identity_file)
        .load()
        .await
        .context("Failed to load consumer identity")?;
    let orders = OrderManager::new(backend, Arc::new(EventBus::new()));

    match orders.resolve_card(text, &identity, chrono::Utc::now()).await {
        MessageCard::Offer { offer, expired } => {
            info!(
                "offer card: {} — {} {} ({})",
                offer.title,
                offer.pricing.price,
                offer.pricing.currency,
                if expired { "expired" } else { "bookable" }
            );
        }
        MessageCard::Reservation { reservation, announcement, can_join, .. } => {
            info!(
                "reservation card: {} [{}] join allowed: {can_join} (meeting {})",
                reservation.id, reservation.status, announcement.meeting_id
            );
            if let Some(slot) = &reservation.time_slot {
                match rendezvous::countdown::countdown_from_wire(&slot.starts_at, chrono::Utc::now()) {
                    Some(c) if c.already_started() => info!("slot start time has passed"),
                    Some(c) => {
                        let t = c.time_to_start();
                        info!("starts in {}d {}h {}m", t.days, t.hours, t.minutes);
                    }
                    None => {}
                }
            }
        }
        MessageCard::Raw { text } => {
            info!("no structured card; raw text: {text}");
        }
    }
    Ok(())
}

/// Cancel a booked reservation.
async fn cancel(config: &Config, id: &str) -> Result<()> {
    let backend: Arc<dyn ReservationBackend> = Arc::new(HttpBackend::new(&config.api_url));
    let reservation = backend
        .fetch_reservation(id)
        .await
        .context("Failed to load reservation")?;

    let bus = Arc::new(EventBus::new());
    let store = ReservationStore::new(reservation, bus.clone());
    let orders = OrderManager::new(backend, bus);

    match orders.cancel(&store).await? {
        CancelOutcome::Cancelled => info!("reservation {id} cancelled"),
        CancelOutcome::Rejected { message, .. } => warn!("{message}"),
    }
    Ok(())
}
