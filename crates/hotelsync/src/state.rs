//! Application state for the hotels and search roles.
//!
//! One process can serve either role or both. Each role owns its own
//! sub-state so its routes only see the services they use; the event
//! channel and the shutdown signal are shared.

use std::sync::Arc;

use tokio::sync::broadcast;

use hotelsync_core::events::EventChannel;

use crate::cache::{HotelCache, MemoryCache};
use crate::config::Config;
use crate::index::InMemoryIndex;
use crate::services::{
    DeadLetterQueue, EventConsumer, HotelFetcher, HotelService, HttpFetcher, LocalFetcher,
    Outbox, ReservationService, SearchService,
};
use crate::storage::InMemoryRepository;

/// Which half of the system this process serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Role {
    /// System of record: hotels, reservations and availability.
    Hotels,
    /// Search index fed by hotel events.
    Search,
    /// Both roles in one process, connected by the in-process channel.
    All,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Hotels => "hotels",
            Role::Search => "search",
            Role::All => "all",
        }
    }

    pub fn serves_hotels(&self) -> bool {
        matches!(self, Role::Hotels | Role::All)
    }

    pub fn serves_search(&self) -> bool {
        matches!(self, Role::Search | Role::All)
    }
}

/// State of the hotels role.
#[derive(Clone)]
pub struct HotelsState {
    pub hotels: HotelService,
    pub reservations: ReservationService,
}

/// State of the search role.
#[derive(Clone)]
pub struct SearchState {
    pub search: SearchService,
    pub consumer: EventConsumer,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub role: Role,
    /// Present when the role serves hotels.
    pub hotels: Option<HotelsState>,
    /// Present when the role serves search.
    pub search: Option<SearchState>,
    /// Stops the outbox relay and the event consumer.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Builds the state with the configured event transport.
    ///
    /// With the `redis` feature the roles talk through a Redis list, so they
    /// can run as separate processes. Otherwise an in-process channel is used.
    pub async fn new(config: &Config, role: Role) -> anyhow::Result<Self> {
        #[cfg(feature = "redis")]
        let channel: Arc<dyn EventChannel> = {
            tracing::info!(url = %config.redis_url, queue = %config.queue_name, "Using Redis event channel");
            Arc::new(
                crate::events::RedisChannel::new(&config.redis_url, &config.queue_name).await?,
            )
        };

        #[cfg(not(feature = "redis"))]
        let channel: Arc<dyn EventChannel> = {
            tracing::info!(queue = %config.queue_name, "Using in-process event channel");
            Arc::new(crate::events::MemoryChannel::new(&config.queue_name))
        };

        Self::with_channel(config, role, channel).await
    }

    /// Builds the state over the given channel and starts the background
    /// tasks of each served role.
    pub async fn with_channel(
        config: &Config,
        role: Role,
        channel: Arc<dyn EventChannel>,
    ) -> anyhow::Result<Self> {
        let (shutdown_tx, _) = broadcast::channel(1);

        let hotels = role.serves_hotels().then(|| {
            let repository = Arc::new(InMemoryRepository::new());
            let cache = HotelCache::new(
                Arc::new(MemoryCache::new(config.cache_max_entries)),
                config.cache_ttl(),
            );
            let outbox = Outbox::new(config.outbox_max_attempts);
            let hotels = HotelService::new(
                repository.clone(),
                cache,
                channel.clone(),
                outbox.clone(),
            );

            tokio::spawn(outbox.run_relay(
                channel.clone(),
                config.outbox_retry(),
                shutdown_tx.subscribe(),
            ));

            HotelsState {
                reservations: ReservationService::new(repository, hotels.clone()),
                hotels,
            }
        });

        let search = if role.serves_search() {
            let fetcher: Arc<dyn HotelFetcher> = match &hotels {
                Some(state) => Arc::new(LocalFetcher::new(state.hotels.clone())),
                None => {
                    tracing::info!(url = %config.hotels_api_url, "Fetching hotels over HTTP");
                    Arc::new(HttpFetcher::new(config.hotels_api_url.clone()))
                }
            };
            let search = SearchService::new(Arc::new(InMemoryIndex::new()), fetcher);
            let consumer = EventConsumer::new(
                search.clone(),
                config.dedupe_capacity,
                DeadLetterQueue::new(config.dead_letter_capacity),
            );
            consumer
                .clone()
                .start(channel, shutdown_tx.subscribe())
                .await?;

            Some(SearchState { search, consumer })
        } else {
            None
        };

        tracing::info!(role = role.as_str(), "Application state ready");

        Ok(Self {
            role,
            hotels,
            search,
            shutdown_tx,
        })
    }

    /// Signal the background tasks to stop.
    pub fn signal_shutdown(&self) {
        // Err only means every task already stopped
        let _ = self.shutdown_tx.send(());
    }
}
