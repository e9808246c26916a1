use chrono::Utc;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::AdminSessions;
use crate::config::Config;
use crate::store::memory::{MemoryEventStore, MemoryRegistrationStore};
use crate::store::postgres::{PgEventStore, PgRegistrationStore};
use crate::store::{EventStore, RegistrationStore};

/// Shared application state: the two stores behind their traits, the admin
/// session set, and the settings handlers need at request time.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<dyn EventStore>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub sessions: AdminSessions,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self {
            events: Arc::new(PgEventStore::new(pool.clone())),
            registrations: Arc::new(PgRegistrationStore::new(pool)),
            sessions: AdminSessions::default(),
            config: Arc::new(config),
        }
    }

    /// Demo mode: seeded events, nothing persisted.
    pub fn in_memory(config: Config) -> Self {
        Self {
            events: Arc::new(MemoryEventStore::with_sample_events(Utc::now().date_naive())),
            registrations: Arc::new(MemoryRegistrationStore::new()),
            sessions: AdminSessions::default(),
            config: Arc::new(config),
        }
    }
}
