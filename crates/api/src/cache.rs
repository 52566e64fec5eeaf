//! In-memory cache of computed slot lists, keyed by court and date.
//!
//! The cache lives in [`crate::ApiState`] and is sized by configuration at
//! startup. Writes that change a court's bookings invalidate the affected
//! key; schedule changes clear everything.
//!
//! Every invalidation advances the cache [`Generation`]. A reader takes the
//! generation before it reads the store and hands it back to
//! [`SlotCache::insert`]; if an invalidation happened in between, the
//! computed slots may predate the write and are not stored.

use chrono::NaiveDate;
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use uuid::Uuid;

type SlotKey = (Uuid, NaiveDate);

/// Invalidation counter observed by a reader before computing slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

#[derive(Debug, Clone)]
struct CacheEntry {
    slots: Vec<String>,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<SlotKey, CacheEntry>,
    generation: u64,
}

#[derive(Debug)]
pub struct SlotCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl SlotCache {
    /// A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub async fn get(&self, court_id: Uuid, date: NaiveDate) -> Option<Vec<String>> {
        let state = self.state.read().await;
        state
            .entries
            .get(&(court_id, date))
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.slots.clone())
    }

    pub async fn generation(&self) -> Generation {
        Generation(self.state.read().await.generation)
    }

    /// Stores `slots` unless the cache was invalidated after `generation`
    /// was taken.
    pub async fn insert(
        &self,
        court_id: Uuid,
        date: NaiveDate,
        generation: Generation,
        slots: Vec<String>,
    ) {
        if !self.is_enabled() {
            return;
        }

        let now = Instant::now();
        let mut state = self.state.write().await;
        if state.generation != generation.0 {
            tracing::debug!(
                "Dropping slots computed before an invalidation: court_id={}, date={}",
                court_id,
                date
            );
            return;
        }

        state.entries.retain(|_, entry| entry.expires_at > now);
        state.entries.insert(
            (court_id, date),
            CacheEntry {
                slots,
                expires_at: now + self.ttl,
            },
        );
    }

    pub async fn invalidate(&self, court_id: Uuid, date: NaiveDate) {
        let mut state = self.state.write().await;
        state.entries.remove(&(court_id, date));
        state.generation = state.generation.wrapping_add(1);
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.entries.clear();
        state.generation = state.generation.wrapping_add(1);
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }
}
