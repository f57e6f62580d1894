//! Keyed in-memory cache for user lookups.
//!
//! Authors are resolved all over the feed (meme headers, every comment),
//! so lookups are cached by user id with a freshness window, and an
//! in-flight set de-duplicates concurrent requests for the same id: many
//! cards asking for the same author produce one request.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::models::User;

/// How long a cached user counts as fresh.
pub const USER_FRESHNESS: Duration = Duration::from_secs(5 * 60);

struct CachedUser {
    user: User,
    fetched_at: Instant,
}

pub struct UserCache {
    entries: HashMap<String, CachedUser>,
    pending: HashSet<String>,
    freshness: Duration,
}

impl Default for UserCache {
    fn default() -> Self {
        Self::with_freshness(USER_FRESHNESS)
    }
}

impl UserCache {
    pub fn with_freshness(freshness: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            pending: HashSet::new(),
            freshness,
        }
    }

    /// Returns the cached user if present and fresh.
    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.get_at(user_id, Instant::now())
    }

    pub fn get_at(&self, user_id: &str, now: Instant) -> Option<&User> {
        self.entries
            .get(user_id)
            .filter(|e| now.duration_since(e.fetched_at) < self.freshness)
            .map(|e| &e.user)
    }

    /// Marks a fetch for `user_id` as in flight if one is actually needed.
    /// Returns whether the caller should issue the request.
    pub fn begin_fetch(&mut self, user_id: &str) -> bool {
        self.begin_fetch_at(user_id, Instant::now())
    }

    pub fn begin_fetch_at(&mut self, user_id: &str, now: Instant) -> bool {
        if self.get_at(user_id, now).is_some() || self.pending.contains(user_id) {
            return false;
        }
        self.pending.insert(user_id.to_string());
        true
    }

    /// Stores a fetched user.
    pub fn complete(&mut self, user: User) {
        self.pending.remove(&user.id);
        self.entries.insert(
            user.id.clone(),
            CachedUser {
                user,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Clears the in-flight marker so the lookup can be retried later.
    pub fn fail(&mut self, user_id: &str) {
        self.pending.remove(user_id);
    }

    /// Drops a cached entry; the next access refetches.
    pub fn invalidate(&mut self, user_id: &str) {
        self.entries.remove(user_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
