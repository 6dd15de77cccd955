//! Single-slot fallback cache for the last known post collection.

use std::sync::{Mutex, PoisonError};

use plume_api_types::Post;
use time::OffsetDateTime;

/// The last successfully fetched collection plus its capture time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSnapshot {
    pub posts: Vec<Post>,
    pub captured_at: OffsetDateTime,
}

/// A process-local, lifetime-scoped store holding at most one snapshot.
///
/// Each `store` fully replaces the previous content; nothing expires by
/// age, and a fresh process starts empty. Instances are injected rather
/// than global so every test can run against its own slot.
#[derive(Debug, Default)]
pub struct FallbackCache {
    slot: Mutex<Option<CacheSnapshot>>,
}

impl FallbackCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with the given collection, stamped now.
    pub fn store(&self, posts: &[Post]) {
        let snapshot = CacheSnapshot {
            posts: posts.to_vec(),
            captured_at: OffsetDateTime::now_utc(),
        };
        *self.lock() = Some(snapshot);
    }

    pub fn load(&self) -> Option<CacheSnapshot> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CacheSnapshot>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn post(title: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: "Ada".to_string(),
            content: "body".to_string(),
            created_at: datetime!(2025-06-01 12:00 UTC),
            updated_at: datetime!(2025-06-01 12:00 UTC),
        }
    }

    #[test]
    fn starts_empty() {
        assert!(FallbackCache::new().load().is_none());
    }

    #[test]
    fn store_replaces_the_whole_slot() {
        let cache = FallbackCache::new();
        cache.store(&[post("first"), post("second")]);
        cache.store(&[post("only")]);

        let snapshot = cache.load().unwrap();
        assert_eq!(snapshot.posts.len(), 1);
        assert_eq!(snapshot.posts[0].title, "only");
    }

    #[test]
    fn load_preserves_order() {
        let cache = FallbackCache::new();
        let posts = vec![post("a"), post("b"), post("c")];
        cache.store(&posts);

        assert_eq!(cache.load().unwrap().posts, posts);
    }

    #[test]
    fn clear_is_idempotent() {
        let cache = FallbackCache::new();
        cache.store(&[post("a")]);
        cache.clear();
        cache.clear();
        assert!(cache.load().is_none());
    }
}
