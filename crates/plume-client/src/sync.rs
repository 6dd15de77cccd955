//! Sync coordinator: the per-operation choice between network, cache, and
//! "no data", plus reconciliation of results into the view collection.

use std::sync::Arc;

use plume_api_types::{Post, PostInput};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::cache::FallbackCache;
use crate::connectivity::ConnectivitySignal;
use crate::error::ClientError;
use crate::transport::PostsApi;

/// Where the returned collection came from. Callers must surface
/// `FallbackCache` results as stale rather than passing them off as live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSource {
    Live,
    FallbackCache { captured_at: OffsetDateTime },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionView {
    pub posts: Vec<Post>,
    pub source: CollectionSource,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("draft is incomplete: {0}")]
    InvalidDraft(String),
    #[error("writes are unavailable while offline")]
    Offline,
    #[error("no cached posts are available")]
    NoCachedData,
    #[error("connectivity changed while the request was in flight; result discarded")]
    Superseded,
    #[error(transparent)]
    Transport(#[from] ClientError),
}

/// Decides, for every load and mutation, whether to call the transport or
/// read the fallback cache, based on the connectivity signal sampled at
/// call start.
///
/// Reads recover from transport failure by falling back to the cache;
/// writes never do. A result whose connectivity epoch moved while the call
/// was in flight is discarded without touching view state or cache.
pub struct SyncCoordinator {
    transport: Arc<dyn PostsApi>,
    cache: FallbackCache,
    signal: ConnectivitySignal,
    posts: Vec<Post>,
}

impl SyncCoordinator {
    pub fn new(
        transport: Arc<dyn PostsApi>,
        cache: FallbackCache,
        signal: ConnectivitySignal,
    ) -> Self {
        Self {
            transport,
            cache,
            signal,
            posts: Vec::new(),
        }
    }

    /// The collection currently held in view state.
    pub fn collection(&self) -> &[Post] {
        &self.posts
    }

    /// Load the authoritative post collection.
    ///
    /// Online: fetch, overwrite the cache with the result (the single cache
    /// write of the operation), and return it tagged live. On fetch failure
    /// or while offline, serve the cached snapshot when one exists.
    pub async fn refresh(&mut self) -> Result<CollectionView, SyncError> {
        let observed = self.signal.observe();

        if !observed.online {
            debug!(target = "plume_client::sync", "offline refresh, reading cache");
            return self.from_cache();
        }

        match self.transport.list_posts().await {
            Ok(posts) => {
                if self.signal.epoch() != observed.epoch {
                    warn!(
                        target = "plume_client::sync",
                        "discarding refresh result after connectivity change"
                    );
                    return Err(SyncError::Superseded);
                }
                self.cache.store(&posts);
                self.posts = posts.clone();
                Ok(CollectionView {
                    posts,
                    source: CollectionSource::Live,
                })
            }
            Err(err) => {
                warn!(
                    target = "plume_client::sync",
                    error = %err,
                    "refresh failed, falling back to cache"
                );
                self.from_cache()
            }
        }
    }

    /// Persist a new post and prepend it to the view collection.
    ///
    /// The draft is re-validated here regardless of what the form layer
    /// checked. The prepend and the cache overwrite happen only after the
    /// server confirms; no optimistic update, no retry, no offline queue.
    pub async fn create(&mut self, draft: PostInput) -> Result<Post, SyncError> {
        let blank = draft.blank_fields();
        if !blank.is_empty() {
            return Err(SyncError::InvalidDraft(format!(
                "{} must not be empty",
                blank.join(", ")
            )));
        }

        let observed = self.signal.observe();
        if !observed.online {
            return Err(SyncError::Offline);
        }

        let post = self.transport.create_post(&draft).await?;

        if self.signal.epoch() != observed.epoch {
            warn!(
                target = "plume_client::sync",
                id = %post.id,
                "discarding create result after connectivity change"
            );
            return Err(SyncError::Superseded);
        }

        self.posts.insert(0, post.clone());
        self.cache.store(&self.posts);
        Ok(post)
    }

    /// Filter the current view collection without touching network or
    /// cache. Case-insensitive substring containment against title,
    /// author, and content; a blank term means "show all".
    pub fn search(&self, term: &str) -> Vec<Post> {
        let term = term.trim();
        if term.is_empty() {
            return self.posts.clone();
        }

        let needle = term.to_lowercase();
        self.posts
            .iter()
            .filter(|post| {
                post.title.to_lowercase().contains(&needle)
                    || post.author.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Drop the cached snapshot. Idempotent; view state is untouched.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    fn from_cache(&mut self) -> Result<CollectionView, SyncError> {
        match self.cache.load() {
            Some(snapshot) => {
                self.posts = snapshot.posts.clone();
                Ok(CollectionView {
                    posts: snapshot.posts,
                    source: CollectionSource::FallbackCache {
                        captured_at: snapshot.captured_at,
                    },
                })
            }
            None => Err(SyncError::NoCachedData),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use plume_api_types::DeletePostResponse;
    use reqwest::StatusCode;
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;

    fn post(title: &str, author: &str, content: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            created_at: datetime!(2025-06-01 12:00 UTC),
            updated_at: datetime!(2025-06-01 12:00 UTC),
        }
    }

    fn transport_error() -> ClientError {
        ClientError::Timeout { operation: "list" }
    }

    /// Scripted transport double that counts calls and can flip the
    /// connectivity signal while a call is in flight.
    #[derive(Default)]
    struct ScriptedApi {
        list_responses: Mutex<VecDeque<Result<Vec<Post>, ClientError>>>,
        create_responses: Mutex<VecDeque<Result<Post, ClientError>>>,
        list_calls: AtomicUsize,
        create_calls: AtomicUsize,
        flip_offline_during_call: Mutex<Option<ConnectivitySignal>>,
    }

    impl ScriptedApi {
        fn push_list(&self, response: Result<Vec<Post>, ClientError>) {
            self.list_responses.lock().unwrap().push_back(response);
        }

        fn push_create(&self, response: Result<Post, ClientError>) {
            self.create_responses.lock().unwrap().push_back(response);
        }

        fn flip_offline_during_next_call(&self, signal: &ConnectivitySignal) {
            *self.flip_offline_during_call.lock().unwrap() = Some(signal.clone());
        }

        fn list_calls(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }

        fn create_calls(&self) -> usize {
            self.create_calls.load(Ordering::SeqCst)
        }

        fn maybe_flip(&self) {
            if let Some(signal) = self.flip_offline_during_call.lock().unwrap().take() {
                signal.set_online(false);
            }
        }
    }

    #[async_trait]
    impl PostsApi for ScriptedApi {
        async fn list_posts(&self) -> Result<Vec<Post>, ClientError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.maybe_flip();
            self.list_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected list call"))
        }

        async fn get_post(&self, _id: Uuid) -> Result<Post, ClientError> {
            unimplemented!("not exercised by the coordinator")
        }

        async fn search_posts(&self, _term: &str) -> Result<Vec<Post>, ClientError> {
            unimplemented!("not exercised by the coordinator")
        }

        async fn create_post(&self, _input: &PostInput) -> Result<Post, ClientError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.maybe_flip();
            self.create_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected create call"))
        }

        async fn update_post(&self, _id: Uuid, _input: &PostInput) -> Result<Post, ClientError> {
            unimplemented!("not exercised by the coordinator")
        }

        async fn delete_post(&self, _id: Uuid) -> Result<DeletePostResponse, ClientError> {
            unimplemented!("not exercised by the coordinator")
        }
    }

    fn build(
        signal: &ConnectivitySignal,
    ) -> (SyncCoordinator, Arc<ScriptedApi>) {
        let api = Arc::new(ScriptedApi::default());
        let transport: Arc<dyn PostsApi> = api.clone();
        let coordinator = SyncCoordinator::new(transport, FallbackCache::new(), signal.clone());
        (coordinator, api)
    }

    #[tokio::test]
    async fn online_refresh_returns_live_and_writes_cache() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let posts = vec![post("a", "x", "1"), post("b", "y", "2")];
        api.push_list(Ok(posts.clone()));

        let view = coordinator.refresh().await.unwrap();
        assert_eq!(view.source, CollectionSource::Live);
        assert_eq!(view.posts, posts);
        assert_eq!(coordinator.collection(), posts.as_slice());

        // The cache now serves the same collection offline.
        signal.set_online(false);
        let view = coordinator.refresh().await.unwrap();
        assert!(matches!(
            view.source,
            CollectionSource::FallbackCache { .. }
        ));
        assert_eq!(view.posts, posts);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn offline_refresh_never_touches_the_network() {
        let signal = ConnectivitySignal::new(false);
        let (mut coordinator, api) = build(&signal);

        let err = coordinator.refresh().await.unwrap_err();
        assert!(matches!(err, SyncError::NoCachedData));
        assert_eq!(api.list_calls(), 0);
    }

    #[tokio::test]
    async fn offline_refresh_returns_cached_collection_unmodified() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let posts = vec![post("a", "x", "1"), post("b", "y", "2")];
        api.push_list(Ok(posts.clone()));
        coordinator.refresh().await.unwrap();

        signal.set_online(false);
        let view = coordinator.refresh().await.unwrap();
        assert_eq!(view.posts, posts);
        assert!(matches!(
            view.source,
            CollectionSource::FallbackCache { .. }
        ));
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn failed_online_refresh_falls_back_to_cache() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let posts = vec![post("cached", "x", "1")];
        api.push_list(Ok(posts.clone()));
        coordinator.refresh().await.unwrap();

        api.push_list(Err(transport_error()));
        let view = coordinator.refresh().await.unwrap();
        assert_eq!(view.posts, posts);
        assert!(matches!(
            view.source,
            CollectionSource::FallbackCache { .. }
        ));
    }

    #[tokio::test]
    async fn failed_online_refresh_with_empty_cache_reports_no_data() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        api.push_list(Err(transport_error()));

        let err = coordinator.refresh().await.unwrap_err();
        assert!(matches!(err, SyncError::NoCachedData));
    }

    #[tokio::test]
    async fn successful_refresh_overwrites_previous_snapshot() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        api.push_list(Ok(vec![post("old", "x", "1")]));
        coordinator.refresh().await.unwrap();

        let newer = vec![post("new", "y", "2"), post("newer", "z", "3")];
        api.push_list(Ok(newer.clone()));
        coordinator.refresh().await.unwrap();

        signal.set_online(false);
        let view = coordinator.refresh().await.unwrap();
        assert_eq!(view.posts, newer);
    }

    #[tokio::test]
    async fn create_then_refresh_puts_the_new_post_first() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let existing = post("existing", "x", "1");
        api.push_list(Ok(vec![existing.clone()]));
        coordinator.refresh().await.unwrap();

        let created = post("fresh", "y", "2");
        api.push_create(Ok(created.clone()));
        let returned = coordinator
            .create(PostInput::new("fresh", "y", "2"))
            .await
            .unwrap();
        assert_eq!(returned, created);

        api.push_list(Ok(vec![created.clone(), existing.clone()]));
        let view = coordinator.refresh().await.unwrap();
        assert_eq!(view.posts[0], created);
    }

    #[tokio::test]
    async fn create_prepends_and_overwrites_the_cache() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let existing = post("existing", "x", "1");
        api.push_list(Ok(vec![existing.clone()]));
        coordinator.refresh().await.unwrap();

        let created = post("fresh", "y", "2");
        api.push_create(Ok(created.clone()));
        coordinator
            .create(PostInput::new("fresh", "y", "2"))
            .await
            .unwrap();

        assert_eq!(coordinator.collection(), [created.clone(), existing]);

        // The cache was overwritten with the prepended collection.
        signal.set_online(false);
        let view = coordinator.refresh().await.unwrap();
        assert_eq!(view.posts[0], created);
        assert_eq!(view.posts.len(), 2);
    }

    #[tokio::test]
    async fn offline_create_is_rejected_without_side_effects() {
        let signal = ConnectivitySignal::new(false);
        let (mut coordinator, api) = build(&signal);

        let err = coordinator
            .create(PostInput::new("t", "a", "c"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Offline));
        assert_eq!(api.create_calls(), 0);
        assert!(coordinator.collection().is_empty());
        assert!(coordinator.cache.load().is_none());
    }

    #[tokio::test]
    async fn failed_create_leaves_view_and_cache_unchanged() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let existing = post("existing", "x", "1");
        api.push_list(Ok(vec![existing.clone()]));
        coordinator.refresh().await.unwrap();

        api.push_create(Err(ClientError::RequestFailed {
            operation: "create",
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }));
        let err = coordinator
            .create(PostInput::new("t", "a", "c"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));

        assert_eq!(coordinator.collection(), [existing.clone()]);
        assert_eq!(coordinator.cache.load().unwrap().posts, vec![existing]);
    }

    #[tokio::test]
    async fn blank_draft_is_rejected_before_any_network_call() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);

        let err = coordinator
            .create(PostInput::new("  ", "a", ""))
            .await
            .unwrap_err();
        let SyncError::InvalidDraft(message) = err else {
            panic!("expected invalid draft");
        };
        assert!(message.contains("title"));
        assert!(message.contains("content"));
        assert_eq!(api.create_calls(), 0);
    }

    #[tokio::test]
    async fn search_matches_any_field_case_insensitively() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let by_title = post("Go", "X", "y");
        let by_author = post("z", "GoFan", "w");
        api.push_list(Ok(vec![by_title.clone(), by_author.clone()]));
        coordinator.refresh().await.unwrap();

        let hits = coordinator.search("go");
        assert_eq!(hits, vec![by_title, by_author]);
    }

    #[tokio::test]
    async fn blank_search_returns_the_full_collection_in_order() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let posts = vec![post("a", "x", "1"), post("b", "y", "2")];
        api.push_list(Ok(posts.clone()));
        coordinator.refresh().await.unwrap();

        assert_eq!(coordinator.search(""), posts);
        assert_eq!(coordinator.search("   "), posts);
        assert_eq!(api.list_calls(), 1);
    }

    #[tokio::test]
    async fn search_by_content_matches_too() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        let hit = post("title", "author", "needle inside");
        api.push_list(Ok(vec![hit.clone(), post("other", "one", "nothing")]));
        coordinator.refresh().await.unwrap();

        assert_eq!(coordinator.search("NEEDLE"), vec![hit]);
    }

    #[tokio::test]
    async fn invalidate_clears_the_snapshot() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        api.push_list(Ok(vec![post("a", "x", "1")]));
        coordinator.refresh().await.unwrap();

        coordinator.invalidate();
        coordinator.invalidate();

        signal.set_online(false);
        let err = coordinator.refresh().await.unwrap_err();
        assert!(matches!(err, SyncError::NoCachedData));
    }

    #[tokio::test]
    async fn refresh_result_is_discarded_when_connectivity_flips_mid_flight() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        api.push_list(Ok(vec![post("a", "x", "1")]));
        api.flip_offline_during_next_call(&signal);

        let err = coordinator.refresh().await.unwrap_err();
        assert!(matches!(err, SyncError::Superseded));
        assert!(coordinator.collection().is_empty());
        assert!(coordinator.cache.load().is_none());
    }

    #[tokio::test]
    async fn create_result_is_discarded_when_connectivity_flips_mid_flight() {
        let signal = ConnectivitySignal::new(true);
        let (mut coordinator, api) = build(&signal);
        api.push_create(Ok(post("fresh", "y", "2")));
        api.flip_offline_during_next_call(&signal);

        let err = coordinator
            .create(PostInput::new("fresh", "y", "2"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Superseded));
        assert!(coordinator.collection().is_empty());
        assert!(coordinator.cache.load().is_none());
    }
}
