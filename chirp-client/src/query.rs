//! Кэш запросов на стороне клиента.
//!
//! Каждая очередь запросов (глобальная лента, пост, лента автора, профиль)
//! хранится в своём `moka::future::Cache`. Параллельные чтения одного ключа
//! склеиваются в один удалённый вызов; ошибки не кэшируются.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::api::ChirpApi;
use crate::error::ChirpClientError;
use crate::models::{FeedItem, User};

/// Результат чтения через кэш. Ошибка общая для всех ожидающих этот ключ.
pub type QueryResult<T> = Result<T, Arc<ChirpClientError>>;

/// Лента вместе с поколением, в котором начался её запрос.
type StampedFeed = (u64, Arc<Vec<FeedItem>>);

#[derive(Clone)]
/// Внедряемый кэш запросов. Клонирование дёшево и разделяет содержимое.
pub struct QueryCache {
    feed: Cache<(), StampedFeed>,
    /// Растёт при каждой инвалидации ленты. Запрос, начатый до инвалидации,
    /// не может вернуть свой снимок после неё.
    feed_generation: Arc<AtomicU64>,
    posts: Cache<String, FeedItem>,
    user_feeds: Cache<String, Arc<Vec<FeedItem>>>,
    profiles: Cache<String, User>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY, Self::DEFAULT_TTL)
    }
}

impl QueryCache {
    const DEFAULT_CAPACITY: u64 = 256;
    const DEFAULT_TTL: Duration = Duration::from_secs(60);

    /// Создаёт кэш с ограничением по числу записей и времени жизни записи.
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        fn build<K, V>(max_capacity: u64, ttl: Duration) -> Cache<K, V>
        where
            K: std::hash::Hash + Eq + Send + Sync + 'static,
            V: Clone + Send + Sync + 'static,
        {
            Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build()
        }

        Self {
            feed: build(max_capacity, ttl),
            feed_generation: Arc::new(AtomicU64::new(0)),
            posts: build(max_capacity, ttl),
            user_feeds: build(max_capacity, ttl),
            profiles: build(max_capacity, ttl),
        }
    }

    /// Глобальная лента.
    ///
    /// `invalidate` в moka не отменяет запрос, который уже в полёте, и его
    /// снимок лёг бы в кэш после инвалидации. Поэтому каждая лента помечена
    /// поколением, в котором стартовал её запрос, а устаревшая
    /// перезапрашивается.
    pub async fn feed(&self, api: &dyn ChirpApi) -> QueryResult<Arc<Vec<FeedItem>>> {
        loop {
            let (fetched_in, feed) = self
                .feed
                .try_get_with((), async {
                    let generation = self.feed_generation.load(Ordering::SeqCst);
                    debug!(generation, "fetching global feed");
                    api.get_all().await.map(|items| (generation, Arc::new(items)))
                })
                .await?;

            if fetched_in == self.feed_generation.load(Ordering::SeqCst) {
                return Ok(feed);
            }
            debug!(fetched_in, "feed fetched before invalidation, refetching");
            self.feed.invalidate(&()).await;
        }
    }

    /// Один пост по id.
    pub async fn post(&self, api: &dyn ChirpApi, id: &str) -> QueryResult<FeedItem> {
        self.posts
            .try_get_with(id.to_string(), async {
                debug!(post_id = id, "fetching post");
                api.get_post(id).await
            })
            .await
    }

    /// Лента одного автора.
    pub async fn user_feed(
        &self,
        api: &dyn ChirpApi,
        user_id: &str,
    ) -> QueryResult<Arc<Vec<FeedItem>>> {
        self.user_feeds
            .try_get_with(user_id.to_string(), async {
                debug!(user_id, "fetching user feed");
                api.get_posts_by_user(user_id).await.map(Arc::new)
            })
            .await
    }

    /// Профиль по handle, уже разобранному маршрутом. Handle не меняется.
    pub async fn profile(&self, api: &dyn ChirpApi, handle: &str) -> QueryResult<User> {
        self.profiles
            .try_get_with(handle.to_string(), async {
                debug!(handle, "fetching profile");
                api.get_user_by_username(handle).await
            })
            .await
    }

    /// Помечает глобальную ленту устаревшей: следующее чтение пойдёт на сервер.
    pub async fn invalidate_feed(&self) {
        let generation = self.feed_generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "global feed invalidated");
        self.feed.invalidate(&()).await;
    }

    /// Сбрасывает все запросы, например при смене сессии.
    pub fn invalidate_all(&self) {
        self.feed_generation.fetch_add(1, Ordering::SeqCst);
        self.feed.invalidate_all();
        self.posts.invalidate_all();
        self.user_feeds.invalidate_all();
        self.profiles.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::QueryCache;
    use crate::api::ChirpApi;
    use crate::error::{ChirpClientError, ChirpClientResult};
    use crate::models::{FeedItem, User};
    use crate::test_support::{FakeApi, FakeSession, feed_item};
    use crate::view::composer::PostComposer;

    /// Первый `get_all` снимает ленту и ждёт `release`, как медленный ответ сервера.
    #[derive(Default)]
    struct HeldFeedApi {
        inner: FakeApi,
        hold_first: AtomicBool,
        started: Notify,
        release: Notify,
    }

    impl HeldFeedApi {
        fn new(inner: FakeApi) -> Self {
            Self {
                inner,
                hold_first: AtomicBool::new(true),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ChirpApi for HeldFeedApi {
        async fn get_all(&self) -> ChirpClientResult<Vec<FeedItem>> {
            let snapshot = self.inner.get_all().await;
            if self.hold_first.swap(false, Ordering::SeqCst) {
                self.started.notify_one();
                self.release.notified().await;
            }
            snapshot
        }

        async fn get_post(&self, id: &str) -> ChirpClientResult<FeedItem> {
            self.inner.get_post(id).await
        }

        async fn get_posts_by_user(&self, user_id: &str) -> ChirpClientResult<Vec<FeedItem>> {
            self.inner.get_posts_by_user(user_id).await
        }

        async fn get_user_by_username(&self, username: &str) -> ChirpClientResult<User> {
            self.inner.get_user_by_username(username).await
        }

        async fn create_post(&self, content: &str) -> ChirpClientResult<FeedItem> {
            self.inner.create_post(content).await
        }
    }

    #[tokio::test]
    async fn feed_is_served_from_cache_until_invalidated() {
        let api = FakeApi::with_feed(vec![feed_item("p1", "user_1", "alice", "hello")]);
        let cache = QueryCache::default();

        let first = cache.feed(&api).await.expect("feed must load");
        let second = cache.feed(&api).await.expect("feed must load");
        assert_eq!(first, second);
        assert_eq!(api.get_all_calls(), 1);

        cache.invalidate_feed().await;
        cache.feed(&api).await.expect("feed must load");
        assert_eq!(api.get_all_calls(), 2);
    }

    #[tokio::test]
    async fn fetch_in_flight_during_invalidation_is_not_served_afterwards() {
        let api = Arc::new(HeldFeedApi::new(FakeApi::with_feed(vec![feed_item(
            "p1", "user_2", "bob", "older",
        )])));
        let cache = QueryCache::default();

        let in_flight = tokio::spawn({
            let api = Arc::clone(&api);
            let cache = cache.clone();
            async move { cache.feed(api.as_ref()).await.map(|feed| feed.len()) }
        });
        api.started.notified().await;

        let mut composer =
            PostComposer::for_session(&FakeSession::signed_in()).expect("signed in");
        composer.set_input("hello");
        let outcome = composer.submit(api.as_ref(), &cache).await;
        assert!(matches!(
            outcome,
            Some(crate::view::composer::MutationResult::Success(_))
        ));

        api.release.notify_one();
        in_flight
            .await
            .expect("feed task must not panic")
            .expect("feed must load");

        let feed = cache.feed(api.as_ref()).await.expect("feed must load");
        let hello_count = feed
            .iter()
            .filter(|item| item.post.content == "hello")
            .count();
        assert_eq!(hello_count, 1);
        assert_eq!(feed.len(), 2);
    }

    #[tokio::test]
    async fn concurrent_reads_share_one_fetch() {
        let api = FakeApi::with_feed(vec![feed_item("p1", "user_1", "alice", "hello")]);
        let cache = QueryCache::default();

        let (a, b) = tokio::join!(cache.feed(&api), cache.feed(&api));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(api.get_all_calls(), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let api = FakeApi::default();
        let cache = QueryCache::default();

        let err = cache
            .post(&api, "missing")
            .await
            .expect_err("unknown post must fail");
        assert!(matches!(err.as_ref(), ChirpClientError::NotFound));

        api.push_post(feed_item("missing", "user_1", "alice", "late"));
        let item = cache.post(&api, "missing").await.expect("post must load");
        assert_eq!(item.post.content, "late");
    }

    #[tokio::test]
    async fn profile_handle_is_passed_through_unchanged() {
        let api = FakeApi::with_feed(vec![feed_item("p1", "user_1", "alice", "hello")]);
        let cache = QueryCache::default();

        cache.profile(&api, "alice").await.expect("profile must load");
        cache.profile(&api, "alice").await.expect("profile must be cached");
        let err = cache
            .profile(&api, "@alice")
            .await
            .expect_err("handle with @ left is a different user");
        assert!(matches!(err.as_ref(), ChirpClientError::NotFound));

        assert_eq!(
            api.requested_usernames(),
            vec!["alice".to_string(), "@alice".to_string()]
        );
    }

    #[tokio::test]
    async fn invalidate_all_drops_every_query() {
        let api = Arc::new(FakeApi::with_feed(vec![feed_item(
            "p1", "user_1", "alice", "hello",
        )]));
        let cache = QueryCache::default();

        cache.feed(api.as_ref()).await.expect("feed must load");
        cache.invalidate_all();
        cache.feed(api.as_ref()).await.expect("feed must load");

        assert_eq!(api.get_all_calls(), 2);
    }
}
