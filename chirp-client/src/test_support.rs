//! Фейки для тестов view-моделей и кэша.

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};

use crate::models::{FeedItem, Post, User};
use crate::view::session::Session;

pub(crate) fn feed_item(id: &str, user_id: &str, username: &str, content: &str) -> FeedItem {
    FeedItem {
        post: Post {
            id: id.to_string(),
            content: content.to_string(),
            author_id: user_id.to_string(),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
        },
        author: User {
            id: user_id.to_string(),
            username: Some(username.to_string()),
            profile_image_url: format!("https://img.example.com/{username}.png"),
            first_name: None,
            last_name: None,
            email: Some(format!("{username}@example.com")),
        },
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeSession {
    signed_in: bool,
    fail: bool,
    sign_out_calls: AtomicUsize,
}

impl FakeSession {
    pub(crate) fn signed_in() -> Self {
        Self {
            signed_in: true,
            ..Self::default()
        }
    }

    pub(crate) fn signed_out() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            signed_in: true,
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

impl Session for FakeSession {
    type Error = String;

    fn is_signed_in(&self) -> bool {
        self.signed_in
    }

    fn sign_out(&self) -> Result<(), Self::Error> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err("provider unavailable".to_string());
        }
        Ok(())
    }
}

#[cfg(feature = "transport")]
pub(crate) use api::FakeApi;

#[cfg(feature = "transport")]
mod api {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::feed_item;
    use crate::api::ChirpApi;
    use crate::error::{ChirpClientError, ChirpClientResult};
    use crate::models::{FeedItem, User};

    /// Сервер в памяти: лента, счётчики вызовов, подменяемая ошибка создания.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        feed: Mutex<Vec<FeedItem>>,
        get_all_calls: AtomicUsize,
        created: Mutex<Vec<String>>,
        next_create_error: Mutex<Option<ChirpClientError>>,
        requested_usernames: Mutex<Vec<String>>,
    }

    impl FakeApi {
        pub(crate) fn with_feed(feed: Vec<FeedItem>) -> Self {
            Self {
                feed: Mutex::new(feed),
                ..Self::default()
            }
        }

        pub(crate) fn push_post(&self, item: FeedItem) {
            self.feed.lock().expect("feed mutex poisoned").insert(0, item);
        }

        pub(crate) fn fail_next_create(&self, err: ChirpClientError) {
            *self
                .next_create_error
                .lock()
                .expect("next_create_error mutex poisoned") = Some(err);
        }

        pub(crate) fn get_all_calls(&self) -> usize {
            self.get_all_calls.load(Ordering::SeqCst)
        }

        pub(crate) fn created_contents(&self) -> Vec<String> {
            self.created.lock().expect("created mutex poisoned").clone()
        }

        pub(crate) fn requested_usernames(&self) -> Vec<String> {
            self.requested_usernames
                .lock()
                .expect("requested_usernames mutex poisoned")
                .clone()
        }
    }

    #[async_trait]
    impl ChirpApi for FakeApi {
        async fn get_all(&self) -> ChirpClientResult<Vec<FeedItem>> {
            self.get_all_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.feed.lock().expect("feed mutex poisoned").clone())
        }

        async fn get_post(&self, id: &str) -> ChirpClientResult<FeedItem> {
            self.feed
                .lock()
                .expect("feed mutex poisoned")
                .iter()
                .find(|item| item.post.id == id)
                .cloned()
                .ok_or(ChirpClientError::NotFound)
        }

        async fn get_posts_by_user(&self, user_id: &str) -> ChirpClientResult<Vec<FeedItem>> {
            Ok(self
                .feed
                .lock()
                .expect("feed mutex poisoned")
                .iter()
                .filter(|item| item.author.id == user_id)
                .cloned()
                .collect())
        }

        async fn get_user_by_username(&self, username: &str) -> ChirpClientResult<User> {
            let username = username.to_string();
            self.requested_usernames
                .lock()
                .expect("requested_usernames mutex poisoned")
                .push(username.clone());
            self.feed
                .lock()
                .expect("feed mutex poisoned")
                .iter()
                .map(|item| &item.author)
                .find(|author| author.username.as_deref() == Some(username.as_str()))
                .cloned()
                .ok_or(ChirpClientError::NotFound)
        }

        async fn create_post(&self, content: &str) -> ChirpClientResult<FeedItem> {
            self.created
                .lock()
                .expect("created mutex poisoned")
                .push(content.to_string());
            if let Some(err) = self
                .next_create_error
                .lock()
                .expect("next_create_error mutex poisoned")
                .take()
            {
                return Err(err);
            }

            let id = format!("new-{}", self.created_contents().len());
            let item = feed_item(&id, "user_1", "alice", content);
            self.push_post(item.clone());
            Ok(item)
        }
    }
}
