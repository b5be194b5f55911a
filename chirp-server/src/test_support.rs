//! Фейки для тестов сервисов и HTTP-слоя.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::data::identity_provider::IdentityProvider;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::user::{EmailAddress, IdentityRecord};

#[derive(Clone, Default)]
pub(crate) struct FakePostRepo {
    pub(crate) posts: Arc<Mutex<Vec<Post>>>,
    pub(crate) created_input: Arc<Mutex<Option<NewPost>>>,
    pub(crate) list_limit: Arc<Mutex<Option<u32>>>,
}

impl FakePostRepo {
    pub(crate) fn with_posts(posts: Vec<Post>) -> Self {
        let repo = Self::default();
        *repo.posts.lock().expect("posts mutex poisoned") = posts;
        repo
    }
}

#[async_trait]
impl PostRepository for FakePostRepo {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        *self
            .created_input
            .lock()
            .expect("created_input mutex poisoned") = Some(input.clone());
        let post = Post::new(input.id, input.content, input.author_id, Utc::now())?;
        self.posts
            .lock()
            .expect("posts mutex poisoned")
            .insert(0, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self
            .posts
            .lock()
            .expect("posts mutex poisoned")
            .iter()
            .find(|post| post.id == id)
            .cloned())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Post>, DomainError> {
        *self.list_limit.lock().expect("list_limit mutex poisoned") = Some(limit);
        Ok(self.posts.lock().expect("posts mutex poisoned").clone())
    }

    async fn list_by_author(&self, author_id: &str, _limit: u32) -> Result<Vec<Post>, DomainError> {
        Ok(self
            .posts
            .lock()
            .expect("posts mutex poisoned")
            .iter()
            .filter(|post| post.author_id == author_id)
            .cloned()
            .collect())
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeIdentity {
    pub(crate) users: Vec<IdentityRecord>,
    pub(crate) requested_ids: Arc<Mutex<Vec<String>>>,
    pub(crate) requested_usernames: Arc<Mutex<Vec<String>>>,
}

impl FakeIdentity {
    pub(crate) fn with_users(users: Vec<IdentityRecord>) -> Self {
        Self {
            users,
            ..Self::default()
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn get_users(&self, ids: &[String]) -> Result<Vec<IdentityRecord>, DomainError> {
        *self
            .requested_ids
            .lock()
            .expect("requested_ids mutex poisoned") = ids.to_vec();
        Ok(self
            .users
            .iter()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<IdentityRecord>, DomainError> {
        self.requested_usernames
            .lock()
            .expect("requested_usernames mutex poisoned")
            .push(username.to_string());
        Ok(self
            .users
            .iter()
            .find(|user| user.username.as_deref() == Some(username))
            .cloned())
    }
}

pub(crate) fn sample_post(author_id: &str, content: &str, created_at: DateTime<Utc>) -> Post {
    Post::new(Uuid::new_v4(), content, author_id, created_at).expect("sample post must be valid")
}

pub(crate) fn identity_record(id: &str, username: &str) -> IdentityRecord {
    IdentityRecord {
        id: id.to_string(),
        username: Some(username.to_string()),
        profile_image_url: format!("https://img.example.com/{username}.png"),
        first_name: None,
        last_name: None,
        primary_email_address_id: Some(format!("idn_{id}")),
        email_addresses: vec![EmailAddress {
            id: format!("idn_{id}"),
            email_address: format!("{username}@example.com"),
        }],
    }
}
