use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::data::identity_provider::IdentityProvider;
use crate::data::post_repository::{NewPost, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{CreatePostRequest, FeedItem, Post};
use crate::domain::user::ProjectedUser;

pub(crate) const FEED_LIMIT: u32 = 100;

pub(crate) struct FeedService {
    posts: Arc<dyn PostRepository>,
    identity: Arc<dyn IdentityProvider>,
}

impl FeedService {
    pub(crate) fn new(posts: Arc<dyn PostRepository>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { posts, identity }
    }

    pub(crate) async fn get_all(&self) -> Result<Vec<FeedItem>, DomainError> {
        let posts = self.posts.list_recent(FEED_LIMIT).await?;
        self.attach_authors(posts).await
    }

    pub(crate) async fn get_by_id(&self, id: &str) -> Result<FeedItem, DomainError> {
        let not_found = || DomainError::NotFound(format!("post id: {id}"));
        let post_id = Uuid::parse_str(id.trim()).map_err(|_| not_found())?;

        let post = self.posts.get_post(post_id).await?.ok_or_else(not_found)?;

        self.attach_authors(vec![post])
            .await?
            .pop()
            .ok_or_else(not_found)
    }

    pub(crate) async fn get_by_user_id(&self, user_id: &str) -> Result<Vec<FeedItem>, DomainError> {
        let posts = self.posts.list_by_author(user_id, FEED_LIMIT).await?;
        self.attach_authors(posts).await
    }

    pub(crate) async fn create(
        &self,
        author_id: &str,
        req: CreatePostRequest,
    ) -> Result<FeedItem, DomainError> {
        let req = req.validate()?;

        let new_post = NewPost {
            id: Uuid::new_v4(),
            content: req.content,
            author_id: author_id.to_string(),
        };
        let post = self.posts.create_post(new_post).await?;
        info!(post_id = %post.id, author_id = %post.author_id, "post created");

        self.attach_authors(vec![post])
            .await?
            .pop()
            .ok_or_else(|| DomainError::Unexpected("created post vanished".to_string()))
    }

    /// Склеивает посты с авторами. Порядок постов сохраняется.
    async fn attach_authors(&self, posts: Vec<Post>) -> Result<Vec<FeedItem>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: Vec<String> = posts
            .iter()
            .map(|post| post.author_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let authors: HashMap<String, ProjectedUser> = self
            .identity
            .get_users(&author_ids)
            .await?
            .iter()
            .map(|record| (record.id.clone(), ProjectedUser::from(record)))
            .collect();

        posts
            .into_iter()
            .map(|post| {
                let Some(author) = authors.get(&post.author_id) else {
                    error!(post_id = %post.id, author_id = %post.author_id, "author for post not found");
                    return Err(DomainError::Unexpected(format!(
                        "author for post not found: {}",
                        post.id
                    )));
                };
                Ok(FeedItem {
                    author: author.clone(),
                    post,
                })
            })
            .collect()
    }
}
