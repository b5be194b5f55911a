use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::DomainError;
use super::user::ProjectedUser;

pub(crate) const MAX_CONTENT_CHARS: usize = 280;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: Uuid,
    pub(crate) content: String,
    pub(crate) author_id: String,
    pub(crate) created_at: DateTime<Utc>,
}

/// Пост вместе с автором, прошедшим проекцию для клиента.
#[derive(Debug, Clone)]
pub(crate) struct FeedItem {
    pub(crate) post: Post,
    pub(crate) author: ProjectedUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreatePostRequest {
    pub(crate) content: String,
}

impl CreatePostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            content: normalize_content(&self.content)?,
        })
    }
}

impl Post {
    pub(crate) fn new(
        id: Uuid,
        content: impl Into<String>,
        author_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let author_id = author_id.into();
        if author_id.trim().is_empty() {
            return Err(DomainError::Validation {
                field: "author_id",
                message: "must not be empty",
            });
        }
        let content = normalize_content(&content.into())?;

        Ok(Self {
            id,
            content,
            author_id,
            created_at,
        })
    }
}

fn normalize_content(content: &str) -> Result<String, DomainError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(DomainError::Validation {
            field: "content",
            message: "must not be empty",
        });
    }
    if content.chars().count() > MAX_CONTENT_CHARS {
        return Err(DomainError::Validation {
            field: "content",
            message: "must be at most 280 characters",
        });
    }
    Ok(content.to_string())
}
