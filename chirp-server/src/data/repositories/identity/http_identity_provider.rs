use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::data::identity_provider::IdentityProvider;
use crate::domain::error::DomainError;
use crate::domain::user::IdentityRecord;

const MAX_USERS_PER_REQUEST: usize = 100;

/// Клиент REST API identity provider'а (`GET /users`), авторизация по secret key.
#[derive(Debug, Clone)]
pub(crate) struct HttpIdentityProvider {
    base_url: String,
    secret_key: String,
    client: Client,
}

impl HttpIdentityProvider {
    pub(crate) fn new(
        base_url: impl Into<String>,
        secret_key: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .context("failed to build identity provider http client")?;

        Ok(Self {
            base_url: base_url.into(),
            secret_key: secret_key.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn fetch_users(
        &self,
        query: &[(&str, &str)],
    ) -> Result<Vec<IdentityRecord>, DomainError> {
        let response = self
            .client
            .get(self.endpoint("/users"))
            .bearer_auth(&self.secret_key)
            .query(query)
            .send()
            .await
            .map_err(|err| DomainError::IdentityProvider(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "identity provider rejected users request");
            return Err(DomainError::IdentityProvider(format!(
                "users request failed with status {status}"
            )));
        }

        response
            .json::<Vec<IdentityRecord>>()
            .await
            .map_err(|err| DomainError::IdentityProvider(err.to_string()))
    }
}

fn users_by_id_query(ids: &[String]) -> Vec<(&'static str, &str)> {
    let mut query = Vec::with_capacity(ids.len() + 1);
    query.push(("limit", "100"));
    query.extend(ids.iter().map(|id| ("user_id", id.as_str())));
    query
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn get_users(&self, ids: &[String]) -> Result<Vec<IdentityRecord>, DomainError> {
        let mut users = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_USERS_PER_REQUEST) {
            let query = users_by_id_query(chunk);
            users.extend(self.fetch_users(&query).await?);
        }
        debug!(requested = ids.len(), found = users.len(), "resolved users");
        Ok(users)
    }

    async fn get_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<IdentityRecord>, DomainError> {
        let users = self.fetch_users(&[("username", username)]).await?;
        Ok(select_by_username(users, username))
    }
}

/// Точное совпадение, иначе первый результат: фильтр провайдера может
/// сравнивать без учёта регистра.
fn select_by_username(users: Vec<IdentityRecord>, username: &str) -> Option<IdentityRecord> {
    let exact = users
        .iter()
        .position(|user| user.username.as_deref() == Some(username))
        .unwrap_or(0);
    users.into_iter().nth(exact)
}
