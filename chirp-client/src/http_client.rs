use reqwest::{Client, Method, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{ChirpClientError, ChirpClientResult};
use crate::models::{ApiErrorBody, CreatePostPayload, FeedItem, User};
use crate::view::route::profile_slug;

#[derive(Debug, Clone)]
/// HTTP-клиент для работы с REST API `chirp-server`.
pub(crate) struct HttpClient {
    base_url: Url,
    client: Client,
}

impl HttpClient {
    /// Создаёт новый HTTP-клиент с базовым URL сервера.
    pub(crate) fn new(base_url: &str) -> ChirpClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ChirpClientError::InvalidRequest(format!("invalid server url: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ChirpClientError::InvalidRequest(format!(
                "invalid server url: {base_url}"
            )));
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Сегменты кодируются по отдельности, так что `/` в id не меняет маршрут.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn decode_error(response: reqwest::Response) -> ChirpClientError {
        let status = response.status();
        let body = response.json::<ApiErrorBody>().await.ok();
        ChirpClientError::from_http_status(status.as_u16(), body)
    }

    async fn send<TRes>(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<&str>,
    ) -> ChirpClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(ChirpClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(ChirpClientError::from_reqwest)
    }

    async fn get_json<TRes>(&self, segments: &[&str]) -> ChirpClientResult<TRes>
    where
        TRes: DeserializeOwned,
    {
        let request = self.client.get(self.endpoint(segments));
        self.send(request, None).await
    }

    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        segments: &[&str],
        body: &TReq,
        token: Option<&str>,
    ) -> ChirpClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let request = self
            .client
            .request(method, self.endpoint(segments))
            .json(body);
        self.send(request, token).await
    }

    pub(crate) async fn list_posts(&self) -> ChirpClientResult<Vec<FeedItem>> {
        self.get_json(&["api", "posts"]).await
    }

    pub(crate) async fn get_post(&self, id: &str) -> ChirpClientResult<FeedItem> {
        self.get_json(&["api", "posts", id]).await
    }

    pub(crate) async fn list_user_posts(&self, user_id: &str) -> ChirpClientResult<Vec<FeedItem>> {
        self.get_json(&["api", "users", user_id, "posts"]).await
    }

    /// Профиль адресуется slug'ом `@handle`: сервер снимает ровно один `@`.
    pub(crate) async fn get_profile(&self, username: &str) -> ChirpClientResult<User> {
        let slug = profile_slug(username);
        self.get_json(&["api", "profiles", &slug]).await
    }

    pub(crate) async fn create_post(&self, token: &str, content: &str) -> ChirpClientResult<FeedItem> {
        let payload = CreatePostPayload { content };
        self.send_json(Method::POST, &["api", "posts"], &payload, Some(token))
            .await
    }
}
