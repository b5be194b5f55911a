use chirp_client::view::profile_slug;
use chirp_client::{ApiErrorBody, ChirpClientError, CreatePostPayload, FeedItem, User};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8080",
};

fn endpoint(segments: &[&str]) -> String {
    let path = segments
        .iter()
        .map(|segment| String::from(js_sys::encode_uri_component(segment)))
        .collect::<Vec<_>>()
        .join("/");
    format!("{}/{}", API_BASE_URL.trim_end_matches('/'), path)
}

fn network_error(err: gloo_net::Error) -> ChirpClientError {
    ChirpClientError::InvalidRequest(format!("network error: {err}"))
}

async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ChirpClientError> {
    if !response.ok() {
        let status = response.status();
        let body = response.json::<ApiErrorBody>().await.ok();
        return Err(ChirpClientError::from_http_status(status, body));
    }

    response
        .json::<T>()
        .await
        .map_err(|err| ChirpClientError::InvalidRequest(format!("decode error: {err}")))
}

async fn get_json<T: DeserializeOwned>(segments: &[&str]) -> Result<T, ChirpClientError> {
    let response = Request::get(&endpoint(segments))
        .send()
        .await
        .map_err(network_error)?;
    parse_response(response).await
}

pub(crate) async fn get_all() -> Result<Vec<FeedItem>, ChirpClientError> {
    get_json(&["api", "posts"]).await
}

pub(crate) async fn get_post(id: &str) -> Result<FeedItem, ChirpClientError> {
    get_json(&["api", "posts", id]).await
}

pub(crate) async fn get_posts_by_user(user_id: &str) -> Result<Vec<FeedItem>, ChirpClientError> {
    get_json(&["api", "users", user_id, "posts"]).await
}

/// Профиль адресуется slug'ом `@handle`: сервер снимает ровно один `@`.
pub(crate) async fn get_user_by_username(username: &str) -> Result<User, ChirpClientError> {
    let slug = profile_slug(username);
    get_json(&["api", "profiles", &slug]).await
}

pub(crate) async fn create_post(token: &str, content: &str) -> Result<FeedItem, ChirpClientError> {
    let response = Request::post(&endpoint(&["api", "posts"]))
        .header("Authorization", &format!("Bearer {token}"))
        .json(&CreatePostPayload { content })
        .map_err(network_error)?
        .send()
        .await
        .map_err(network_error)?;

    parse_response(response).await
}
