use chirp_client::view::{PageState, Route};
use chirp_client::{
    ChirpApi, ChirpClient, ChirpClientError, MutationResult, PostComposer, QueryCache, Session,
};

struct TokenSession;

impl Session for TokenSession {
    type Error = std::convert::Infallible;

    fn is_signed_in(&self) -> bool {
        true
    }

    fn sign_out(&self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[tokio::test]
#[ignore = "requires running chirp-server, database and a valid CHIRP_SESSION_TOKEN"]
async fn http_smoke_flow() {
    let base_url =
        std::env::var("CHIRP_HTTP_URL").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());
    let token = std::env::var("CHIRP_SESSION_TOKEN").expect("CHIRP_SESSION_TOKEN must be set");

    let mut client = ChirpClient::new(&base_url).expect("client must build");
    let cache = QueryCache::default();

    cache.feed(&client).await.expect("feed must load");

    let anonymous = client.create_post("anonymous").await;
    assert!(matches!(anonymous, Err(ChirpClientError::Unauthorized)));

    client.set_token(token);
    let mut composer = PostComposer::for_session(&TokenSession).expect("session is signed in");
    composer.set_input("smoke 🐦");
    let outcome = composer.submit(&client, &cache).await;

    let created = match outcome {
        Some(MutationResult::Success(created)) => created,
        other => panic!("create must succeed, got {other:?}"),
    };
    assert_eq!(composer.input(), "");

    let after = cache.feed(&client).await.expect("feed must reload");
    assert!(after.len() <= 100);
    let matching = after
        .iter()
        .filter(|item| item.post.id == created.post.id)
        .count();
    assert_eq!(matching, 1);

    let single = cache
        .post(&client, &created.post.id)
        .await
        .expect("created post must be readable");
    assert_eq!(single.post.content, "smoke 🐦");

    let route = Route::parse(&format!("/post/{}", created.post.id)).expect("route must parse");
    assert_eq!(
        route,
        Route::Post {
            id: created.post.id.clone()
        }
    );

    let missing = PageState::from_result(cache.profile(&client, "no_such_user_for_smoke").await);
    assert_eq!(missing, PageState::NotFound);
}
