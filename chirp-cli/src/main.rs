use std::io::{self, BufRead, Write};
use std::process;

use anyhow::{Context, Result, anyhow};
use chirp_client::view::{
    FeedItemView, PageState, Route, SignOutDialog, profile_title, single_post_title,
};
use chirp_client::{
    ChirpClient, ChirpClientError, FeedItem, MutationResult, PostComposer, QueryCache,
};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod session;

use session::TokenFileSession;

const TOKEN_FILE: &str = ".chirp_token";
const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "chirp-cli", version, about = "CLI клиент для chirp-server")]
struct Cli {
    /// Адрес сервера. По умолчанию `CHIRP_SERVER` или `http://127.0.0.1:8080`.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Глобальная лента.
    Feed,
    /// Один пост по id.
    Post { id: String },
    /// Профиль и посты пользователя; `@alice` и `alice` равнозначны.
    Profile { handle: String },
    /// Страница по пути фронтенда: `/`, `/@alice`, `/post/ID`.
    Open { path: String },
    /// Создание поста (требует вход).
    Create { content: String },
    /// Сохраняет сессионный токен identity provider'а.
    SignIn { token: String },
    /// Выход с подтверждением.
    SignOut {
        /// Не спрашивать подтверждение.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .try_init();
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let session = TokenFileSession::new(TOKEN_FILE);
    let server = resolve_server(cli.server, std::env::var("CHIRP_SERVER").ok());
    let mut client = ChirpClient::new(&server).map_err(map_client_error)?;
    if let Some(token) = session
        .load()
        .context("не удалось прочитать .chirp_token")?
    {
        client.set_token(token);
    }
    let cache = QueryCache::default();

    match cli.command {
        Command::Feed => render_route(&client, &cache, Route::Home).await?,
        Command::Post { id } => render_route(&client, &cache, Route::Post { id }).await?,
        Command::Profile { handle } => {
            let route = Route::parse(&format!("/{handle}"))
                .map_err(|err| anyhow!("некорректный handle: {err}"))?;
            render_route(&client, &cache, route).await?;
        }
        Command::Open { path } => {
            let route = Route::parse(&path).map_err(|err| anyhow!("некорректный путь: {err}"))?;
            render_route(&client, &cache, route).await?;
        }
        Command::Create { content } => {
            let mut composer = PostComposer::for_session(&session).ok_or_else(|| {
                anyhow!("требуется вход: выполните `chirp-cli sign-in <TOKEN>`")
            })?;
            composer.set_input(content);

            match composer.submit(&client, &cache).await {
                None => return Err(anyhow!("пустой пост не отправляется")),
                Some(MutationResult::Success(item)) => {
                    println!("Пост создан");
                    println!("{}", format_item(&FeedItemView::new(&item, Utc::now())));
                }
                Some(_) => {
                    let message = composer
                        .message()
                        .unwrap_or(PostComposer::GENERIC_FAILURE)
                        .to_string();
                    return Err(anyhow!(message));
                }
            }
        }
        Command::SignIn { token } => {
            if session::parse_token_content(&token).is_none() {
                return Err(anyhow!("токен не должен быть пустым"));
            }
            session
                .store(&token)
                .context("не удалось сохранить токен")?;
            println!("Токен сохранён в {TOKEN_FILE}");
        }
        Command::SignOut { yes } => {
            let mut dialog = SignOutDialog::default();
            dialog.open();

            let confirmed = yes || {
                let stdin = io::stdin();
                let mut stdout = io::stdout();
                ask_confirmation(stdin.lock(), &mut stdout)?
            };

            if confirmed {
                dialog
                    .confirm(&session)
                    .context("не удалось удалить токен")?;
                println!("Выход выполнен");
            } else {
                dialog.cancel();
                println!("Выход отменён");
            }
        }
    }

    Ok(())
}

async fn render_route(client: &ChirpClient, cache: &QueryCache, route: Route) -> Result<()> {
    let now = Utc::now();

    match route {
        Route::Home => {
            let page = PageState::from_result(cache.feed(client).await);
            print_feed_page(&page, now);
            fail_on_error(&page)
        }
        Route::Post { id } => {
            let page = PageState::from_result(cache.post(client, &id).await);
            if let Some(item) = page.ready() {
                println!("{}", single_post_title(item));
                println!("{}", format_item(&FeedItemView::new(item, now)));
            }
            print_message(&page);
            fail_on_error(&page)
        }
        Route::Profile { handle } => {
            let profile = PageState::from_result(cache.profile(client, &handle).await);
            let Some(user) = profile.ready() else {
                print_message(&profile);
                return fail_on_error(&profile);
            };
            println!("{}", profile_title(user));
            println!("@{}", user.username.as_deref().unwrap_or_default());
            println!("----");

            let feed = PageState::from_result(cache.user_feed(client, &user.id).await)
                .empty_when(|items| items.is_empty());
            print_feed_page(&feed, now);
            fail_on_error(&feed)
        }
    }
}

fn print_feed_page<F: AsRef<Vec<FeedItem>>>(page: &PageState<F>, now: DateTime<Utc>) {
    if let Some(items) = page.ready() {
        for item in items.as_ref() {
            println!("{}", format_item(&FeedItemView::new(item, now)));
        }
    }
    print_message(page);
}

fn print_message<T>(page: &PageState<T>) {
    if let Some(message) = page.message() {
        println!("{message}");
    }
}

fn fail_on_error<T>(page: &PageState<T>) -> Result<()> {
    match page {
        PageState::Failed(reason) => Err(anyhow!("запрос не выполнен: {reason}")),
        _ => Ok(()),
    }
}

fn format_item(view: &FeedItemView) -> String {
    format!(
        "{} {}  [{}]\n  {}",
        view.handle, view.timestamp, view.post_href, view.content
    )
}

fn ask_confirmation(mut input: impl BufRead, output: &mut impl Write) -> io::Result<bool> {
    write!(output, "{} [y/N]: ", SignOutDialog::PROMPT)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes" | "д" | "да"
    ))
}

fn resolve_server(server: Option<String>, env_server: Option<String>) -> String {
    let raw = server
        .or(env_server)
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: ChirpClientError) -> anyhow::Error {
    let message = match err {
        ChirpClientError::Unauthorized => {
            "требуется вход: выполните `chirp-cli sign-in <TOKEN>`".to_string()
        }
        ChirpClientError::NotFound => "ресурс не найден".to_string(),
        ChirpClientError::Validation { field_errors } => {
            format!("некорректные данные: {field_errors:?}")
        }
        ChirpClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        ChirpClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow!(message)
}

#[cfg(test)]
mod tests {
    use chirp_client::view::FeedItemView;
    use chirp_client::{FeedItem, Post, User};
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn resolve_server_prefers_flag_then_env() {
        assert_eq!(resolve_server(None, None), DEFAULT_HTTP_SERVER);
        assert_eq!(
            resolve_server(None, Some("env.test:1".to_string())),
            "http://env.test:1"
        );
        assert_eq!(
            resolve_server(Some("flag.test:2".to_string()), Some("env.test:1".to_string())),
            "http://flag.test:2"
        );
    }

    #[test]
    fn ask_confirmation_accepts_only_yes() {
        let mut out = Vec::new();
        assert!(ask_confirmation("y\n".as_bytes(), &mut out).expect("io must succeed"));
        assert!(ask_confirmation("Да\n".as_bytes(), &mut out).expect("io must succeed"));
        assert!(!ask_confirmation("\n".as_bytes(), &mut out).expect("io must succeed"));
        assert!(!ask_confirmation("nope\n".as_bytes(), &mut out).expect("io must succeed"));

        let prompt = String::from_utf8(out).expect("prompt must be utf-8");
        assert!(prompt.starts_with("Are you sure you want to sign out? [y/N]: "));
    }

    #[test]
    fn format_item_shows_handle_time_and_link() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let item = FeedItem {
            post: Post {
                id: "p1".to_string(),
                content: "hello".to_string(),
                author_id: "user_1".to_string(),
                created_at,
            },
            author: User {
                id: "user_1".to_string(),
                username: Some("alice".to_string()),
                profile_image_url: String::new(),
                first_name: None,
                last_name: None,
                email: None,
            },
        };

        let view = FeedItemView::new(&item, created_at + Duration::hours(2));

        assert_eq!(
            format_item(&view),
            "@alice · 2 hours ago  [/post/p1]\n  hello"
        );
    }

    #[test]
    fn cli_parses_sign_out_flag() {
        let cli = Cli::try_parse_from(["chirp-cli", "sign-out", "--yes"]).expect("args must parse");
        assert!(matches!(cli.command, Command::SignOut { yes: true }));

        let cli = Cli::try_parse_from(["chirp-cli", "--server", "x:1", "profile", "@alice"])
            .expect("args must parse");
        assert_eq!(cli.server.as_deref(), Some("x:1"));
        assert!(matches!(cli.command, Command::Profile { ref handle } if handle == "@alice"));
    }
}
