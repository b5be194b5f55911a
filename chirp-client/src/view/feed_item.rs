use chrono::{DateTime, Utc};

use crate::models::{FeedItem, User};

/// Готовые к отображению поля одного элемента ленты.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItemView {
    /// Id поста, ключ элемента в списке.
    pub post_id: String,
    /// `@alice`.
    pub handle: String,
    /// Ссылка на аватар автора.
    pub avatar_url: String,
    /// `@alice's profile picture`.
    pub avatar_alt: String,
    /// `/@alice`; `None`, если у автора нет handle.
    pub profile_href: Option<String>,
    /// `/post/{id}`.
    pub post_href: String,
    /// `· 5 minutes ago`.
    pub timestamp: String,
    /// Текст поста.
    pub content: String,
}

impl FeedItemView {
    /// Строит представление относительно момента `now`.
    pub fn new(item: &FeedItem, now: DateTime<Utc>) -> Self {
        let username = item.author.username.as_deref().unwrap_or_default();

        Self {
            post_id: item.post.id.clone(),
            handle: format!("@{username}"),
            avatar_url: item.author.profile_image_url.clone(),
            avatar_alt: format!("@{username}'s profile picture"),
            profile_href: item
                .author
                .username
                .as_deref()
                .filter(|name| !name.is_empty())
                .map(|name| format!("/@{name}")),
            post_href: format!("/post/{}", item.post.id),
            timestamp: format!("· {}", relative_time(item.post.created_at, now)),
            content: item.post.content.clone(),
        }
    }
}

/// Заголовок страницы поста: `{content} - @{username}`.
pub fn single_post_title(item: &FeedItem) -> String {
    format!(
        "{} - @{}",
        item.post.content,
        item.author.username.as_deref().unwrap_or_default()
    )
}

/// Заголовок страницы профиля.
pub fn profile_title(user: &User) -> String {
    user.username.clone().unwrap_or_default()
}

/// Относительное время в стиле «5 minutes ago».
///
/// Пороги: до 45 секунд, до 90 секунд, до 45 минут, до 90 минут, до 22 часов,
/// до 36 часов, до 26 дней, до 46 дней, до 11 месяцев, до 18 месяцев.
/// Время из будущего (рассинхрон часов) формулируется как `in ...`.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let seconds = elapsed.num_seconds().unsigned_abs();
    let phrase = duration_phrase(seconds);

    if elapsed.num_seconds() < 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

fn duration_phrase(seconds: u64) -> String {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const DAY: f64 = 24.0 * HOUR;
    const MONTH_DAYS: f64 = 30.4375;

    let secs = seconds as f64;
    let minutes = (secs / MINUTE).round() as u64;
    let hours = (secs / HOUR).round() as u64;
    let days = (secs / DAY).round() as u64;

    match seconds {
        0..45 => "a few seconds".to_string(),
        45..90 => "a minute".to_string(),
        _ if minutes < 45 => format!("{minutes} minutes"),
        _ if minutes < 90 => "an hour".to_string(),
        _ if hours < 22 => format!("{hours} hours"),
        _ if hours < 36 => "a day".to_string(),
        _ if days < 26 => format!("{days} days"),
        _ if days < 46 => "a month".to_string(),
        _ => {
            let months = (secs / DAY / MONTH_DAYS).round() as u64;
            if months < 11 {
                return format!("{months} months");
            }
            let years = (secs / DAY / 365.25).round() as u64;
            if months < 18 || years <= 1 {
                "a year".to_string()
            } else {
                format!("{years} years")
            }
        }
    }
}
