use chirp_client::FeedItem;
use chirp_client::view::FeedItemView;
use leptos::ev::MouseEvent;
use leptos::prelude::*;

use crate::state::AppState;

pub(crate) fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Ссылка, которая меняет маршрут без перезагрузки страницы.
#[component]
pub(crate) fn AppLink(state: AppState, href: String, children: Children) -> impl IntoView {
    let target = href.clone();
    let on_click = move |ev: MouseEvent| {
        ev.prevent_default();
        state.navigate(&target);
    };

    view! {
        <a href=href on:click=on_click>
            {children()}
        </a>
    }
}

#[component]
pub(crate) fn PostView(state: AppState, item: FeedItem) -> impl IntoView {
    let view = FeedItemView::new(&item, now());
    let handle = view.handle.clone();

    let author = match view.profile_href.clone() {
        Some(href) => view! {
            <AppLink state=state href=href>
                <span class="post-handle">{handle}</span>
            </AppLink>
        }
        .into_any(),
        None => view! { <span class="post-handle">{handle}</span> }.into_any(),
    };

    view! {
        <article class="post">
            <img class="avatar" src=view.avatar_url alt=view.avatar_alt width="56" height="56" />
            <div>
                <div class="post-meta">
                    {author}
                    <AppLink state=state href=view.post_href>
                        <span>{view.timestamp}</span>
                    </AppLink>
                </div>
                <div class="post-content">{view.content}</div>
            </div>
        </article>
    }
}
