use chirp_client::view::{PageState, single_post_title};
use leptos::prelude::*;

use crate::api;
use crate::components::go_back::GoBack;
use crate::components::layout::LayoutPage;
use crate::components::loading::{Loading, PageMessage};
use crate::components::post_view::PostView;
use crate::navigation;
use crate::state::AppState;

/// Страница одного поста: `/post/{id}`.
#[component]
pub(crate) fn SinglePostPage(state: AppState, id: String) -> impl IntoView {
    let post = LocalResource::new(move || {
        let id = id.clone();
        async move { PageState::from_result(api::get_post(&id).await) }
    });

    Effect::new(move |_| {
        if let Some(PageState::Ready(item)) = post.get() {
            navigation::set_title(&single_post_title(&item));
        }
    });

    view! {
        <LayoutPage>
            <GoBack state=state />
            {move || match post.get().unwrap_or(PageState::Loading) {
                PageState::Loading => view! { <Loading /> }.into_any(),
                PageState::Ready(item) => view! { <PostView state=state item=item /> }.into_any(),
                other => {
                    let message = other.message().unwrap_or_default();
                    view! { <PageMessage message=message /> }.into_any()
                }
            }}
        </LayoutPage>
    }
}
