use leptos::prelude::*;

/// Индикатор загрузки страницы.
#[component]
pub(crate) fn Loading() -> impl IntoView {
    view! {
        <div class="loading full" role="status" aria-label="loading">
            <progress />
        </div>
    }
}

/// Индикатор на месте кнопки отправки поста.
#[component]
pub(crate) fn SubmitPostLoading() -> impl IntoView {
    view! {
        <div class="loading" role="status" aria-label="submitting">
            <progress />
        </div>
    }
}

/// Текст вместо данных: «404», «No posts yet», «Something went wrong».
#[component]
pub(crate) fn PageMessage(message: &'static str) -> impl IntoView {
    view! { <div class="page-message">{message}</div> }
}
