use leptos::prelude::*;

#[component]
pub(crate) fn LayoutPage(children: Children) -> impl IntoView {
    view! { <main class="layout">{children()}</main> }
}
