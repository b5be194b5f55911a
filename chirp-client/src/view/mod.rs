//! View-модели страниц и компонентов без привязки к UI-фреймворку.
//!
//! Всё состояние экранов описано здесь, а CLI и браузерный фронтенд только
//! отображают его.

pub mod composer;
pub mod feed_item;
pub mod page;
pub mod route;
pub mod session;
pub mod sign_out;

pub use feed_item::{FeedItemView, profile_title, relative_time, single_post_title};
pub use page::PageState;
pub use route::{
    BackNavigation, Route, RouteError, back_navigation, handle_from_slug, profile_slug,
};
pub use sign_out::SignOutDialog;
