pub(crate) mod composer;
pub(crate) mod feed;
pub(crate) mod go_back;
pub(crate) mod layout;
pub(crate) mod loading;
pub(crate) mod post_view;
pub(crate) mod profile_page;
pub(crate) mod sign_in;
pub(crate) mod sign_out_button;
pub(crate) mod single_post_page;
