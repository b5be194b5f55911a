pub(crate) mod identity_provider;
pub(crate) mod post_repository;
pub(crate) mod repositories;
