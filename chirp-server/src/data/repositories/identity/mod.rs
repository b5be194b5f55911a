pub(crate) mod http_identity_provider;
