pub(crate) mod identity;
pub(crate) mod postgres;
