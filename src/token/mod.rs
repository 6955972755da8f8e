pub(crate) mod accounts;
pub(crate) mod store;
