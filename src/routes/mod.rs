pub(crate) mod like;
pub(crate) mod router;
pub(crate) mod status;
