pub(crate) mod game;
pub(crate) mod request;
pub(crate) mod response;
