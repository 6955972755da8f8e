use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct LikeParams {
    pub(crate) uid: Option<String>,
    pub(crate) server_name: Option<String>,
    pub(crate) key: Option<String>,
    /// pin the burst to one cached account instead of the first one
    pub(crate) account: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KeyParams {
    pub(crate) key: Option<String>,
}
