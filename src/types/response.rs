use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct Status {
    pub(crate) status: &'static str,
    pub(crate) tokens_loaded: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct Refreshed {
    pub(crate) tokens_loaded: usize,
}

#[derive(Debug, Serialize)]
pub(crate) struct LikeSummary {
    #[serde(rename = "LikesGivenByAPI")]
    pub(crate) likes_given: i64,
    #[serde(rename = "LikesafterCommand")]
    pub(crate) likes_after: i64,
    #[serde(rename = "LikesbeforeCommand")]
    pub(crate) likes_before: i64,
    #[serde(rename = "PlayerNickname")]
    pub(crate) nickname: String,
    #[serde(rename = "UID")]
    pub(crate) uid: String,
}

impl LikeSummary {
    pub(crate) fn new(uid: String, nickname: String, before: i64, after: i64) -> Self {
        Self {
            likes_given: after - before,
            likes_after: after,
            likes_before: before,
            nickname,
            uid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_delta_is_signed() {
        let summary = LikeSummary::new("42".into(), "ace".into(), 120, 95);

        assert_eq!(
            serde_json::to_value(summary).unwrap(),
            json!({
                "LikesGivenByAPI": -25,
                "LikesafterCommand": 95,
                "LikesbeforeCommand": 120,
                "PlayerNickname": "ace",
                "UID": "42",
            })
        );
    }

    #[test]
    fn test_summary_zero_delta() {
        let summary = LikeSummary::new("42".into(), "ace".into(), 10, 10);
        assert_eq!(summary.likes_given, 0);
    }
}
