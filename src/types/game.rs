use serde_json::Value;

/// What the player-info service handed back for one lookup.
#[derive(Debug, Clone)]
pub(crate) enum PlayerInfo {
    Profile(Value),
    Failed {
        status: Option<u16>,
        raw: Option<String>,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlayerSnapshot {
    pub(crate) nickname: String,
    pub(crate) liked: i64,
}

impl PlayerInfo {
    /// Pulls `basicInfo.liked` and `basicInfo.nickname`, falling back to
    /// 0 and "Unknown" when the profile is missing either.
    pub(crate) fn snapshot(&self) -> PlayerSnapshot {
        let basic = match self {
            PlayerInfo::Profile(profile) => profile.get("basicInfo"),
            PlayerInfo::Failed { .. } => None,
        };

        let liked = basic
            .and_then(|basic| basic.get("liked"))
            .and_then(|liked| match liked {
                Value::Number(n) => n.as_i64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .unwrap_or(0);

        let nickname = basic
            .and_then(|basic| basic.get("nickname"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        PlayerSnapshot { nickname, liked }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LikeOutcome {
    Status(u16),
    Failed(String),
}

impl LikeOutcome {
    pub(crate) fn is_success(&self) -> bool {
        matches!(self, LikeOutcome::Status(code) if (200..300).contains(code))
    }
}

/// Outcomes of one burst, in dispatch order.
#[derive(Debug, Default)]
pub(crate) struct BurstReport {
    pub(crate) outcomes: Vec<LikeOutcome>,
}

impl BurstReport {
    pub(crate) fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub(crate) fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub(crate) fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, LikeOutcome::Failed(_)))
            .count()
    }
}
