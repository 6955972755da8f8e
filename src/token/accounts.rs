use std::collections::BTreeMap;
use std::path::Path;

pub(crate) type Accounts = BTreeMap<String, String>;

/// Reads the `{ account id: credential }` store. Anything short of a
/// well-formed object is logged and treated as "no accounts".
pub(crate) async fn load_accounts(path: impl AsRef<Path>) -> Accounts {
    let path = path.as_ref();

    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            tracing::error!("{} could not be read: {}", path.display(), e);
            return Accounts::new();
        }
    };

    match serde_json::from_str::<Accounts>(&contents) {
        Ok(accounts) => {
            tracing::info!("Loaded {} accounts", accounts.len());
            accounts
        }
        Err(e) => {
            tracing::error!("Failed to load accounts: {}", e);
            Accounts::new()
        }
    }
}
