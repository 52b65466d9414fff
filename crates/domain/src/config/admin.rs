use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    /// Key expected in `X-Api-Key` on admin routes. Admin routes are closed when unset.
    #[serde(default)]
    pub api_key: Option<String>,
}
