use serde::Deserialize;

use quill_api_types::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Auth {
    /// Secret used to sign and verify login tokens (HS256).
    pub jwt_secret: Sensitive<String>,

    /// How long issued login tokens stay valid, in seconds.
    #[serde(default = "Auth::default_token_expiry_secs")]
    pub token_expiry_secs: i64,
}

impl Auth {
    fn default_token_expiry_secs() -> i64 {
        // one day
        86_400
    }
}
