use serde::Deserialize;

/// Query string of `POST /oauth`. Decoded as raw pairs so a repeated key
/// is not an error; the first `code` wins.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct OAuthParams {
    pub code: Option<String>,
}

impl From<Vec<(String, String)>> for OAuthParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let code = pairs
            .into_iter()
            .find(|(key, _)| key == "code")
            .map(|(_, value)| value);

        Self { code }
    }
}

impl OAuthParams {
    /// The authorization code, if one was supplied and is non-empty.
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|code| !code.is_empty())
    }
}
