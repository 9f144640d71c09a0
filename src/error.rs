use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed connect failed: {0}")]
    Connect(String),
    #[error("feed transport error: {0}")]
    Transport(String),
    #[error("snapshot decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("no snake state document")]
    MissingDocument,
    #[error("feed closed (code {code}): {reason}")]
    Closed { code: u16, reason: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("failed to load {role} sprite from {src}")]
    AssetLoad { role: &'static str, src: String },
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("invalid view config: {0}")]
    Config(String),
}

impl From<JsValue> for ViewError {
    fn from(value: JsValue) -> Self {
        ViewError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<serde_json::Error> for ViewError {
    fn from(err: serde_json::Error) -> Self {
        ViewError::Config(err.to_string())
    }
}
