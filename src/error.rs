#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The static configuration and the bundled data disagree. Raised by
    /// [`crate::RegistryBuilder::build`] for an entry whose document is missing,
    /// a `github` entry without a URL, or a non-manual entry whose program id is
    /// not a 32-byte base58 address (the `"*"` wildcard included).
    #[error("configuration error: {reason}")]
    Config { reason: String },

    /// A bundled or supplied IDL document is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
