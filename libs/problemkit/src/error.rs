/// Errors surfaced while turning a [`Problem`](crate::Problem) into JSON
#[derive(Debug, thiserror::Error)]
pub enum ProblemError {
    #[error("field `{key}` cannot be encoded as JSON: {reason}")]
    Unencodable { key: String, reason: String },

    /// Encoder failure on the member map. Members are already JSON values,
    /// so this is not expected in practice; kept so `to_json` can use `?`.
    #[error("problem serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
