use serde::{Deserialize, Serialize};

/// The response envelope every backend endpoint honors:
/// `{ "result": true, "data": <T> }` on success.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApiEnvelope<T> {
    pub result: bool,
    pub data: T,
}

/// The body shape of backend error responses. Both fields are optional;
/// callers fall back to a generic message when neither is present.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}
