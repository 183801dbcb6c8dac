use serde::{Deserialize, Serialize};

/// The Identity struct represents the verified current user, as returned by
/// the session-verification endpoint. Cookie presence alone is approximate;
/// this is the authoritative answer.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Identity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}
