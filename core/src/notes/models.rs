use serde::{Deserialize, Serialize};

/// A note as the server returns it. The server is the single source of
/// truth: `id` and `share_token` are always server-assigned, never computed
/// locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "isPublic", default)]
    pub is_public: bool,
    /// Present only while the note is published; meaningless otherwise.
    #[serde(rename = "shareToken", skip_serializing_if = "Option::is_none")]
    pub share_token: Option<String>,
}

/// Creation request body.
#[derive(Debug, Clone, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

/// Partial update body; only set fields are serialized.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "isPublic", skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}
