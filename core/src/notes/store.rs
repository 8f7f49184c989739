//! Local mirror of the server-side note collection.
//!
//! The server is the single source of truth. Every operation reconciles the
//! local collection from the server's response only: wholesale replacement
//! on refresh, prepend of the returned note on create, full entry
//! replacement on update/publish. On any transport or server failure the
//! collection is left exactly as it was and the error message is written to
//! the status slot; nothing is retried and nothing escalates past the call
//! site.

use crate::notes::models::{Note, NoteDraft, NotePatch};
use crate::status::StatusChannel;
use crate::transport::ApiClient;

pub struct NoteStore {
    client: ApiClient,
    status: StatusChannel,
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new(client: ApiClient, status: StatusChannel) -> Self {
        Self {
            client,
            status,
            notes: Vec::new(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Drop all session-scoped state. Invoked on the transition back to
    /// Anonymous so no notes leak across sessions.
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    /// Refuses the operation when no token is present. A missing token is a
    /// caller error, not a server failure, and never reaches the network.
    fn require_token<'t>(&self, token: Option<&'t str>) -> Option<&'t str> {
        match token {
            Some(tok) if !tok.is_empty() => Some(tok),
            _ => {
                tracing::warn!(target: "noted.store", "operation refused: not logged in");
                self.status.set("not logged in");
                None
            }
        }
    }

    /// Fetch the full collection and replace the local one wholesale.
    /// Returns the new collection on success; on failure the local state is
    /// untouched and `None` is returned.
    pub async fn refresh(&mut self, token: Option<&str>) -> Option<&[Note]> {
        let token = self.require_token(token)?;
        match self.client.list_notes(token).await {
            Ok(notes) => {
                self.status.set(format!("loaded {} note(s)", notes.len()));
                self.notes = notes;
                Some(&self.notes)
            }
            Err(err) => {
                self.status.set(err.to_string());
                None
            }
        }
    }

    /// Create a note and prepend the server's authoritative copy. A
    /// blank/whitespace-only title is rejected locally with no network call
    /// and no status message.
    pub async fn create(
        &mut self,
        token: Option<&str>,
        title: &str,
        content: &str,
    ) -> Option<Note> {
        if title.trim().is_empty() {
            return None;
        }
        let token = self.require_token(token)?;
        let draft = NoteDraft {
            title: title.to_string(),
            content: content.to_string(),
        };
        match self.client.create_note(token, &draft).await {
            Ok(note) => {
                self.status.set("note created");
                self.notes.insert(0, note.clone());
                Some(note)
            }
            Err(err) => {
                self.status.set(err.to_string());
                None
            }
        }
    }

    /// Patch a note and replace the local entry with the server's returned
    /// copy. Replacement, not field merge: whatever the server echoes back
    /// is what the entry becomes.
    pub async fn update(
        &mut self,
        token: Option<&str>,
        id: &str,
        patch: NotePatch,
    ) -> Option<Note> {
        let token = self.require_token(token)?;
        match self.client.update_note(token, id, &patch).await {
            Ok(note) => {
                self.status.set("note updated");
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id == id) {
                    *slot = note.clone();
                }
                Some(note)
            }
            Err(err) => {
                self.status.set(err.to_string());
                None
            }
        }
    }

    /// Delete a note. The caller must have obtained user confirmation
    /// before invoking this; the store only issues the request. Returns
    /// whether the entry was removed locally.
    pub async fn delete(&mut self, token: Option<&str>, id: &str) -> bool {
        let Some(token) = self.require_token(token) else {
            return false;
        };
        match self.client.delete_note(token, id).await {
            Ok(()) => {
                self.status.set("note deleted");
                self.notes.retain(|n| n.id != id);
                true
            }
            Err(err) => {
                self.status.set(err.to_string());
                false
            }
        }
    }

    /// Ask the server to mint a share token. On success the local entry is
    /// replaced with the published note and the computed public URL is
    /// returned for display or clipboard copy. A publish response without a
    /// share token yields no URL and says so in the status slot.
    pub async fn publish(
        &mut self,
        token: Option<&str>,
        id: &str,
    ) -> Option<(Note, Option<String>)> {
        let token = self.require_token(token)?;
        match self.client.share_note(token, id).await {
            Ok(note) => {
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id == id) {
                    *slot = note.clone();
                }
                let url = note
                    .share_token
                    .as_deref()
                    .map(|st| self.client.share_url(st));
                match url {
                    Some(_) => self.status.set("note published"),
                    None => self.status.set("note published, but no share link returned"),
                }
                Some((note, url))
            }
            Err(err) => {
                self.status.set(err.to_string());
                None
            }
        }
    }

    /// Unpublishing is just a field patch, not a dedicated server verb.
    pub async fn unpublish(&mut self, token: Option<&str>, id: &str) -> Option<Note> {
        let patch = NotePatch {
            is_public: Some(false),
            ..Default::default()
        };
        self.update(token, id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use pretty_assertions::assert_eq;

    fn note_json(id: &str, title: &str) -> String {
        format!(r#"{{"id":"{id}","title":"{title}","content":"c","isPublic":false}}"#)
    }

    fn store_for(server: &Server) -> NoteStore {
        let client = ApiClient::new(&server.url(), 1_000).unwrap();
        NoteStore::new(client, StatusChannel::new())
    }

    #[tokio::test]
    async fn test_refresh_replaces_wholesale() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/notes")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{},{}]", note_json("n1", "A"), note_json("n2", "B")))
            .create_async()
            .await;

        let mut store = store_for(&server);
        // seed stale local state that must not survive the refresh
        store.notes = vec![Note {
            id: "stale".to_string(),
            title: "old".to_string(),
            content: String::new(),
            is_public: false,
            share_token: None,
        }];

        let notes = store.refresh(Some("tok")).await.unwrap();
        let ids: Vec<&str> = notes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n2"]);
        assert_eq!(
            store.status.latest().as_deref(),
            Some("loaded 2 note(s)")
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_local_state() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/notes")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let mut store = store_for(&server);
        store.notes = vec![Note {
            id: "n1".to_string(),
            title: "keep".to_string(),
            content: String::new(),
            is_public: false,
            share_token: None,
        }];

        assert!(store.refresh(Some("tok")).await.is_none());
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.notes()[0].id, "n1");
        assert!(store.status.latest().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_create_prepends_server_note() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/notes")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(note_json("n-new", "Fresh"))
            .create_async()
            .await;

        let mut store = store_for(&server);
        store.notes = vec![Note {
            id: "n-old".to_string(),
            title: "Old".to_string(),
            content: String::new(),
            is_public: false,
            share_token: None,
        }];

        let created = store.create(Some("tok"), "Fresh", "c").await.unwrap();
        assert_eq!(created.id, "n-new");
        let ids: Vec<&str> = store.notes().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["n-new", "n-old"]);
    }

    #[tokio::test]
    async fn test_create_empty_title_makes_no_network_call() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/notes")
            .expect(0)
            .create_async()
            .await;

        let mut store = store_for(&server);
        assert!(store.create(Some("tok"), "", "anything").await.is_none());
        assert!(store.create(Some("tok"), "   ", "anything").await.is_none());
        assert!(store.notes().is_empty());
        // validation failures are silent
        assert_eq!(store.status.latest(), None);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_replaces_not_merges() {
        let mut server = Server::new_async().await;
        // server echoes an unrelated changed field; the entry must become
        // exactly this response
        let _m = server
            .mock("PATCH", "/notes/n1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"n1","title":"X","content":"server-changed","isPublic":false}"#)
            .create_async()
            .await;

        let mut store = store_for(&server);
        store.notes = vec![Note {
            id: "n1".to_string(),
            title: "old".to_string(),
            content: "local".to_string(),
            is_public: false,
            share_token: None,
        }];

        let patch = NotePatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        store.update(Some("tok"), "n1", patch).await.unwrap();
        assert_eq!(store.notes()[0].title, "X");
        assert_eq!(store.notes()[0].content, "server-changed");
    }

    #[tokio::test]
    async fn test_update_failure_leaves_entry_untouched() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PATCH", "/notes/n1")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let before = Note {
            id: "n1".to_string(),
            title: "old".to_string(),
            content: "local".to_string(),
            is_public: false,
            share_token: None,
        };
        let mut store = store_for(&server);
        store.notes = vec![before.clone()];

        let patch = NotePatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert!(store.update(Some("tok"), "n1", patch).await.is_none());
        assert_eq!(store.notes()[0], before);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/notes/n1")
            .with_status(204)
            .create_async()
            .await;

        let mut store = store_for(&server);
        store.notes = vec![
            Note {
                id: "n1".to_string(),
                title: "A".to_string(),
                content: String::new(),
                is_public: false,
                share_token: None,
            },
            Note {
                id: "n2".to_string(),
                title: "B".to_string(),
                content: String::new(),
                is_public: false,
                share_token: None,
            },
        ];

        assert!(store.delete(Some("tok"), "n1").await);
        assert_eq!(store.notes().len(), 1);
        assert!(store.notes().iter().all(|n| n.id != "n1"));
    }

    #[tokio::test]
    async fn test_delete_failure_is_local_noop() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("DELETE", "/notes/absent")
            .with_status(404)
            .with_body("no such note")
            .create_async()
            .await;

        let mut store = store_for(&server);
        store.notes = vec![Note {
            id: "n1".to_string(),
            title: "A".to_string(),
            content: String::new(),
            is_public: false,
            share_token: None,
        }];

        assert!(!store.delete(Some("tok"), "absent").await);
        assert_eq!(store.notes().len(), 1);
        assert!(store.status.latest().unwrap().contains("404"));
    }

    #[tokio::test]
    async fn test_publish_then_unpublish_roundtrip() {
        let mut server = Server::new_async().await;
        let _m1 = server
            .mock("POST", "/notes/n1/share")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"n1","title":"T","content":"c","isPublic":true,"shareToken":"st-1"}"#)
            .create_async()
            .await;
        let _m2 = server
            .mock("PATCH", "/notes/n1")
            .match_body(mockito::Matcher::JsonString(
                r#"{"isPublic":false}"#.to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"n1","title":"T","content":"c","isPublic":false}"#)
            .create_async()
            .await;

        let mut store = store_for(&server);
        store.notes = vec![Note {
            id: "n1".to_string(),
            title: "T".to_string(),
            content: "c".to_string(),
            is_public: false,
            share_token: None,
        }];

        let (note, url) = store.publish(Some("tok"), "n1").await.unwrap();
        assert!(note.is_public);
        assert_eq!(note.share_token.as_deref(), Some("st-1"));
        assert!(url.unwrap().ends_with("/share/st-1"));
        assert!(store.notes()[0].is_public);

        store.unpublish(Some("tok"), "n1").await.unwrap();
        assert!(!store.notes()[0].is_public);
    }

    #[tokio::test]
    async fn test_publish_without_share_token_yields_no_url() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/notes/n1/share")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"n1","title":"T","content":"c","isPublic":true}"#)
            .create_async()
            .await;

        let mut store = store_for(&server);
        let (note, url) = store.publish(Some("tok"), "n1").await.unwrap();
        assert!(note.is_public);
        assert_eq!(url, None);
        assert_eq!(
            store.status.latest().as_deref(),
            Some("note published, but no share link returned")
        );
    }

    #[tokio::test]
    async fn test_anonymous_operation_refused_without_network() {
        let mut server = Server::new_async().await;
        let m = server.mock("GET", "/notes").expect(0).create_async().await;

        let mut store = store_for(&server);
        assert!(store.refresh(None).await.is_none());
        assert!(store.notes().is_empty());
        assert_eq!(store.status.latest().as_deref(), Some("not logged in"));
        m.assert_async().await;
    }

    #[test]
    fn test_clear_drops_session_scoped_state() {
        let client = ApiClient::new("http://127.0.0.1:9", 1_000).unwrap();
        let mut store = NoteStore::new(client, StatusChannel::new());
        store.notes = vec![Note {
            id: "n1".to_string(),
            title: "A".to_string(),
            content: String::new(),
            is_public: false,
            share_token: None,
        }];
        store.clear();
        assert!(store.notes().is_empty());
    }
}
