//! CLI assembly layer: applies flag overrides to the loaded config and
//! wires the transport, session and note store together.

use std::sync::Arc;

use noted_core::api as core_api;

pub struct App {
    pub status: core_api::StatusChannel,
    pub session: core_api::SessionManager,
    pub notes: core_api::NoteStore,
}

impl App {
    pub fn build(
        cfg: &core_api::AppConfig,
        server_url_override: Option<&str>,
    ) -> Result<Self, core_api::CliError> {
        let base_url = server_url_override.unwrap_or(&cfg.server.base_url);
        let client = core_api::ApiClient::new(base_url, cfg.server.timeout_ms)?;

        let status = core_api::StatusChannel::new();
        let token_path = core_api::get_token_file_path()?;
        let token_store = Arc::new(core_api::FileTokenStore::new(token_path));
        let session = core_api::SessionManager::new(client.clone(), token_store, status.clone());
        let notes = core_api::NoteStore::new(client, status.clone());

        Ok(Self {
            status,
            session,
            notes,
        })
    }

    /// Latest status slot content, or a generic fallback for error paths
    /// that never produced a message.
    pub fn latest_status(&self) -> String {
        self.status
            .latest()
            .unwrap_or_else(|| "operation failed".to_string())
    }
}
