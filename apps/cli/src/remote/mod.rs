//! Client for the remote flashcard deck service.

use cloze_core::DeckDocument;
use reqwest::Client;

/// Remote deck errors.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Fetches decks by numeric id from `{base_url}/deck/{id}`.
#[derive(Debug, Clone)]
pub struct DeckClient {
    client: Client,
    base_url: String,
}

impl DeckClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one deck. A single request, no retries.
    pub async fn fetch_deck(&self, deck_id: u64) -> Result<DeckDocument, RemoteError> {
        let url = format!("{}/deck/{}", self.base_url, deck_id);
        tracing::info!(%url, "fetching deck");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Backend { status, message });
        }

        let deck: DeckDocument = resp
            .json()
            .await
            .map_err(|e| RemoteError::Parse(e.to_string()))?;

        tracing::debug!(cards = deck.cards.len(), "deck received");
        Ok(deck)
    }
}
