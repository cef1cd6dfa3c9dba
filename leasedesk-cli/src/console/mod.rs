//! Admin console: view state, controller and terminal rendering.
//!
//! Mutations never patch the cache optimistically. Status changes and
//! deletes re-fetch the list under the active filter; memo saves update
//! only the affected cached row.

pub mod client;
pub mod render;
pub mod state;

pub use client::{HttpClient, InquiryApi};
pub use state::ConsoleState;

use leasedesk_core::{InquiryStatus, StatusFilter, UpdateInquiryRequest};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not an envelope
    #[error("unexpected response ({status}): {reason}")]
    UnexpectedResponse {
        status: reqwest::StatusCode,
        reason: String,
    },

    /// Error text returned by the server envelope
    #[error("{0}")]
    Api(String),

    #[error("inquiry {0} is not in the current list")]
    NotLoaded(i64),

    #[error("no memo edit open for inquiry {0}")]
    NoDraft(i64),
}

/// A write the server accepted.
#[derive(Debug)]
pub struct Applied {
    pub message: String,
    /// Set when the follow-up list reload failed; the cache is then stale
    pub reload_error: Option<ConsoleError>,
}

/// Drives an [`InquiryApi`] and keeps [`ConsoleState`] in step with it.
pub struct Console<A> {
    api: A,
    state: ConsoleState,
}

impl<A: InquiryApi> Console<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: ConsoleState::default(),
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ConsoleState {
        &mut self.state
    }

    /// Fetch the list and replace the cache. On failure the cache is kept.
    pub async fn load(&mut self, filter: StatusFilter) -> Result<(), ConsoleError> {
        let inquiries = self.api.list(filter).await?;
        tracing::debug!(filter = filter.as_str(), count = inquiries.len(), "list loaded");
        self.state.replace(filter, inquiries);
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<(), ConsoleError> {
        self.load(self.state.filter()).await
    }

    pub async fn change_status(
        &mut self,
        id: i64,
        status: InquiryStatus,
    ) -> Result<Applied, ConsoleError> {
        let message = self
            .api
            .update(&UpdateInquiryRequest::status(id, status))
            .await?;
        Ok(self.applied(message).await)
    }

    pub async fn delete(&mut self, id: i64) -> Result<Applied, ConsoleError> {
        let message = self.api.delete(id).await?;
        Ok(self.applied(message).await)
    }

    async fn applied(&mut self, message: String) -> Applied {
        let reload_error = self.refresh().await.err();
        if let Some(err) = &reload_error {
            tracing::warn!(error = %err, "write applied but list reload failed");
        }
        Applied {
            message,
            reload_error,
        }
    }

    /// Send the trimmed draft as a memo-only update.
    ///
    /// The draft stays open when the server rejects it.
    pub async fn save_memo(&mut self, id: i64) -> Result<Option<String>, ConsoleError> {
        let draft = self
            .state
            .memo_draft(id)
            .ok_or(ConsoleError::NoDraft(id))?;
        let memo = Some(draft.text.trim().to_owned()).filter(|m| !m.is_empty());

        self.api
            .update(&UpdateInquiryRequest::memo(id, memo.clone()))
            .await?;
        self.state.memo_saved(id, memo.clone());
        Ok(memo)
    }

    /// Open the editor for `id`, replace its text and save in one step.
    pub async fn set_memo(
        &mut self,
        id: i64,
        text: impl Into<String>,
    ) -> Result<Option<String>, ConsoleError> {
        if self.state.begin_memo_edit(id).is_none() {
            return Err(ConsoleError::NotLoaded(id));
        }
        self.state.edit_memo(id, text);
        self.save_memo(id).await
    }
}
