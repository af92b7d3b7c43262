//! Messages service.

use async_trait::async_trait;
use mockall::automock;

use crate::api::{Api, ApiError};

use super::models::{MessageRecord, NewMessage};

/// HTTP client for the messages endpoints.
#[derive(Debug, Clone)]
pub struct HttpMessagesService {
    api: Api,
}

impl HttpMessagesService {
    #[must_use]
    pub fn new(api: Api) -> Self {
        Self { api }
    }
}

#[async_trait]
impl MessagesService for HttpMessagesService {
    async fn send(&self, message: NewMessage) -> Result<MessageRecord, ApiError> {
        let response = self
            .api
            .http()
            .post(self.api.url("/messages"))
            .json(&message)
            .send()
            .await?;

        self.api.decode(response).await
    }

    async fn list(&self, limit: Option<u32>) -> Result<Vec<MessageRecord>, ApiError> {
        let mut request = self.api.http().get(self.api.url("/messages"));

        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let response = request.send().await?;

        self.api.decode(response).await
    }
}

#[automock]
#[async_trait]
pub trait MessagesService: Send + Sync {
    /// Submit a contact-form message.
    async fn send(&self, message: NewMessage) -> Result<MessageRecord, ApiError>;

    /// List inbox messages, newest first.
    async fn list(&self, limit: Option<u32>) -> Result<Vec<MessageRecord>, ApiError>;
}
