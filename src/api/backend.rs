use tracing::debug;

use crate::api::{AskRequest, BackendError, BackendReply};

/// Something that can answer a question with a [`BackendReply`].
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn ask(&self, question: &str) -> Result<BackendReply, BackendError>;
}

/// The notebook backend reached over HTTP.
///
/// One POST per question. The status code is not consulted: error replies
/// arrive as JSON bodies and anything else fails to decode.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn ask(&self, question: &str) -> Result<BackendReply, BackendError> {
        let response = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(&AskRequest { question })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "backend responded");

        BackendReply::parse(&body)
    }
}
