use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::UserRecord, protocol::FetchResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("record fetch failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("record endpoint returned status {status}")]
    Status { status: u16 },
    #[error("record payload did not match the expected shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Seam for the one-shot initial fetch; production uses HTTP, tests
/// inject doubles.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_records(&self) -> Result<Vec<UserRecord>, LoadError>;
}

pub struct HttpRecordSource {
    http: Client,
    endpoint: String,
}

impl HttpRecordSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_records(&self) -> Result<Vec<UserRecord>, LoadError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: FetchResponse = serde_json::from_str(&body)?;
        Ok(payload.data.into_iter().map(UserRecord::from).collect())
    }
}
