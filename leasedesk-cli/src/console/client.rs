//! HTTP client for the inquiry service.

use async_trait::async_trait;
use leasedesk_core::{
    ChangePasswordRequest, Envelope, Inquiry, LoginRequest, NewInquiry, StatusFilter,
    UpdateInquiryRequest,
};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ConsoleError;

/// Inquiry operations the console drives
#[async_trait]
pub trait InquiryApi: Send + Sync {
    async fn list(&self, filter: StatusFilter) -> Result<Vec<Inquiry>, ConsoleError>;

    async fn create(&self, inquiry: &NewInquiry) -> Result<String, ConsoleError>;

    async fn update(&self, request: &UpdateInquiryRequest) -> Result<String, ConsoleError>;

    async fn delete(&self, id: i64) -> Result<String, ConsoleError>;
}

/// reqwest-backed client rooted at a server base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check the admin password. Returns the server's confirmation message.
    pub async fn login(&self, password: &str) -> Result<String, ConsoleError> {
        let response = self
            .http
            .post(self.url("/api/admin/login"))
            .json(&LoginRequest::new(password))
            .send()
            .await?;
        message(response).await
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<String, ConsoleError> {
        let response = self
            .http
            .post(self.url("/api/admin/change-password"))
            .json(&ChangePasswordRequest::new(current, new))
            .send()
            .await?;
        message(response).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: &B,
    ) -> Result<String, ConsoleError> {
        let response = self
            .http
            .request(method, self.url(path))
            .json(body)
            .send()
            .await?;
        message(response).await
    }
}

#[async_trait]
impl InquiryApi for HttpClient {
    async fn list(&self, filter: StatusFilter) -> Result<Vec<Inquiry>, ConsoleError> {
        let url = match filter {
            StatusFilter::All => self.url("/api/inquiries"),
            StatusFilter::Only(status) => self.url(&format!("/api/inquiries?status={status}")),
        };
        tracing::debug!(%url, "listing inquiries");

        let response = self.http.get(url).send().await?;
        let envelope: Envelope<Vec<Inquiry>> = decode(response).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn create(&self, inquiry: &NewInquiry) -> Result<String, ConsoleError> {
        self.send_json(reqwest::Method::POST, "/api/inquiries", inquiry)
            .await
    }

    async fn update(&self, request: &UpdateInquiryRequest) -> Result<String, ConsoleError> {
        self.send_json(reqwest::Method::PATCH, "/api/inquiries", request)
            .await
    }

    async fn delete(&self, id: i64) -> Result<String, ConsoleError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/inquiries?id={id}")))
            .send()
            .await?;
        message(response).await
    }
}

/// Decode an envelope regardless of status code so server error text
/// reaches the operator.
async fn decode<T: DeserializeOwned + Default>(response: Response) -> Result<Envelope<T>, ConsoleError> {
    let status = response.status();
    let body = response.bytes().await?;
    parse_envelope(status, &body)
}

fn parse_envelope<T: DeserializeOwned + Default>(
    status: StatusCode,
    body: &[u8],
) -> Result<Envelope<T>, ConsoleError> {
    let envelope: Envelope<T> =
        serde_json::from_slice(body).map_err(|e| ConsoleError::UnexpectedResponse {
            status,
            reason: e.to_string(),
        })?;
    envelope.into_result().map_err(|message| {
        tracing::debug!(%status, %message, "server rejected request");
        ConsoleError::Api(message)
    })
}

async fn message(response: Response) -> Result<String, ConsoleError> {
    let envelope: Envelope<serde::de::IgnoredAny> = decode(response).await?;
    Ok(envelope.message.unwrap_or_default())
}
